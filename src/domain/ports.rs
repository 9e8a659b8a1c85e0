use crate::domain::model::JsonSource;
use crate::utils::error::Result;
use std::path::Path;
use std::time::Duration;

/// 路徑皆相對於專案根目錄。
pub trait Storage: Send + Sync {
    fn exists(&self, path: &Path) -> impl std::future::Future<Output = bool> + Send;
    fn ensure_dir(&self, path: &Path) -> impl std::future::Future<Output = Result<()>> + Send;
    fn write_file(
        &self,
        path: &Path,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn project_root(&self) -> &Path;
    fn json_sources(&self) -> Vec<JsonSource>;
    fn default_target_dir(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn max_greeting_count(&self) -> u32;
}

pub trait UserDirectory: Send + Sync {
    fn user_count(&self) -> impl std::future::Future<Output = Result<u64>> + Send;
}
