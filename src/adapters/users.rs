use crate::domain::ports::UserDirectory;
use crate::utils::error::{LuteError, Result};
use std::path::PathBuf;

/// 從 JSON 陣列檔案讀取使用者清單，只用來計數。檔案不存在時視為零位使用者。
#[derive(Debug, Clone)]
pub struct FileUserDirectory {
    path: PathBuf,
}

impl FileUserDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl UserDirectory for FileUserDirectory {
    async fn user_count(&self) -> Result<u64> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    "User file {} not found, counting 0 users",
                    self.path.display()
                );
                return Ok(0);
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<serde_json::Value>(&content)? {
            serde_json::Value::Array(users) => Ok(users.len() as u64),
            _ => Err(LuteError::config(format!(
                "User file {} must contain a JSON array",
                self.path.display()
            ))),
        }
    }
}
