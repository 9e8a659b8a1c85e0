use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Storage for LocalStorage {
    async fn exists(&self, path: &Path) -> bool {
        fs::try_exists(self.resolve(path)).await.unwrap_or(false)
    }

    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(self.resolve(path)).await?;
        Ok(())
    }

    async fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(full_path, data).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_relative_to_base() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());
        let path = Path::new("data/lutemusic/insts.json");

        assert!(!storage.exists(path).await);
        storage.write_file(path, b"[]").await.unwrap();

        assert!(storage.exists(path).await);
        assert_eq!(std::fs::read(temp_dir.path().join(path)).unwrap(), b"[]");
    }

    #[tokio::test]
    async fn test_write_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());
        let path = Path::new("data/names.json");

        storage.write_file(path, b"[1]").await.unwrap();
        storage.write_file(path, b"[2]").await.unwrap();

        assert_eq!(std::fs::read(temp_dir.path().join(path)).unwrap(), b"[2]");
    }

    #[tokio::test]
    async fn test_ensure_dir_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());
        let dir = Path::new("data/a/b");

        storage.ensure_dir(dir).await.unwrap();
        storage.ensure_dir(dir).await.unwrap();
        assert!(temp_dir.path().join(dir).is_dir());
    }
}
