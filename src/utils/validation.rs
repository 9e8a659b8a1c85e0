use crate::utils::error::{LuteError, Result};
use std::path::{Component, Path};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(LuteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(LuteError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(LuteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(LuteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(LuteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 只接受相對路徑，且不得包含 `..`，避免寫出資料目錄之外。
pub fn validate_relative_path(field_name: &str, path: &str) -> Result<()> {
    validate_path(field_name, path)?;

    let escapes = Path::new(path).components().any(|component| {
        !matches!(component, Component::Normal(_) | Component::CurDir)
    });
    if escapes {
        return Err(LuteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path must be relative and stay inside the data directory".to_string(),
        });
    }

    Ok(())
}

/// 檔名必須是單一路徑片段。
pub fn validate_file_name(field_name: &str, name: &str) -> Result<()> {
    validate_relative_path(field_name, name)?;
    if Path::new(name).components().count() != 1 || name == "." {
        return Err(LuteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "File name must not contain directory separators".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LuteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(LuteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("download.base_url", "https://example.com").is_ok());
        assert!(validate_url("download.base_url", "http://example.com").is_ok());
        assert!(validate_url("download.base_url", "").is_err());
        assert!(validate_url("download.base_url", "invalid-url").is_err());
        assert!(validate_url("download.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_relative_path() {
        assert!(validate_relative_path("target_dir", "lutemusic").is_ok());
        assert!(validate_relative_path("target_dir", "lute/2024").is_ok());
        assert!(validate_relative_path("target_dir", "../etc").is_err());
        assert!(validate_relative_path("target_dir", "a/../../b").is_err());
        assert!(validate_relative_path("target_dir", "/tmp").is_err());
        assert!(validate_relative_path("target_dir", "").is_err());
    }

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("download.files", "insts.json").is_ok());
        assert!(validate_file_name("download.files", "sub/insts.json").is_err());
        assert!(validate_file_name("download.files", "..").is_err());
        assert!(validate_file_name("download.files", ".").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("count", 3, 0, 100).is_ok());
        assert!(validate_range("count", 101, 0, 100).is_err());
        assert!(validate_range("count", -1, 0, 100).is_err());
    }
}
