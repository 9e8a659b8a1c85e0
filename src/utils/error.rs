use thiserror::Error;

#[derive(Error, Debug)]
pub enum LuteError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid JSON in {filename}: {source}")]
    InvalidJsonError {
        filename: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown command: {name}")]
    UnknownCommandError { name: String },

    #[error("{message}")]
    CommandError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    FileSystem,
    Data,
    Configuration,
    Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LuteError {
    pub fn command(message: impl Into<String>) -> Self {
        Self::CommandError {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HttpError(_) => ErrorCategory::Network,
            Self::IoError(_) => ErrorCategory::FileSystem,
            Self::SerializationError(_) | Self::InvalidJsonError { .. } => ErrorCategory::Data,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::UnknownCommandError { .. } | Self::CommandError { .. } => ErrorCategory::Command,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Command => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::FileSystem => ErrorSeverity::Critical,
        }
    }

    /// 指令層級的錯誤 (參數錯誤、未知指令) 對應到 "Command failed"，
    /// 其餘錯誤對應到 "Unexpected error occurred"。
    pub fn is_command_error(&self) -> bool {
        matches!(
            self,
            Self::CommandError { .. }
                | Self::UnknownCommandError { .. }
                | Self::InvalidConfigValueError { .. }
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "檢查網路連線與遠端網址是否可連線，然後重試",
            ErrorCategory::FileSystem => "確認資料目錄存在且具有寫入權限",
            ErrorCategory::Data => "遠端檔案內容不是有效的 JSON，請稍後再試或回報來源網站",
            ErrorCategory::Configuration => "檢查 lutemusic.toml 與命令列參數",
            ErrorCategory::Command => "使用 --help 查看可用的指令與參數",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::HttpError(e) => format!("無法連線到遠端伺服器: {}", e),
            Self::IoError(e) => format!("檔案系統錯誤: {}", e),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("設定值 '{}' 無效: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LuteError>;
