use crate::domain::model::JsonSource;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{LuteError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "lutemusic.toml";
pub const DEFAULT_BASE_URL: &str = "https://www.lutemusic.org";
pub const DEFAULT_FILES: [&str; 4] = ["insts.json", "types.json", "settings.json", "names.json"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub project: ProjectConfig,
    pub download: DownloadConfig,
    pub server: ServerConfig,
    pub users: UsersConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub root: PathBuf,
    pub title: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            title: "🎵 LuteMusic".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    pub base_url: String,
    pub files: Vec<String>,
    pub target_dir: String,
    pub timeout_seconds: u64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            files: DEFAULT_FILES.iter().map(|f| f.to_string()).collect(),
            target_dir: "lutemusic".to_string(),
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub max_greeting_count: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
            max_greeting_count: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UsersConfig {
    /// 相對於 `<root>/data`
    pub file: String,
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self {
            file: "users.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: "compact".to_string(),
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LuteError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| LuteError::config(format!("TOML parsing error: {}", e)))
    }

    /// 指定的檔案必須存在；未指定時，預設檔案不存在就使用內建預設值。
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                Self::from_file(path)
            }
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                tracing::debug!("Loading configuration from {}", DEFAULT_CONFIG_FILE);
                Self::from_file(DEFAULT_CONFIG_FILE)
            }
            None => {
                tracing::debug!("No {} found, using built-in defaults", DEFAULT_CONFIG_FILE);
                Ok(Self::default())
            }
        }
    }

    /// 替換環境變數 (例如 ${LUTEMUSIC_ROOT})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| LuteError::config(format!("Invalid placeholder pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 使用者檔案的完整路徑
    pub fn users_file(&self) -> PathBuf {
        self.project.root.join("data").join(&self.users.file)
    }
}

impl ConfigProvider for AppConfig {
    fn project_root(&self) -> &Path {
        &self.project.root
    }

    fn json_sources(&self) -> Vec<JsonSource> {
        let base = self.download.base_url.trim_end_matches('/');
        self.download
            .files
            .iter()
            .map(|filename| JsonSource {
                filename: filename.clone(),
                url: format!("{}/{}", base, filename),
            })
            .collect()
    }

    fn default_target_dir(&self) -> &str {
        &self.download.target_dir
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.download.timeout_seconds)
    }

    fn max_greeting_count(&self) -> u32 {
        self.server.max_greeting_count
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("project.root", &self.project.root.to_string_lossy())?;
        validation::validate_url("download.base_url", &self.download.base_url)?;
        validation::validate_relative_path("download.target_dir", &self.download.target_dir)?;
        validation::validate_range(
            "download.timeout_seconds",
            self.download.timeout_seconds,
            1,
            600,
        )?;

        if self.download.files.is_empty() {
            return Err(LuteError::InvalidConfigValueError {
                field: "download.files".to_string(),
                value: "[]".to_string(),
                reason: "At least one file is required".to_string(),
            });
        }
        for file in &self.download.files {
            validation::validate_file_name("download.files", file)?;
        }

        validation::validate_non_empty_string("server.bind", &self.server.bind)?;
        validation::validate_relative_path("users.file", &self.users.file)?;

        let valid_formats = ["compact", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(LuteError::InvalidConfigValueError {
                field: "logging.format".to_string(),
                value: self.logging.format.clone(),
                reason: format!("Unsupported format. Valid formats: {}", valid_formats.join(", ")),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_lutemusic_site() {
        let config = AppConfig::default();
        let sources = config.json_sources();

        assert_eq!(sources.len(), 4);
        assert_eq!(sources[0].filename, "insts.json");
        assert_eq!(sources[0].url, "https://www.lutemusic.org/insts.json");
        assert_eq!(sources[3].url, "https://www.lutemusic.org/names.json");
        assert_eq!(config.default_target_dir(), "lutemusic");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml_config() {
        let toml_content = r#"
[project]
root = "/srv/lutemusic"

[download]
base_url = "http://localhost:9000/"
files = ["insts.json"]
timeout_seconds = 5
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.project_root(), Path::new("/srv/lutemusic"));
        assert_eq!(config.json_sources()[0].url, "http://localhost:9000/insts.json");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.server.max_greeting_count, 100);
        assert_eq!(config.project.title, "🎵 LuteMusic");
        assert_eq!(
            config.users_file(),
            PathBuf::from("/srv/lutemusic/data/users.json")
        );
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("LUTEMUSIC_TEST_BASE_URL", "https://mirror.example.org");

        let toml_content = r#"
[download]
base_url = "${LUTEMUSIC_TEST_BASE_URL}"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.download.base_url, "https://mirror.example.org");

        std::env::remove_var("LUTEMUSIC_TEST_BASE_URL");
    }

    #[test]
    fn test_config_validation() {
        let bad_url =
            AppConfig::from_toml_str("[download]\nbase_url = \"invalid-url\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let bad_dir =
            AppConfig::from_toml_str("[download]\ntarget_dir = \"../outside\"\n").unwrap();
        assert!(bad_dir.validate().is_err());

        let bad_format = AppConfig::from_toml_str("[logging]\nformat = \"xml\"\n").unwrap();
        assert!(bad_format.validate().is_err());

        let no_files = AppConfig::from_toml_str("[download]\nfiles = []\n").unwrap();
        assert!(no_files.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml_str("[download\n").unwrap_err();
        assert!(matches!(err, LuteError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nbind = \"0.0.0.0:9999\"\nmax_greeting_count = 5\n")
            .unwrap();

        let config = AppConfig::load(Some(temp_file.path())).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:9999");
        assert_eq!(config.max_greeting_count(), 5);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let result = AppConfig::load(Some(Path::new("/nonexistent/lutemusic.toml")));
        assert!(matches!(result, Err(LuteError::IoError(_))));
    }
}
