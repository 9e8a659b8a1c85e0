use crate::core::command::{parse_options, CommandArgs, ManagementCommand};
use crate::domain::model::{CommandOutput, DownloadSummary, FileOutcome, JsonSource};
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::{LuteError, Result};
use crate::utils::validation::validate_relative_path;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DOWNLOAD_JSON_FILES: &str = "download_json_files";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DownloadOptions {
    /// 未指定時使用設定檔的 `download.target_dir`
    #[serde(default)]
    pub target_dir: Option<String>,
    #[serde(default)]
    pub force: bool,
}

/// `lutemusic` 指令的關鍵字參數，`subcommand` 為必填。
#[derive(Debug, Clone, Deserialize)]
struct LutemusicOptions {
    subcommand: Option<String>,
    #[serde(flatten)]
    download: DownloadOptions,
}

/// 先以 UTF-8 解碼，失敗時改用 Latin-1 (每個位元組即一個碼位)。
/// 第二個回傳值表示是否經過轉換。
pub fn decode_text(data: Vec<u8>) -> (String, bool) {
    match String::from_utf8(data) {
        Ok(text) => (text, false),
        Err(e) => (e.into_bytes().iter().map(|&b| char::from(b)).collect(), true),
    }
}

pub struct JsonDownloader<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> JsonDownloader<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout()).build()?;
        Ok(Self {
            storage,
            config,
            client,
        })
    }

    /// 依序下載每個來源；單一檔案失敗只記錄並繼續。
    pub async fn download_json_files(
        &self,
        options: &DownloadOptions,
        output: &mut CommandOutput,
    ) -> Result<DownloadSummary> {
        let target_dir_name = options
            .target_dir
            .as_deref()
            .unwrap_or_else(|| self.config.default_target_dir());
        validate_relative_path("target_dir", target_dir_name)
            .map_err(|e| LuteError::command(e.to_string()))?;

        let relative_dir = Path::new("data").join(target_dir_name);
        let target_dir = self.config.project_root().join(&relative_dir);

        self.storage.ensure_dir(&relative_dir).await?;
        output.write(format!("Downloading JSON files to: {}", target_dir.display()));

        let sources = self.config.json_sources();
        let mut summary = DownloadSummary::new(target_dir.clone(), sources.len());

        for source in &sources {
            let relative_file = relative_dir.join(&source.filename);

            if self.storage.exists(&relative_file).await && !options.force {
                output.write(format!(
                    "File {} already exists. Use --force to overwrite.",
                    source.filename
                ));
                tracing::debug!("Skipping existing file {}", relative_file.display());
                summary.record(&source.filename, FileOutcome::Skipped);
                continue;
            }

            let outcome = match self.fetch_and_save(source, &relative_file, output).await {
                Ok(()) => {
                    output.write(format!(
                        "Downloaded and saved {} to {}",
                        source.filename,
                        target_dir.display()
                    ));
                    tracing::info!(
                        "📥 Downloaded {} from {} to {}",
                        source.filename,
                        source.url,
                        target_dir.join(&source.filename).display()
                    );
                    FileOutcome::Downloaded
                }
                Err(e) => {
                    let reason = Self::describe_failure(source, &target_dir, &e);
                    output.write(reason.clone());
                    tracing::warn!("⚠️ {}", reason);
                    FileOutcome::Failed { reason }
                }
            };
            summary.record(&source.filename, outcome);
        }

        output.write(String::new());
        output.write(format!(
            "Completed: {}/{} files downloaded successfully",
            summary.downloaded, summary.total
        ));
        if summary.failed > 0 {
            output.write(format!(
                "Errors: {} files failed to download",
                summary.failed
            ));
        }
        if summary.skipped > 0 {
            output.write(format!("Skipped: {} existing files", summary.skipped));
        }

        Ok(summary)
    }

    async fn fetch_and_save(
        &self,
        source: &JsonSource,
        relative_file: &Path,
        output: &mut CommandOutput,
    ) -> Result<()> {
        output.write(format!("Downloading {} from {}...", source.filename, source.url));

        let data = self.fetch(&source.url).await?;
        tracing::debug!("Fetched {} bytes from {}", data.len(), source.url);

        let (text, converted) = decode_text(data);
        if converted {
            output.write(format!(
                "Encoding of {} is not UTF-8. Converting to UTF-8.",
                source.filename
            ));
        }

        serde_json::from_str::<serde_json::Value>(&text).map_err(|source_err| {
            LuteError::InvalidJsonError {
                filename: source.filename.clone(),
                source: source_err,
            }
        })?;

        self.storage.write_file(relative_file, text.as_bytes()).await
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }

    fn describe_failure(source: &JsonSource, target_dir: &Path, error: &LuteError) -> String {
        match error {
            LuteError::HttpError(e) => format!("Failed to download {}: {}", source.url, e),
            LuteError::IoError(e) => format!(
                "Failed to save {} to {}: {}",
                source.filename,
                target_dir.display(),
                e
            ),
            LuteError::InvalidJsonError { .. } => error.to_string(),
            other => format!("Unexpected error with {}: {}", source.filename, other),
        }
    }
}

/// `lutemusic <subcommand>`：目前只有 `download_json_files`。
pub struct LutemusicCommand<S: Storage, C: ConfigProvider> {
    downloader: JsonDownloader<S, C>,
}

impl<S: Storage, C: ConfigProvider> LutemusicCommand<S, C> {
    pub fn new(downloader: JsonDownloader<S, C>) -> Self {
        Self { downloader }
    }
}

#[async_trait]
impl<S: Storage + 'static, C: ConfigProvider + 'static> ManagementCommand
    for LutemusicCommand<S, C>
{
    fn name(&self) -> &'static str {
        "lutemusic"
    }

    fn help(&self) -> &'static str {
        "LuteMusic management command with various subcommands"
    }

    async fn handle(&self, args: CommandArgs, output: &mut CommandOutput) -> Result<String> {
        let options: LutemusicOptions = parse_options(self.name(), args)?;

        match options.subcommand.as_deref() {
            Some(DOWNLOAD_JSON_FILES) => {
                let summary = self
                    .downloader
                    .download_json_files(&options.download, output)
                    .await?;
                Ok(summary.message())
            }
            Some(other) => Err(LuteError::command(format!("Unknown subcommand: {}", other))),
            None => Err(LuteError::command(
                "the following arguments are required: subcommand",
            )),
        }
    }
}
