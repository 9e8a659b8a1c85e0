use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 指令執行結果，同時作為 JSON API 的回應格式。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub message: String,
}

impl CommandResult {
    pub fn succeeded(output: String, message: impl Into<String>) -> Self {
        Self {
            success: true,
            output: Some(output),
            error: None,
            message: message.into(),
        }
    }

    pub fn failed(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            output: None,
            error: Some(error.into()),
            message: message.into(),
        }
    }
}

/// 指令的標準輸出緩衝區。CLI 直接印出，網頁層則當作字串回傳。
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    lines: Vec<String>,
}

impl CommandOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn render(&self) -> String {
        self.lines.iter().fold(String::new(), |mut acc, line| {
            acc.push_str(line);
            acc.push('\n');
            acc
        })
    }
}

/// 一個已知的遠端 JSON 檔案。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonSource {
    pub filename: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FileOutcome {
    Downloaded,
    Skipped,
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct DownloadSummary {
    pub target_dir: PathBuf,
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub total: usize,
    pub outcomes: Vec<(String, FileOutcome)>,
}

impl DownloadSummary {
    pub fn new(target_dir: PathBuf, total: usize) -> Self {
        Self {
            target_dir,
            downloaded: 0,
            skipped: 0,
            failed: 0,
            total,
            outcomes: Vec::with_capacity(total),
        }
    }

    pub fn record(&mut self, filename: &str, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Downloaded => self.downloaded += 1,
            FileOutcome::Skipped => self.skipped += 1,
            FileOutcome::Failed { .. } => self.failed += 1,
        }
        self.outcomes.push((filename.to_string(), outcome));
    }

    pub fn outcome_of(&self, filename: &str) -> Option<&FileOutcome> {
        self.outcomes
            .iter()
            .find(|(name, _)| name == filename)
            .map(|(_, outcome)| outcome)
    }

    /// 指令結束時輸出的最後一行
    pub fn message(&self) -> String {
        format!(
            "Downloaded {}/{} JSON files successfully",
            self.downloaded, self.total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_result_omits_missing_fields() {
        let ok = CommandResult::succeeded("hi\n".to_string(), "done");
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["output"], "hi\n");
        assert!(json.get("error").is_none());

        let failed = CommandResult::failed("boom", "Command failed");
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("output").is_none());
        assert_eq!(json["error"], "boom");
    }

    #[test]
    fn test_output_renders_one_line_per_entry() {
        let mut out = CommandOutput::new();
        out.write("a");
        out.write("b");
        out.write("");
        assert_eq!(out.render(), "a\nb\n\n");
        assert_eq!(out.lines()[1], "b");
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = DownloadSummary::new(PathBuf::from("data/lutemusic"), 3);
        summary.record("a.json", FileOutcome::Downloaded);
        summary.record("b.json", FileOutcome::Skipped);
        summary.record(
            "c.json",
            FileOutcome::Failed {
                reason: "404".to_string(),
            },
        );
        assert_eq!(
            (summary.downloaded, summary.skipped, summary.failed),
            (1, 1, 1)
        );
        assert_eq!(summary.outcome_of("b.json"), Some(&FileOutcome::Skipped));
        assert_eq!(summary.outcome_of("missing.json"), None);
        assert_eq!(summary.message(), "Downloaded 1/3 JSON files successfully");
    }
}
