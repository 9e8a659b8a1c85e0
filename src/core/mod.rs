pub mod command;
pub mod downloader;
pub mod hello;
pub mod runner;

pub use crate::domain::model::{CommandOutput, CommandResult, DownloadSummary, FileOutcome};
pub use crate::domain::ports::{ConfigProvider, Storage, UserDirectory};
pub use crate::utils::error::Result;
