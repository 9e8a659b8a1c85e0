pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod web;

pub use adapters::{FileUserDirectory, LocalStorage};
pub use config::AppConfig;
pub use crate::core::{
    downloader::{DownloadOptions, JsonDownloader, LutemusicCommand},
    hello::{HelloCommand, HelloOptions},
    runner::CommandRunner,
};
pub use domain::model::{CommandResult, DownloadSummary, FileOutcome};
pub use utils::error::{LuteError, Result};
