#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{Cli, CliCommand, HelloArgs, LutemusicSubcommand};
pub use toml_config::AppConfig;
