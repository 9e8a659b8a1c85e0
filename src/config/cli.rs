use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "lutemusic")]
#[command(about = "LuteMusic management commands and web front end")]
pub struct Cli {
    /// Path to TOML configuration file (default: ./lutemusic.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Example command that prints a greeting
    Hello(HelloArgs),

    /// LuteMusic management command with various subcommands
    Lutemusic {
        #[command(subcommand)]
        subcommand: LutemusicSubcommand,
    },

    /// Run the web interface
    Serve {
        /// Address to listen on (overrides [server] bind)
        #[arg(long)]
        bind: Option<String>,
    },
}

#[derive(Debug, Clone, Args)]
pub struct HelloArgs {
    /// Name to greet
    #[arg(long, default_value = "World")]
    pub name: String,

    /// Make the greeting LOUD
    #[arg(long)]
    pub shout: bool,

    /// Number of times to greet
    #[arg(long, default_value_t = 1)]
    pub count: u32,
}

#[derive(Debug, Clone, Subcommand)]
pub enum LutemusicSubcommand {
    /// Download JSON files and save them to data/<target-dir>/
    #[command(name = "download_json_files")]
    DownloadJsonFiles {
        /// Target directory within project data folder (default from config: lutemusic)
        #[arg(long)]
        target_dir: Option<String>,

        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hello_defaults() {
        let cli = Cli::try_parse_from(["lutemusic", "hello"]).unwrap();
        match cli.command {
            CliCommand::Hello(args) => {
                assert_eq!(args.name, "World");
                assert!(!args.shout);
                assert_eq!(args.count, 1);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_download_json_files() {
        let cli = Cli::try_parse_from([
            "lutemusic",
            "-v",
            "lutemusic",
            "download_json_files",
            "--target-dir",
            "mirror",
            "--force",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            CliCommand::Lutemusic {
                subcommand: LutemusicSubcommand::DownloadJsonFiles { target_dir, force },
            } => {
                assert_eq!(target_dir.as_deref(), Some("mirror"));
                assert!(force);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_lutemusic_requires_subcommand() {
        assert!(Cli::try_parse_from(["lutemusic", "lutemusic"]).is_err());
    }
}
