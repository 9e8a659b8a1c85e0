use anyhow::Context;
use clap::Parser;
use std::net::SocketAddr;
use lutemusic::config::{Cli, CliCommand, HelloArgs, LutemusicSubcommand};
use lutemusic::core::ConfigProvider;
use lutemusic::domain::model::CommandOutput;
use lutemusic::utils::error::{ErrorSeverity, LuteError};
use lutemusic::utils::{logger, validation::Validate};
use lutemusic::web::{self, AppState};
use lutemusic::{
    AppConfig, CommandRunner, DownloadOptions, FileUserDirectory, HelloCommand, HelloOptions,
    JsonDownloader, LocalStorage,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 載入配置
    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    match &cli.command {
        CliCommand::Serve { .. } => {
            logger::init_server_logger(cli.verbose, &config.logging.format)
        }
        _ => logger::init_cli_logger(cli.verbose),
    }
    tracing::debug!("Configuration: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with_error(&e);
    }

    match cli.command {
        CliCommand::Hello(args) => run_hello(&config, args).await,
        CliCommand::Lutemusic {
            subcommand: LutemusicSubcommand::DownloadJsonFiles { target_dir, force },
        } => run_download(config, DownloadOptions { target_dir, force }).await,
        CliCommand::Serve { bind } => serve(config, bind).await?,
    }

    Ok(())
}

fn print_output(output: &CommandOutput) {
    print!("{}", output.render());
}

async fn run_hello(config: &AppConfig, args: HelloArgs) {
    let command = HelloCommand::new(
        FileUserDirectory::new(config.users_file()),
        config.max_greeting_count(),
    );
    let options = HelloOptions {
        name: args.name,
        shout: args.shout,
        count: i64::from(args.count),
    };

    let mut output = CommandOutput::new();
    let result = command.greet(&options, &mut output).await;
    if let Ok(message) = &result {
        output.write(message.clone());
    }
    print_output(&output);

    if let Err(e) = result {
        exit_with_error(&e);
    }
}

async fn run_download(config: AppConfig, options: DownloadOptions) {
    let storage = LocalStorage::new(config.project_root());
    let downloader = match JsonDownloader::new(storage, config) {
        Ok(downloader) => downloader,
        Err(e) => exit_with_error(&e),
    };

    let mut output = CommandOutput::new();
    let result = downloader.download_json_files(&options, &mut output).await;
    if let Ok(summary) = &result {
        output.write(summary.message());
    }
    print_output(&output);

    match result {
        Ok(summary) => {
            tracing::info!(
                "✅ Downloaded {}/{} JSON files ({} skipped, {} failed)",
                summary.downloaded,
                summary.total,
                summary.skipped,
                summary.failed
            );
            if summary.failed > 0 {
                std::process::exit(2);
            }
        }
        Err(e) => exit_with_error(&e),
    }
}

async fn serve(config: AppConfig, bind: Option<String>) -> anyhow::Result<()> {
    let bind = bind.unwrap_or_else(|| config.server.bind.clone());
    let addr = bind
        .parse::<SocketAddr>()
        .with_context(|| format!("invalid bind address '{}'", bind))?;

    let runner = CommandRunner::from_config(&config).context("failed to set up commands")?;
    let state = AppState::new(runner, config.project.title.clone());

    tracing::info!("🚀 Starting LuteMusic web interface");
    web::serve(state, addr).await.context("web server failed")?;
    Ok(())
}

fn exit_with_error(e: &LuteError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );

    // 輸出用戶友好的錯誤信息
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
