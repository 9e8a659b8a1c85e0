use crate::adapters::{FileUserDirectory, LocalStorage};
use crate::config::AppConfig;
use crate::core::command::{CommandArgs, ManagementCommand};
use crate::core::downloader::{JsonDownloader, LutemusicCommand};
use crate::core::hello::HelloCommand;
use crate::domain::model::{CommandOutput, CommandResult};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{LuteError, Result};
use std::collections::BTreeMap;
use std::sync::Arc;

/// 以名稱呼叫管理指令，並把輸出與錯誤轉成統一的 `CommandResult`。
#[derive(Clone, Default)]
pub struct CommandRunner {
    commands: BTreeMap<&'static str, Arc<dyn ManagementCommand>>,
}

impl CommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// 註冊內建的 `hello` 與 `lutemusic` 指令。
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let users = FileUserDirectory::new(config.users_file());
        let storage = LocalStorage::new(config.project_root());
        let downloader = JsonDownloader::new(storage, config.clone())?;

        let mut runner = Self::new();
        runner.register(HelloCommand::new(users, config.max_greeting_count()));
        runner.register(LutemusicCommand::new(downloader));
        Ok(runner)
    }

    pub fn register<M: ManagementCommand + 'static>(&mut self, command: M) {
        self.commands.insert(command.name(), Arc::new(command));
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.commands.keys().copied().collect()
    }

    pub fn help_of(&self, name: &str) -> Option<&'static str> {
        self.commands.get(name).map(|command| command.help())
    }

    pub async fn execute(
        &self,
        name: &str,
        mut args: CommandArgs,
        output: &mut CommandOutput,
    ) -> Result<String> {
        let command = self
            .commands
            .get(name)
            .ok_or_else(|| LuteError::UnknownCommandError {
                name: name.to_string(),
            })?;

        args.remove("command");
        tracing::debug!("Running command {} with {} arguments", name, args.len());

        // 指令的回傳訊息也是輸出的最後一行
        let returned = command.handle(args, output).await?;
        output.write(returned.clone());
        Ok(returned)
    }

    pub async fn run(&self, name: &str, args: CommandArgs) -> CommandResult {
        self.run_with_message(name, args, format!("{} executed successfully", name))
            .await
    }

    /// `name` 與 `count` 原樣交給指令解析，型別錯誤一律回報為指令錯誤。
    pub async fn run_hello(
        &self,
        name: serde_json::Value,
        shout: bool,
        count: serde_json::Value,
    ) -> CommandResult {
        let message = format!(
            "Hello command executed successfully for {}",
            name.as_str().unwrap_or_default()
        );

        let mut args = CommandArgs::new();
        args.insert("name".to_string(), name);
        args.insert("shout".to_string(), serde_json::Value::Bool(shout));
        args.insert("count".to_string(), count);

        self.run_with_message("hello", args, message).await
    }

    async fn run_with_message(
        &self,
        name: &str,
        args: CommandArgs,
        success_message: String,
    ) -> CommandResult {
        let mut output = CommandOutput::new();

        match self.execute(name, args, &mut output).await {
            Ok(returned) => {
                tracing::debug!("Command {} returned: {}", name, returned);
                CommandResult::succeeded(output.render(), success_message)
            }
            Err(e) if e.is_command_error() => {
                tracing::error!("Command error: {}", e);
                CommandResult::failed(e.to_string(), "Command failed")
            }
            Err(e) => {
                tracing::error!("Unexpected error: {}", e);
                CommandResult::failed(e.to_string(), "Unexpected error occurred")
            }
        }
    }
}
