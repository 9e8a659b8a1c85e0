use crate::core::command::{parse_options, CommandArgs, ManagementCommand};
use crate::domain::model::CommandOutput;
use crate::domain::ports::UserDirectory;
use crate::utils::error::{LuteError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HelloOptions {
    pub name: String,
    pub shout: bool,
    /// 以有號整數接收，負數屬於指令錯誤
    pub count: i64,
}

impl Default for HelloOptions {
    fn default() -> Self {
        Self {
            name: "World".to_string(),
            shout: false,
            count: 1,
        }
    }
}

pub struct HelloCommand<U: UserDirectory> {
    users: U,
    max_count: u32,
}

impl<U: UserDirectory> HelloCommand<U> {
    pub fn new(users: U, max_count: u32) -> Self {
        Self { users, max_count }
    }

    pub fn greeting(name: &str, user_count: u64, shout: bool) -> String {
        let greeting = format!(
            "Hello, {}! You have {} users in the database.",
            name, user_count
        );
        if shout {
            greeting.to_uppercase()
        } else {
            greeting
        }
    }

    pub async fn greet(
        &self,
        options: &HelloOptions,
        output: &mut CommandOutput,
    ) -> Result<String> {
        if options.count < 0 || options.count > i64::from(self.max_count) {
            return Err(LuteError::command(format!(
                "count must be between 0 and {} (got {})",
                self.max_count, options.count
            )));
        }

        let user_count = self.users.user_count().await?;
        let greeting = Self::greeting(&options.name, user_count, options.shout);

        for _ in 0..options.count {
            output.write(greeting.clone());
        }

        tracing::info!("Greeted {} {} times", options.name, options.count);
        Ok(format!("Greeted {} successfully!", options.name))
    }
}

#[async_trait]
impl<U: UserDirectory + 'static> ManagementCommand for HelloCommand<U> {
    fn name(&self) -> &'static str {
        "hello"
    }

    fn help(&self) -> &'static str {
        "Example command that demonstrates management command patterns"
    }

    async fn handle(&self, args: CommandArgs, output: &mut CommandOutput) -> Result<String> {
        let options: HelloOptions = parse_options(self.name(), args)?;
        self.greet(&options, output).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedUsers(u64);

    impl UserDirectory for FixedUsers {
        async fn user_count(&self) -> Result<u64> {
            Ok(self.0)
        }
    }

    struct BrokenUsers;

    impl UserDirectory for BrokenUsers {
        async fn user_count(&self) -> Result<u64> {
            Err(LuteError::config("user table unavailable"))
        }
    }

    fn options(name: &str, shout: bool, count: i64) -> HelloOptions {
        HelloOptions {
            name: name.to_string(),
            shout,
            count,
        }
    }

    #[tokio::test]
    async fn test_greets_count_times() {
        let command = HelloCommand::new(FixedUsers(2), 100);
        let mut output = CommandOutput::new();

        let message = command
            .greet(&options("Lute", false, 3), &mut output)
            .await
            .unwrap();

        assert_eq!(message, "Greeted Lute successfully!");
        assert_eq!(output.lines().len(), 3);
        for line in output.lines() {
            assert_eq!(line, "Hello, Lute! You have 2 users in the database.");
        }
    }

    #[tokio::test]
    async fn test_shout_uppercases_whole_line() {
        let command = HelloCommand::new(FixedUsers(7), 100);
        let mut output = CommandOutput::new();

        command
            .greet(&options("Dowland", true, 1), &mut output)
            .await
            .unwrap();

        assert_eq!(
            output.render(),
            "HELLO, DOWLAND! YOU HAVE 7 USERS IN THE DATABASE.\n"
        );
    }

    #[tokio::test]
    async fn test_zero_count_emits_nothing() {
        let command = HelloCommand::new(FixedUsers(0), 100);
        let mut output = CommandOutput::new();

        assert!(command
            .greet(&options("x", false, 0), &mut output)
            .await
            .is_ok());
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn test_count_out_of_range_is_command_error() {
        let command = HelloCommand::new(FixedUsers(0), 10);
        let mut output = CommandOutput::new();

        let err = command
            .greet(&options("x", false, 11), &mut output)
            .await
            .unwrap_err();
        assert!(err.is_command_error());
        let err = command
            .greet(&options("x", false, -1), &mut output)
            .await
            .unwrap_err();
        assert!(err.is_command_error());
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn test_user_lookup_failure_propagates() {
        let command = HelloCommand::new(BrokenUsers, 10);
        let mut output = CommandOutput::new();

        let err = command
            .greet(&options("x", false, 1), &mut output)
            .await
            .unwrap_err();
        assert!(!err.is_command_error());
    }

    #[tokio::test]
    async fn test_handle_parses_keyword_arguments() {
        let command = HelloCommand::new(FixedUsers(1), 100);
        let mut output = CommandOutput::new();
        let args = serde_json::json!({"name": "API", "shout": true, "count": 2});
        let args = args.as_object().cloned().unwrap();

        command.handle(args, &mut output).await.unwrap();

        assert_eq!(output.lines().len(), 2);
        assert!(output.lines()[0].starts_with("HELLO, API!"));
    }
}
