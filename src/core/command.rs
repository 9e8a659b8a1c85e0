use crate::domain::model::CommandOutput;
use crate::utils::error::{LuteError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// 以關鍵字參數 (JSON 物件) 呼叫指令，對應網頁與 API 的呼叫方式。
pub type CommandArgs = serde_json::Map<String, serde_json::Value>;

#[async_trait]
pub trait ManagementCommand: Send + Sync {
    fn name(&self) -> &'static str;
    fn help(&self) -> &'static str;

    /// 執行指令並把輸出寫入 `output`，回傳指令的簡短結果訊息。
    async fn handle(&self, args: CommandArgs, output: &mut CommandOutput) -> Result<String>;
}

/// 把關鍵字參數解析成指令的選項結構，解析失敗屬於指令錯誤。
pub fn parse_options<T: DeserializeOwned>(command: &str, args: CommandArgs) -> Result<T> {
    serde_json::from_value(serde_json::Value::Object(args))
        .map_err(|e| LuteError::command(format!("Invalid arguments for {}: {}", command, e)))
}
