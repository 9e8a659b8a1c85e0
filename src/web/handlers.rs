use crate::core::command::CommandArgs;
use crate::domain::model::CommandResult;
use crate::web::{templates, AppState};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

fn json_error(status: StatusCode, error: &str) -> Response {
    (status, Json(json!({"success": false, "error": error}))).into_response()
}

fn header_contains(headers: &HeaderMap, name: header::HeaderName, needle: &str) -> bool {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_ascii_lowercase().contains(needle))
        .unwrap_or(false)
}

fn is_json_request(headers: &HeaderMap) -> bool {
    header_contains(headers, header::CONTENT_TYPE, "application/json")
}

fn wants_json(headers: &HeaderMap) -> bool {
    is_json_request(headers) || header_contains(headers, header::ACCEPT, "application/json")
}

fn parse_json_object(body: &[u8]) -> Result<CommandArgs, Response> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(json_error(
            StatusCode::BAD_REQUEST,
            "Request body must be a JSON object",
        )),
        Err(e) => {
            tracing::debug!("Rejecting malformed JSON body: {}", e);
            Err(json_error(StatusCode::BAD_REQUEST, "Invalid JSON"))
        }
    }
}

/// 表單的 `shout` 勾選框送出 `"on"`，JSON 則可以是布林值。
fn shout_flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "on",
        _ => false,
    }
}

pub async fn home(State(state): State<Arc<AppState>>) -> Html<String> {
    let commands: Vec<(&str, &str)> = state
        .runner
        .names()
        .into_iter()
        .map(|name| (name, state.runner.help_of(name).unwrap_or("")))
        .collect();
    Html(templates::home(&state.title, &commands))
}

pub async fn run_command_form() -> Html<String> {
    Html(templates::run_command_form())
}

pub async fn run_command_submit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let respond_json = wants_json(&headers);

    let (name, shout, count) = if is_json_request(&headers) {
        let data = match parse_json_object(&body) {
            Ok(data) => data,
            Err(response) => return response,
        };
        let name = data.get("name").cloned().unwrap_or_else(|| json!("Web User"));
        let count = data.get("count").cloned().unwrap_or_else(|| json!(1));
        (name, shout_flag(data.get("shout")), count)
    } else {
        let mut name = json!("Web User");
        let mut shout = false;
        let mut count = json!(1);
        for (key, value) in url::form_urlencoded::parse(&body) {
            match key.as_ref() {
                "name" => name = Value::String(value.into_owned()),
                "shout" => shout = value == "on",
                "count" => match value.trim().parse::<i64>() {
                    Ok(n) => count = json!(n),
                    Err(_) => {
                        let message = format!("count must be an integer (got '{}')", value);
                        return if respond_json {
                            json_error(StatusCode::BAD_REQUEST, &message)
                        } else {
                            (StatusCode::BAD_REQUEST, Html(templates::bad_request(&message)))
                                .into_response()
                        };
                    }
                },
                _ => {}
            }
        }
        (name, shout, count)
    };

    // 非字串的 name 交給指令解析後回報為指令錯誤
    let display_name = match &name {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let result = state.runner.run_hello(name, shout, count).await;

    if respond_json {
        Json(result).into_response()
    } else {
        Html(templates::command_result(&result, &display_name)).into_response()
    }
}

pub async fn api_run_command(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let data = match parse_json_object(&body) {
        Ok(data) => data,
        Err(response) => return response,
    };

    let command = data
        .get("command")
        .and_then(|v| v.as_str())
        .unwrap_or("hello")
        .to_string();

    let result: CommandResult = if command == "hello" {
        let name = data.get("name").cloned().unwrap_or_else(|| json!("API"));
        let count = data.get("count").cloned().unwrap_or_else(|| json!(1));
        state
            .runner
            .run_hello(name, shout_flag(data.get("shout")), count)
            .await
    } else {
        state.runner.run(&command, data).await
    };

    tracing::info!(
        "API command {} finished (success: {})",
        command,
        result.success
    );
    Json(result).into_response()
}

pub async fn api_method_not_allowed() -> Response {
    json_error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}
