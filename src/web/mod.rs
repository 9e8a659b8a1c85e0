pub mod handlers;
pub mod templates;

use crate::core::runner::CommandRunner;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub runner: CommandRunner,
    pub title: String,
}

impl AppState {
    pub fn new(runner: CommandRunner, title: impl Into<String>) -> Self {
        Self {
            runner,
            title: title.into(),
        }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route(
            "/run-command/",
            get(handlers::run_command_form).post(handlers::run_command_submit),
        )
        .route(
            "/api/run-command/",
            post(handlers::api_run_command).fallback(handlers::api_method_not_allowed),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(state: AppState, addr: SocketAddr) -> std::io::Result<()> {
    let app = build_router(Arc::new(state));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🌐 Web interface listening on http://{}", addr);
    axum::serve(listener, app).await
}
