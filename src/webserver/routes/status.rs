use axum::{extract::State, response::Response, routing::get, Router};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use crate::{
    arguments::is_debug_webserver_enabled,
    config::with_config,
    logger::{self, LogTag},
    webserver::{state::AppState, utils::success_response},
};

/// Simple health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
}

/// Live bot status snapshot
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub uptime_seconds: u64,
    pub version: String,
    pub bot_name: String,
    pub codes_count: usize,
    pub active_users: usize,
    pub force_channels: Vec<String>,
}

/// Create status routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/status", get(bot_status))
}

/// GET /health
async fn health_check(State(state): State<Arc<AppState>>) -> Response {
    if is_debug_webserver_enabled() {
        logger::debug(LogTag::Webserver, "Health check endpoint called");
    }

    let response = HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        version: state.config.version.clone(),
    };

    success_response(response)
}

/// GET /status
async fn bot_status(State(state): State<Arc<AppState>>) -> Response {
    let response = StatusResponse {
        uptime_seconds: state.uptime_seconds(),
        version: state.config.version.clone(),
        bot_name: crate::global::bot_name(),
        codes_count: state.store.len(),
        active_users: state.store.active_user_count(),
        force_channels: with_config(|cfg| cfg.telegram.force_join_channels.clone()),
    };

    if is_debug_webserver_enabled() {
        logger::debug(
            LogTag::Webserver,
            &format!(
                "Status snapshot ready (uptime={}s, codes={}, users={})",
                response.uptime_seconds, response.codes_count, response.active_users
            ),
        );
    }

    success_response(response)
}
