use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::logger::{self, LogTag};
use crate::telegram::{notifier, Notification};
use crate::webserver::state::AppState;
use crate::webserver::utils::{error_response, success_response};

// =============================================================================
// REQUEST / RESPONSE TYPES
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct SecretPayload {
    pub secret: String,
}

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub accepted: bool,
    pub message: String,
}

/// Create system routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/restart", post(request_restart))
        .route("/open", post(request_open))
}

// =============================================================================
// ROUTE HANDLERS
// =============================================================================

/// POST /restart
///
/// Placeholder action: nothing is restarted, the request is only
/// acknowledged and relayed to the admins.
async fn request_restart(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SecretPayload>,
) -> Response {
    if !secret_matches(&state, &payload.secret) {
        return error_response(StatusCode::UNAUTHORIZED, "Invalid secret");
    }

    logger::info(LogTag::Webserver, "Restart requested via web API");
    notifier::queue_notification(Notification::WebEvent {
        text: "🔄 Restart requested via the web panel".to_string(),
    });

    success_response(ActionResponse {
        accepted: true,
        message: "Restart request recorded".to_string(),
    })
}

/// POST /open
///
/// Placeholder action mirroring the panel's "open" button.
async fn request_open(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SecretPayload>,
) -> Response {
    if !secret_matches(&state, &payload.secret) {
        return error_response(StatusCode::UNAUTHORIZED, "Invalid secret");
    }

    logger::info(LogTag::Webserver, "Open requested via web API");
    notifier::queue_notification(Notification::WebEvent {
        text: "🔓 Open requested via the web panel".to_string(),
    });

    success_response(ActionResponse {
        accepted: true,
        message: "Open request recorded".to_string(),
    })
}

/// An unset secret disables the action endpoints entirely
fn secret_matches(state: &AppState, provided: &str) -> bool {
    let expected = &state.config.web_secret;
    !expected.is_empty() && provided == expected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WebserverConfig;
    use crate::store::CodeStore;

    fn state_with_secret(secret: &str) -> AppState {
        AppState::new(
            WebserverConfig {
                web_secret: secret.to_string(),
                version: "0.0.0-test".to_string(),
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            Arc::new(CodeStore::new()),
        )
    }

    #[test]
    fn test_secret_matches() {
        let state = state_with_secret("hunter2");
        assert!(secret_matches(&state, "hunter2"));
        assert!(!secret_matches(&state, "hunter3"));
        assert!(!secret_matches(&state, ""));
    }

    #[test]
    fn test_empty_secret_disables_actions() {
        let state = state_with_secret("");
        assert!(!secret_matches(&state, ""));
        assert!(!secret_matches(&state, "anything"));
    }
}
