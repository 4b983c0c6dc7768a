/// Shared response helpers for API routes
///
/// Every JSON endpoint answers with the same envelope so clients can
/// branch on `success` without inspecting status codes.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

/// 200 envelope: {"success": true, "data": ...}
pub fn success_response<T: Serialize>(data: T) -> Response {
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": data,
        })),
    )
        .into_response()
}

/// Error envelope: {"success": false, "error": "..."}
pub fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({
            "success": false,
            "error": message,
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response_status() {
        let response = success_response(json!({"n": 1}));
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_error_response_status() {
        let response = error_response(StatusCode::UNAUTHORIZED, "invalid secret");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
