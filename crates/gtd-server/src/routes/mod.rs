pub mod actions;
pub mod lists;
pub mod projects;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gtd_core::ServiceResult;
use serde::Serialize;

/// Render a service outcome: `Ok` is a 200 with the payload, not-found a
/// 404 with the message and, for updates, the caller's input.
pub fn respond<T: Serialize>(result: ServiceResult<T>) -> Response {
    match result {
        ServiceResult::Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        ServiceResult::EntityNotFound { message, payload } => not_found(message, payload),
    }
}

/// Like `respond`, for operations without a payload.
pub fn respond_empty(result: ServiceResult) -> Response {
    match result {
        ServiceResult::Ok(()) => {
            (StatusCode::OK, Json(serde_json::json!({ "ok": true }))).into_response()
        }
        ServiceResult::EntityNotFound { message, .. } => not_found::<()>(message, None),
    }
}

/// `payload` is left out of the body when there is none.
#[derive(Serialize)]
struct NotFoundBody<T> {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<T>,
}

fn not_found<T: Serialize>(message: Option<String>, payload: Option<T>) -> Response {
    let body = NotFoundBody {
        error: message.unwrap_or_else(|| "Entity not found.".to_string()),
        payload,
    };
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}
