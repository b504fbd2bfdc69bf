use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gtd_core::GtdError;

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if let Some(e) = self.0.downcast_ref::<GtdError>() {
            match e {
                GtdError::EntityNotFound(_) => StatusCode::NOT_FOUND,
                GtdError::RuleViolation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                GtdError::NotInitialized => StatusCode::BAD_REQUEST,
                GtdError::StoreLocked(_) => StatusCode::SERVICE_UNAVAILABLE,
                GtdError::Store(_) | GtdError::Io(_) | GtdError::Yaml(_) | GtdError::Json(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
        } else if self.0.downcast_ref::<JsonRejection>().is_some() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// `Json` whose rejection is reported as a 400 with the usual
/// `{ "error": ... }` body.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
