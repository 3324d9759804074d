use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use simvest_core::EngineError;

/// Boundary error: maps engine kinds and plumbing failures onto HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    Unavailable,
    BadRequest(String),
    Engine(EngineError),
    Internal(anyhow::Error),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        ApiError::Engine(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

pub fn engine_status(err: &EngineError) -> StatusCode {
    match err {
        EngineError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
        EngineError::ClientNotFound(_) | EngineError::ProductNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::Repository(_) | EngineError::PersistenceFailure { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "database unavailable".to_string(),
            ),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Engine(err) => {
                let status = engine_status(&err);
                if status.is_server_error() {
                    tracing::error!(error = %err, "engine failure");
                    sentry_anyhow::capture_anyhow(&anyhow::Error::new(err));
                    (status, "internal error".to_string())
                } else {
                    (status, err.to_string())
                }
            }
            ApiError::Internal(err) => {
                tracing::error!(error = ?err, "request failed");
                sentry_anyhow::capture_anyhow(&err);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_kinds_map_to_statuses() {
        assert_eq!(
            engine_status(&EngineError::InvalidParameter("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            engine_status(&EngineError::ClientNotFound(1)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            engine_status(&EngineError::ProductNotFound("CDB".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            engine_status(&EngineError::Repository(anyhow::anyhow!("down"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn client_errors_keep_their_reason() {
        let response =
            ApiError::Engine(EngineError::InvalidParameter("principal is required".into()))
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::Unavailable.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
