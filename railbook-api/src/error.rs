use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use railbook_core::{ExportError, StoreError};
use railbook_ledger::LedgerError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    ValidationError(String),
    ConflictError(String),
    UpstreamError(String),
    UnavailableError(String),
    Anyhow(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::UpstreamError(msg) => {
                tracing::error!("Upstream failure: {}", msg);
                (StatusCode::BAD_GATEWAY, msg)
            }
            AppError::UnavailableError(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound(pnr) => AppError::NotFound(format!("booking not found: {}", pnr)),
            LedgerError::AlreadyCancelled(pnr) => {
                AppError::ConflictError(format!("booking already cancelled: {}", pnr))
            }
            LedgerError::Validation(msg) => AppError::ValidationError(msg),
            LedgerError::Store(store) => store.into(),
            other => AppError::Anyhow(other.into()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Remote(msg) => AppError::UpstreamError(msg),
            other => AppError::Anyhow(other.into()),
        }
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        AppError::UpstreamError(err.to_string())
    }
}
