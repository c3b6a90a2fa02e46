use aide::OperationOutput;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use catalog_core::models::ErrorResponse;
use tracing::{Level, event};

/// Failures a handler reports after its input passed validation.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The referenced product does not exist
    #[error("Producto No Encontrado")]
    NotFound,
    /// Storage failed; details are logged, not returned
    #[error("Error interno del servidor")]
    Internal,
}

impl ApiError {
    /// Log a storage failure and hide it behind a generic 500.
    pub(crate) fn storage(err: impl std::fmt::Display) -> Self {
        event!(Level::ERROR, err = err.to_string());
        Self::Internal
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

impl OperationOutput for ApiError {
    type Inner = ErrorResponse;
}
