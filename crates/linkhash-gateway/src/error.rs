use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use linkhash_core::{CoreError, ShortenerError};
use tracing::error;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    /// The request could not be understood before reaching the shortener.
    BadRequest(String),
    Shortener(ShortenerError),
    /// The gateway failed to build a response.
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Shortener(err) => match err {
                ShortenerError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
                ShortenerError::NotFound(_) => StatusCode::NOT_FOUND,
                ShortenerError::KeySpaceExhausted { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                ShortenerError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            },
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::BadRequest(message) | AppError::Internal(message) => message.clone(),
            AppError::Shortener(err) => err.to_string(),
        }
    }
}

impl From<ShortenerError> for AppError {
    fn from(value: ShortenerError) -> Self {
        Self::Shortener(value)
    }
}

impl From<CoreError> for AppError {
    fn from(value: CoreError) -> Self {
        Self::Shortener(value.into())
    }
}

impl From<JsonRejection> for AppError {
    fn from(value: JsonRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl From<askama::Error> for AppError {
    fn from(value: askama::Error) -> Self {
        Self::Internal(format!("failed to render page: {value}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        if status.is_server_error() {
            error!(status = %status, error = %message, "request failed");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
