use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// No sheet exists for the requested (year, month).
    #[error("{0}")]
    NotFound(String),

    /// The request body or path could not be deserialized.
    #[error("{0}")]
    InvalidPayload(String),

    /// Any failure reported by the MongoDB driver. The driver's message is
    /// passed through to the client untouched.
    #[error("{0}")]
    Database(#[from] mongodb::error::Error),

    #[error("could not encode document: {0}")]
    Serialization(#[from] bson::ser::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidPayload(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Database(_) | Error::Serialization(_) | Error::Config(_) | Error::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        }
        HttpResponse::build(status).json(json!({ "detail": self.to_string() }))
    }
}
