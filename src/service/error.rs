use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

use crate::error::{ErrorMessage, HttpError};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("User {0} not found")]
    UserNotFound(Uuid),

    #[error("Project {0} not found")]
    ProjectNotFound(Uuid),

    #[error("Project {0} has been deleted")]
    ProjectDeleted(Uuid),

    #[error("Chat {0} not found")]
    ChatNotFound(Uuid),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Email or password is wrong")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl From<ErrorMessage> for ServiceError {
    fn from(err: ErrorMessage) -> Self {
        match err {
            ErrorMessage::EmptyPassword | ErrorMessage::ExceededMaxPasswordLength(_) => {
                ServiceError::Validation(err.to_string())
            }
            _ => ServiceError::Other(err.to_string()),
        }
    }
}

impl ServiceError {
    pub fn forbidden(message: impl Into<String>) -> Self {
        ServiceError::Forbidden(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::UserNotFound(_)
            | ServiceError::ProjectNotFound(_)
            | ServiceError::ChatNotFound(_) => StatusCode::NOT_FOUND,

            ServiceError::ProjectDeleted(_) => StatusCode::GONE,

            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,

            ServiceError::Conflict(_) => StatusCode::CONFLICT,

            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,

            ServiceError::InvalidCredentials => StatusCode::UNAUTHORIZED,

            ServiceError::Database(_) | ServiceError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        let status = error.status_code();
        match error {
            ServiceError::Database(_) | ServiceError::Other(_) => {
                tracing::error!("request failed: {}", error);
                HttpError::server_error(ErrorMessage::ServerError.to_string())
            }
            ServiceError::UserNotFound(_) => HttpError::new("User not found", status),
            ServiceError::ProjectNotFound(_) => HttpError::new("Project not found", status),
            ServiceError::ProjectDeleted(_) => HttpError::new("Project has been deleted", status),
            ServiceError::ChatNotFound(_) => HttpError::new("Chat not found", status),
            _ => HttpError::new(error.to_string(), status),
        }
    }
}
