//! Service error taxonomy and its HTTP mapping.

use axum::{http::StatusCode, Json};
use sea_orm::DbErr;
use thiserror::Error;

use crate::models::common::ErrorResponse;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed or out-of-range client input; nothing was written.
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Database(#[from] DbErr),
    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error half of every handler's return type.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Database(_) | ServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let status = err.status();
        let error = if status.is_server_error() {
            // Detail stays in the logs
            tracing::error!("Request failed: {}", err);
            "Internal server error".to_string()
        } else {
            err.to_string()
        };

        (status, Json(ErrorResponse { error }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_hide_detail() {
        let (status, Json(body)) =
            ApiError::from(ServiceError::Database(DbErr::Custom(
                "connection reset by peer".into(),
            )));

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Internal server error");
    }

    #[test]
    fn client_errors_keep_reason() {
        let (status, Json(body)) = ApiError::from(
            ServiceError::Conflict("Email already registered".into()),
        );

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.error, "Email already registered");
    }
}
