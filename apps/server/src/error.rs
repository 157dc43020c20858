use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use terravest_core::auth::AccessError;
use terravest_core::errors::{DatabaseError, Error as CoreError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("{0}")]
    Internal(String),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        ApiError::Core(CoreError::Access(err))
    }
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl ApiError {
    pub(crate) fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(e) => match e {
                CoreError::Access(AccessError::Unauthenticated) => StatusCode::UNAUTHORIZED,
                CoreError::Access(AccessError::Forbidden(_)) => StatusCode::FORBIDDEN,
                CoreError::Terms(_) | CoreError::Validation(_) => StatusCode::BAD_REQUEST,
                CoreError::InvalidTransition { .. } | CoreError::Conflict(_) => {
                    StatusCode::CONFLICT
                }
                CoreError::Database(DatabaseError::NotFound(_)) => StatusCode::NOT_FOUND,
                CoreError::Database(DatabaseError::UniqueViolation(_))
                | CoreError::Database(DatabaseError::ForeignKeyViolation(_)) => {
                    StatusCode::CONFLICT
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) | ApiError::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        let message = match &self {
            // Storage details stay in the log.
            ApiError::Core(CoreError::Database(DatabaseError::QueryFailed(_)))
            | ApiError::Core(CoreError::Database(DatabaseError::Internal(_))) => {
                "Internal database error".to_string()
            }
            other => other.to_string(),
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
