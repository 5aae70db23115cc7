use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ErrorBody;
use crate::domain::validation::InvalidInput;
use crate::services::TreasureError;

/// Failure category carried in the extensions of every error response, so
/// request logging and metrics can label outcomes without reading bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    NotFound,
    RouteNotFound,
    Timeout,
    Database,
    Internal,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Conflict => "conflict",
            Self::NotFound => "not_found",
            Self::RouteNotFound => "route_not_found",
            Self::Timeout => "timeout",
            Self::Database => "database",
            Self::Internal => "internal",
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    DatabaseError(String),

    ValidationError(String),

    Conflict(String),

    Timeout(u64),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::ValidationError(msg) => write!(f, "Validation error: {msg}"),
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::Timeout(secs) => write!(f, "Timed out after {secs}s"),
            Self::InternalError(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            // Duplicates are a client error with the same status as validation.
            Self::ValidationError(msg) | Self::Conflict(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            Self::Timeout(secs) => {
                tracing::warn!("Request timed out after {}s", secs);
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "The request took too long to complete".to_string(),
                )
            }
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::DatabaseError(_) => ErrorKind::Database,
            Self::ValidationError(_) => ErrorKind::Validation,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Timeout(_) => ErrorKind::Timeout,
            Self::InternalError(_) => ErrorKind::Internal,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        let body = ErrorBody {
            message,
            status_code: status.as_u16(),
        };
        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(self.kind());
        response
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(format!("{err:#}"))
    }
}

impl From<InvalidInput> for ApiError {
    fn from(err: InvalidInput) -> Self {
        Self::ValidationError(err.0)
    }
}

impl From<TreasureError> for ApiError {
    fn from(err: TreasureError) -> Self {
        match err {
            TreasureError::InvalidInput(msg) => Self::ValidationError(msg),
            TreasureError::Conflict(msg) => Self::Conflict(msg),
            TreasureError::NotFound(msg) => Self::NotFound(msg),
            TreasureError::Timeout(secs) => Self::Timeout(secs),
            TreasureError::Database(msg) => Self::DatabaseError(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_treasure_error_status_mapping() {
        let cases = [
            (TreasureError::InvalidInput("bad".into()), StatusCode::BAD_REQUEST),
            (TreasureError::Conflict("dup".into()), StatusCode::BAD_REQUEST),
            (TreasureError::NotFound("gone".into()), StatusCode::NOT_FOUND),
            (TreasureError::Timeout(5), StatusCode::GATEWAY_TIMEOUT),
            (
                TreasureError::Database("locked".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let (status, _) = ApiError::from(err).status_and_message();
            assert_eq!(status, expected);
        }
    }

    #[test]
    fn test_error_response_carries_kind() {
        let response = ApiError::from(TreasureError::Conflict("dup".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.extensions().get::<ErrorKind>(),
            Some(&ErrorKind::Conflict)
        );

        let response = ApiError::from(TreasureError::Timeout(3)).into_response();
        assert_eq!(
            response.extensions().get::<ErrorKind>(),
            Some(&ErrorKind::Timeout)
        );
    }

    #[test]
    fn test_client_messages_pass_through() {
        let (_, message) = ApiError::from(TreasureError::NotFound(
            "Treasure does not exists.".into(),
        ))
        .status_and_message();
        assert_eq!(message, "Treasure does not exists.");
    }

    #[test]
    fn test_server_faults_are_opaque() {
        let (_, message) =
            ApiError::from(TreasureError::Database("no such table: treasures".into()))
                .status_and_message();
        assert_eq!(message, "A database error occurred");

        let (_, message) = ApiError::from(anyhow::anyhow!("pool exhausted")).status_and_message();
        assert_eq!(message, "An internal error occurred");
    }
}
