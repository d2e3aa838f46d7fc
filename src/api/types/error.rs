//! HTTP error responses
//!
//! Domain failures collapse into the fixed `{"status":"error","message":...}`
//! envelope. The proxy-fetch branch deliberately answers with a bare status
//! code and empty body instead - relay failures leak nothing, not even an
//! error shape.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::DomainError;

/// Error envelope body
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: String,
}

/// API error with status code
///
/// `body` of `None` renders as the status code alone with an empty body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: Option<ErrorBody>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: Some(ErrorBody {
                status: "error",
                message: message.into(),
            }),
        }
    }

    /// Status code only, empty body.
    pub fn bare(status: StatusCode) -> Self {
        Self { status, body: None }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::MissingParameter { .. } => Self::bad_request(err.to_string()),
            // Unknown and expired keys share one message; rate limiting keeps
            // the observed 401 rather than 429.
            DomainError::InvalidKey => Self::unauthorized("Invalid or expired API key"),
            DomainError::RateLimited => Self::unauthorized("IP request limit reached"),
            DomainError::NotConfigured => Self::internal("Api not configured"),
            DomainError::UpstreamUnavailable { .. } => {
                Self::internal("Failed to fetch from upstream provider")
            }
            DomainError::NoMediaFound => Self::not_found("No media found"),
            DomainError::MalformedToken => Self::bare(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.body {
            Some(body) => write!(f, "{}: {}", self.status, body.message),
            None => write!(f, "{}", self.status),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_shape() {
        let err = ApiError::unauthorized("Invalid or expired API key");
        let json = serde_json::to_string(&err.body.unwrap()).unwrap();

        assert!(json.contains("\"status\":\"error\""));
        assert!(json.contains("Invalid or expired API key"));
    }

    #[test]
    fn test_domain_error_mapping() {
        let cases = [
            (
                DomainError::missing_parameter("url"),
                StatusCode::BAD_REQUEST,
            ),
            (DomainError::InvalidKey, StatusCode::UNAUTHORIZED),
            (DomainError::RateLimited, StatusCode::UNAUTHORIZED),
            (DomainError::NotConfigured, StatusCode::INTERNAL_SERVER_ERROR),
            (
                DomainError::upstream("boom"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (DomainError::NoMediaFound, StatusCode::NOT_FOUND),
        ];

        for (domain_err, status) in cases {
            let api_err: ApiError = domain_err.into();
            assert_eq!(api_err.status, status);
            assert!(api_err.body.is_some());
        }
    }

    #[test]
    fn test_malformed_token_is_bare() {
        let api_err: ApiError = DomainError::MalformedToken.into();

        assert_eq!(api_err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(api_err.body.is_none());
    }

    #[test]
    fn test_upstream_detail_not_leaked() {
        let api_err: ApiError = DomainError::upstream("https://secret.internal/x failed").into();
        let message = api_err.body.unwrap().message;

        assert!(!message.contains("secret.internal"));
        assert_eq!(message, "Failed to fetch from upstream provider");
    }
}
