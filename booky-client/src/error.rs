//! Client error types

use serde_json::Value;
use shared::AppError;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or connectivity failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response carrying a JSON error body
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        code: Option<u16>,
        message: String,
        body: Option<Value>,
    },

    /// Authentication required
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Client-side precondition failed; no request was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// 400 / 422 response without a parseable body
    #[error("Bad request ({status}): {message}")]
    BadRequest { status: u16, message: String },

    /// Any other non-2xx response without a parseable body
    #[error("Server error ({status}): {message}")]
    Internal { status: u16, message: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Session storage I/O
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Operation not valid in the current state
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl ClientError {
    /// HTTP status of the failed response, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. }
            | Self::BadRequest { status, .. }
            | Self::Internal { status, .. } => Some(*status),
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Parsed error body, if any
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Api { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Network-level failure (no response received)
    pub fn is_network(&self) -> bool {
        match self {
            Self::Http(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }

    /// Message suitable for an alert dialog
    pub fn user_message(&self) -> String {
        match self {
            Self::Http(e) if e.is_timeout() => "The request timed out. Please try again.".into(),
            Self::Http(_) => "Could not reach the server. Check your connection.".into(),
            Self::Api { message, .. } if !message.is_empty() => message.clone(),
            Self::Unauthorized(_) => "Your session has expired. Please sign in again.".into(),
            Self::Forbidden(_) => "You are not allowed to do that.".into(),
            Self::NotFound(_) => "The requested item no longer exists.".into(),
            Self::Validation(message) => message.clone(),
            Self::BadRequest { .. } => "The request was rejected. Please check your input.".into(),
            _ => "Something went wrong. Please try again.".into(),
        }
    }
}

impl From<AppError> for ClientError {
    fn from(err: AppError) -> Self {
        Self::Validation(err.message)
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::ErrorCode;

    #[test]
    fn test_status_accessor() {
        let err = ClientError::Api {
            status: 409,
            code: Some(3002),
            message: "Cannot change status".into(),
            body: Some(json!({"code": 3002})),
        };
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.body().unwrap()["code"], 3002);
        assert_eq!(ClientError::NotFound("x".into()).status(), Some(404));
        assert_eq!(ClientError::InvalidResponse("x".into()).status(), None);
        assert_eq!(ClientError::Validation("x".into()).status(), None);
        let err = ClientError::BadRequest {
            status: 422,
            message: "Failed to deserialize the JSON body".into(),
        };
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn test_user_message() {
        let err = ClientError::Api {
            status: 400,
            code: None,
            message: "Both sides must offer at least one book".into(),
            body: None,
        };
        assert_eq!(err.user_message(), "Both sides must offer at least one book");

        let err = ClientError::Internal {
            status: 502,
            message: "<html>bad gateway</html>".into(),
        };
        assert_eq!(err.user_message(), "Something went wrong. Please try again.");
    }

    #[test]
    fn test_from_app_error() {
        let err: ClientError = AppError::new(ErrorCode::ExchangeSameUser).into();
        assert!(matches!(err, ClientError::Validation(ref m) if m == "Cannot exchange books with yourself"));
    }
}
