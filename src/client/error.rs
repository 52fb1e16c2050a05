//! Client error definitions.

use reqwest::StatusCode;
use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur while sending a request through a client instance.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never reached the server or no response came back.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },

    /// The response body could not be decoded into the expected type.
    #[error("failed to decode response body: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The credential store could not be read.
    #[error("credential store read failed: {0}")]
    StorageRead(#[from] StorageError),

    /// The request could not be assembled (for example unencodable query
    /// parameters). Nothing was sent.
    #[error("failed to build request: {0}")]
    InvalidRequest(#[source] reqwest::Error),

    /// A relative path could not be resolved against the base address.
    #[error("invalid request URL '{path}': {reason}")]
    InvalidUrl { path: String, reason: String },

    /// The credential store rejected a write.
    #[error("credential store write failed: {0}")]
    StorageWrite(StorageError),

    /// No client instance is registered under this name.
    #[error("unknown client '{0}'")]
    UnknownClient(String),

    /// Two segments share the same client name.
    #[error("client '{0}' is defined more than once")]
    DuplicateClient(String),
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// HTTP status carried by the error, if the server responded.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for 401/403 responses. Callers decide whether to send the user to login.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN)
        )
    }

    /// The `{"error": "..."}` message from a server error body, if present.
    pub fn server_message(&self) -> Option<String> {
        let ClientError::HttpStatus { body, .. } = self else {
            return None;
        };
        serde_json::from_str::<serde_json::Value>(body)
            .ok()?
            .get("error")?
            .as_str()
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error(status: u16, body: &str) -> ClientError {
        ClientError::HttpStatus {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_auth_failure_detection() {
        assert!(status_error(401, "").is_auth_failure());
        assert!(status_error(403, "").is_auth_failure());
        assert!(!status_error(404, "").is_auth_failure());
        assert!(!ClientError::UnknownClient("x".into()).is_auth_failure());
    }

    #[test]
    fn test_server_message() {
        let err = status_error(400, r#"{"error": "License plate is required"}"#);
        assert_eq!(err.server_message().as_deref(), Some("License plate is required"));

        assert_eq!(status_error(500, "<html>").server_message(), None);
        assert_eq!(status_error(400, r#"{"message": "x"}"#).server_message(), None);
    }

    #[test]
    fn test_error_display() {
        let err = status_error(404, "not here");
        assert_eq!(err.to_string(), "HTTP 404 Not Found: not here");

        let err = ClientError::from(StorageError::Corrupt("bad".into()));
        assert_eq!(err.to_string(), "credential store read failed: storage corrupt: bad");
    }
}
