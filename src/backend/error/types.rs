/**
 * Backend Error Types
 *
 * `BackendError` wraps the core `CollabError` and adds the failures only the
 * HTTP layer can produce, such as malformed requests.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Raised by the handlers themselves:
 * - Request body that is not valid JSON for the endpoint
 * - Missing or empty request fields
 *
 * ## Core Errors
 *
 * Anything a transport or the chat service returns. The status code follows
 * the `ErrorKind` of the wrapped error.
 */

use thiserror::Error;
use axum::http::StatusCode;
use crate::shared::{CollabError, ErrorKind};

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use axum::http::StatusCode;
/// use codecollab::backend::error::BackendError;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g. malformed body)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Error returned by a transport or the chat service
    #[error(transparent)]
    Collab(#[from] CollabError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Create a 400 Bad Request handler error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `Collab` - Depends on the error kind
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Collab(err) => match err.kind() {
                ErrorKind::Validation | ErrorKind::Bind => StatusCode::BAD_REQUEST,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Conflict => StatusCode::CONFLICT,
                ErrorKind::Unsupported => StatusCode::NOT_IMPLEMENTED,
                ErrorKind::RandomSource | ErrorKind::Serialization => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::Collab(err) => err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::TransportKind;
    use assert_matches::assert_matches;

    #[test]
    fn test_handler_error() {
        let error = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
        assert_matches!(
            error,
            BackendError::HandlerError { status: StatusCode::BAD_REQUEST, ref message } if message == "Invalid request"
        );
    }

    #[test]
    fn test_collab_status_code_mapping() {
        let cases = [
            (CollabError::validation("id", "host peer must have a non-empty id"), StatusCode::BAD_REQUEST),
            (CollabError::room_not_found("r1"), StatusCode::NOT_FOUND),
            (CollabError::peer_not_in_room("p1", "r1"), StatusCode::NOT_FOUND),
            (CollabError::peer_already_in_room("p1", "r1"), StatusCode::CONFLICT),
            (CollabError::random_source("no entropy"), StatusCode::INTERNAL_SERVER_ERROR),
            (CollabError::serialization("bad json"), StatusCode::INTERNAL_SERVER_ERROR),
            (
                CollabError::Unsupported {
                    operation: "send_data",
                    transport: TransportKind::WebRtc,
                },
                StatusCode::NOT_IMPLEMENTED,
            ),
            (
                CollabError::Bind {
                    address: "x".to_string(),
                    source: std::io::Error::other("boom"),
                },
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(BackendError::from(err).status_code(), expected);
        }
    }

    #[test]
    fn test_collab_message_is_passed_through() {
        let error: BackendError = CollabError::room_not_found("abc").into();
        assert_eq!(error.message(), "room abc does not exist");
        assert_eq!(error.to_string(), "room abc does not exist");
    }

    #[test]
    fn test_bad_request_message() {
        let error = BackendError::bad_request("roomId is required");
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.message(), "roomId is required");
        assert_eq!(error.to_string(), "Handler error: roomId is required");
    }
}
