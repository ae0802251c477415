//! # Client Error Types
//!
//! Error types for backend API operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  HTTP failure (reqwest::Error) ─────────┐                              │
//! │                                         ▼                              │
//! │  Non-2xx response body { "error": … } ► ClientError (this module)      │
//! │                                         │                              │
//! │                                         ▼                              │
//! │  UiError (in dashboard) ← API message passed through VERBATIM          │
//! │                                         │                              │
//! │                                         ▼                              │
//! │  Frontend toast shows the backend's own words                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Backend API operation errors.
///
/// These errors wrap reqwest errors and non-2xx responses and provide
/// categorization for the dashboard layer.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Could not reach the backend at all.
    ///
    /// ## When This Occurs
    /// - Backend down or unreachable
    /// - DNS/TLS failure
    /// - Bad base URL
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The backend answered with a non-2xx status.
    ///
    /// `message` is the response body's `error` field verbatim when
    /// present, otherwise the status line. The dashboard shows it as-is.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Resource not found (404 with a recognizable entity).
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The response body could not be decoded as the expected shape.
    #[error("Response decode failed: {0}")]
    Decode(String),

    /// Internal client error.
    #[error("Internal client error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        ClientError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// The user-facing message for this error.
    ///
    /// For `Api` errors this is the backend's `error` string verbatim;
    /// the dashboard must not rewrite it.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Convert reqwest errors to ClientError.
///
/// ## Error Mapping
/// ```text
/// is_timeout()   → ClientError::Timeout
/// is_connect()   → ClientError::ConnectionFailed
/// is_decode()    → ClientError::Decode
/// Other          → ClientError::Internal
/// ```
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::ConnectionFailed(err.to_string())
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Internal(err.to_string())
        }
    }
}

/// Result type for backend API operations.
pub type ClientResult<T> = Result<T, ClientError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_message_passes_through_verbatim() {
        let err = ClientError::Api {
            status: 422,
            message: "Invoice amount exceeds remaining billable".to_string(),
        };
        assert_eq!(
            err.user_message(),
            "Invoice amount exceeds remaining billable"
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = ClientError::not_found("Order", "ord-1");
        assert_eq!(err.to_string(), "Order not found: ord-1");
    }
}
