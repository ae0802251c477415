//! # UI Error Type
//!
//! Unified error type for dashboard actions.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in SiteBill                               │
//! │                                                                         │
//! │  Frontend                    Rust Layer                                 │
//! │  ────────                    ──────────                                 │
//! │                                                                         │
//! │  saveOrderItems()                                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Action Function                                                 │  │
//! │  │  Result<T, UiError>                                              │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Backend error? ─── ClientError::Api { message } ──┐            │  │
//! │  │         │              (message passed VERBATIM)   │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Business rule? ─── CoreError ────────────────── UiError ──────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Frontend shows a single toast; state stays pre-save; nothing          │
//! │  retries automatically.                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use sitebill_client::ClientError;
use sitebill_core::CoreError;

/// Error returned from dashboard actions.
///
/// ## Serialization
/// This is what the frontend receives when an action fails:
/// ```json
/// {
///   "code": "API_ERROR",
///   "message": "Invoice amount exceeds remaining billable"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for the toast
    pub message: String,
}

/// Error codes for action responses.
///
/// ## Usage in Frontend
/// ```typescript
/// try {
///   await saveOrderItems();
/// } catch (e) {
///   switch (e.code) {
///     case 'NETWORK_ERROR':
///       toast('Backend unreachable - changes kept locally');
///       break;
///     default:
///       toast(e.message);
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Could not reach the backend at all
    NetworkError,

    /// Backend answered with an error; message is its `error` field
    ApiError,

    /// Business rule violation (422)
    BusinessLogic,

    /// Internal error (500)
    Internal,
}

impl UiError {
    /// Creates a new UI error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        UiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        UiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        UiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        UiError::new(ErrorCode::Internal, message)
    }
}

/// Converts backend client errors to UI errors.
///
/// The API's own `error` string goes through verbatim - the toast shows
/// the backend's words, not a paraphrase.
impl From<ClientError> for UiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Api { .. } => UiError::new(ErrorCode::ApiError, err.user_message()),
            ClientError::NotFound { entity, id } => UiError::not_found(&entity, &id),
            ClientError::Timeout | ClientError::ConnectionFailed(_) => {
                UiError::new(ErrorCode::NetworkError, err.to_string())
            }
            ClientError::Decode(e) => {
                // Log the detail, show something the user can act on
                tracing::error!("Response decode failed: {}", e);
                UiError::internal("Unexpected response from the backend")
            }
            ClientError::Internal(e) => {
                tracing::error!("Client internal error: {}", e);
                UiError::internal("Request failed")
            }
        }
    }
}

/// Converts core errors to UI errors.
impl From<CoreError> for UiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ItemNotFound(id) => UiError::not_found("Line item", &id),
            CoreError::InvoiceNotFound(id) => UiError::not_found("Invoice", &id),
            CoreError::NoOrderLoaded => {
                UiError::new(ErrorCode::BusinessLogic, "No order loaded")
            }
            CoreError::OrderTooLarge { max } => UiError::new(
                ErrorCode::BusinessLogic,
                format!("Order cannot have more than {} rows", max),
            ),
            CoreError::InvoiceAmountLocked => UiError::new(
                ErrorCode::BusinessLogic,
                "Invoice amount is locked to the sum of linked items",
            ),
            CoreError::LinkedTotalMismatch { .. } => {
                UiError::new(ErrorCode::BusinessLogic, err.to_string())
            }
            CoreError::Validation(e) => UiError::validation(e.to_string()),
        }
    }
}

impl std::fmt::Display for UiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for UiError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message_verbatim() {
        let err = UiError::from(ClientError::Api {
            status: 422,
            message: "Invoice amount exceeds remaining billable".to_string(),
        });
        assert_eq!(err.message, "Invoice amount exceeds remaining billable");
        assert!(matches!(err.code, ErrorCode::ApiError));
    }

    #[test]
    fn test_timeout_maps_to_network_error() {
        let err = UiError::from(ClientError::Timeout);
        assert!(matches!(err.code, ErrorCode::NetworkError));
    }

    #[test]
    fn test_core_validation_maps_to_validation() {
        let core = CoreError::Validation(sitebill_core::ValidationError::Required {
            field: "invoice_number".to_string(),
        });
        let err = UiError::from(core);
        assert!(matches!(err.code, ErrorCode::ValidationError));
        assert_eq!(err.message, "invoice_number is required");
    }

    #[test]
    fn test_serialized_shape() {
        let err = UiError::not_found("Order", "ord-1");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Order not found: ord-1");
    }
}
