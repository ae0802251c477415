//! # Error Types
//!
//! Domain-specific error types for sitebill-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  sitebill-core errors (this file)                                      │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  sitebill-client errors (separate crate)                               │
//! │  └── ClientError      - Backend API call failures                      │
//! │                                                                         │
//! │  Dashboard errors (sitebill-dashboard)                                 │
//! │  └── UiError          - What the frontend sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ClientError → UiError → Frontend  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (row ID, amounts, etc.)
//! 3. Errors are enum variants, never String
//! 4. The billing calculator itself has NO error path - missing or
//!    malformed inputs degrade to zero, they never throw

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations in editor sessions and
/// invoice assembly. They are caught at the dashboard boundary and
/// translated to user-facing messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Line item cannot be found in the working set.
    ///
    /// ## When This Occurs
    /// - Editing a row that another session's save removed
    /// - A stale row ID after a refetch replaced the working copy
    #[error("Line item not found: {0}")]
    ItemNotFound(String),

    /// Invoice cannot be found.
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(String),

    /// No order is loaded into the editor session.
    #[error("No order loaded")]
    NoOrderLoaded,

    /// The order's work breakdown has hit the row cap.
    #[error("Order cannot have more than {max} rows")]
    OrderTooLarge { max: usize },

    /// The invoice amount is locked to the link sum.
    ///
    /// ## When This Occurs
    /// - Manual amount entry while line-item links exist
    #[error("Invoice amount is locked to the sum of linked items")]
    InvoiceAmountLocked,

    /// Stored invoice amount disagrees with its link sum at save time.
    #[error(
        "Invoice amount does not match linked items: expected {expected_cents} cents, got {actual_cents} cents"
    )]
    LinkedTotalMismatch {
        expected_cents: i64,
        actual_cents: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, non-finite number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::LinkedTotalMismatch {
            expected_cents: 15_000,
            actual_cents: 14_999,
        };
        assert_eq!(
            err.to_string(),
            "Invoice amount does not match linked items: expected 15000 cents, got 14999 cents"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "product_service".to_string(),
        };
        assert_eq!(err.to_string(), "product_service is required");

        let err = ValidationError::OutOfRange {
            field: "progress".to_string(),
            min: 0,
            max: 100,
        };
        assert_eq!(err.to_string(), "progress must be between 0 and 100");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
