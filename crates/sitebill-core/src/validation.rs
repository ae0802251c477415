//! # Validation Module
//!
//! Input validation utilities for SiteBill.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Dashboard Frontend (TypeScript)                              │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Editor Session (Rust)                                        │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: Business rule validation + entry clamping            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend API                                                  │
//! │  └── Authoritative constraints on persist                              │
//! │                                                                         │
//! │  Defense in depth: Multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Clamping vs Validating
//! Progress percents are the one place entry correction is a CLAMP, not a
//! rejection: the table stores whatever the user typed pulled into
//! [0, 100]. Everything downstream (the calculator) then trusts its
//! inputs and computes literally.

use crate::error::ValidationError;
use crate::types::Percent;
use crate::MAX_PRODUCT_SERVICE_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Progress Entry Clamp
// =============================================================================

/// Normalizes an interactively entered progress percent.
///
/// ## Rules
/// - Non-finite input (NaN, ±∞) degrades to 0%
/// - Finite input is clamped to the closed interval [0, 100]
///
/// ## Example
/// ```rust
/// use sitebill_core::validation::clamp_progress_input;
///
/// assert_eq!(clamp_progress_input(60.0).bps(), 6_000);
/// assert_eq!(clamp_progress_input(250.0).bps(), 10_000);
/// assert_eq!(clamp_progress_input(-10.0).bps(), 0);
/// assert_eq!(clamp_progress_input(f64::NAN).bps(), 0);
/// ```
pub fn clamp_progress_input(raw: f64) -> Percent {
    Percent::from_percentage(raw).clamped()
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product/service label.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 300 characters (backend column limit)
pub fn validate_product_service(label: &str) -> ValidationResult<()> {
    let label = label.trim();

    if label.is_empty() {
        return Err(ValidationError::Required {
            field: "product_service".to_string(),
        });
    }

    if label.len() > MAX_PRODUCT_SERVICE_LEN {
        return Err(ValidationError::TooLong {
            field: "product_service".to_string(),
            max: MAX_PRODUCT_SERVICE_LEN,
        });
    }

    Ok(())
}

/// Validates an invoice number.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
/// - Should contain only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use sitebill_core::validation::validate_invoice_number;
///
/// assert!(validate_invoice_number("INV-2026-0041").is_ok());
/// assert!(validate_invoice_number("").is_err());
/// assert!(validate_invoice_number("INV 41").is_err());
/// ```
pub fn validate_invoice_number(number: &str) -> ValidationResult<()> {
    let number = number.trim();

    if number.is_empty() {
        return Err(ValidationError::Required {
            field: "invoice_number".to_string(),
        });
    }

    if number.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "invoice_number".to_string(),
            max: 50,
        });
    }

    // Check for valid characters (alphanumeric, hyphen, underscore)
    if !number
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "invoice_number".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be finite
/// - Must be positive (> 0); fractional values are fine (2.5 tons)
pub fn validate_quantity(qty: f64) -> ValidationResult<()> {
    if !qty.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "quantity".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if qty <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a line amount in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (allowance lines priced later)
pub fn validate_amount_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "amount".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Rules
/// - Must be a valid UUID format
/// - 36 characters with hyphens: xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx
///
/// ## Example
/// ```rust
/// use sitebill_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    // Try to parse as UUID
    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_progress_input() {
        assert_eq!(clamp_progress_input(0.0).bps(), 0);
        assert_eq!(clamp_progress_input(60.0).bps(), 6_000);
        assert_eq!(clamp_progress_input(100.0).bps(), 10_000);

        // Out of range pulls to the boundary
        assert_eq!(clamp_progress_input(101.0).bps(), 10_000);
        assert_eq!(clamp_progress_input(-5.0).bps(), 0);

        // Garbage degrades to zero
        assert_eq!(clamp_progress_input(f64::NAN).bps(), 0);
        assert_eq!(clamp_progress_input(f64::NEG_INFINITY).bps(), 0);
    }

    #[test]
    fn test_validate_product_service() {
        assert!(validate_product_service("Concrete footings").is_ok());
        assert!(validate_product_service("").is_err());
        assert!(validate_product_service("   ").is_err());
        assert!(validate_product_service(&"A".repeat(400)).is_err());
    }

    #[test]
    fn test_validate_invoice_number() {
        assert!(validate_invoice_number("INV-2026-0041").is_ok());
        assert!(validate_invoice_number("INV_41").is_ok());

        assert!(validate_invoice_number("").is_err());
        assert!(validate_invoice_number("has space").is_err());
        assert!(validate_invoice_number(&"A".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1.0).is_ok());
        assert!(validate_quantity(2.5).is_ok());

        assert!(validate_quantity(0.0).is_err());
        assert!(validate_quantity(-1.0).is_err());
        assert!(validate_quantity(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_amount_cents() {
        assert!(validate_amount_cents(0).is_ok());
        assert!(validate_amount_cents(1_000_000).is_ok());
        assert!(validate_amount_cents(-100).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
    }
}
