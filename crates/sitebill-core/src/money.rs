//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In a progress-billing table:                                           │
//! │    33% of $10,000.00 = $3,300.000000000001 → drifts per render          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    33% of 1_000_000 cents = 330_000 cents, exactly, every time         │
//! │    Rounding happens ONCE, explicitly, in percent_of()                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use sitebill_core::money::Money;
//! use sitebill_core::types::Percent;
//!
//! // Create from cents (preferred)
//! let amount = Money::from_cents(1_000_000); // $10,000.00
//!
//! // Percentage share with explicit rounding
//! let completed = amount.percent_of(Percent::from_bps(6_000)); // 60%
//! assert_eq!(completed.cents(), 600_000);
//!
//! // NEVER do this:
//! // let bad = Money::from_float(10.99); // NO SUCH METHOD EXISTS!
//! // Float coercion lives only at the wire boundary (sitebill-client).
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use ts_rs::TS;

use crate::types::Percent;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values - a line whose previously
///   invoiced percent exceeds its overall progress produces a negative
///   "this bill" amount (credit-memo style), and that must round-trip
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  OrderLineItem.amount ──┬──► completed_amount (× progress %)            │
/// │                         ├──► previously_invoiced_amount (× prior %)     │
/// │                         └──► this_bill_amount (× progress delta %)      │
/// │                                                                         │
/// │  InvoiceLink.billed_amount ──► Invoice.effective_amount (Σ links)       │
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use sitebill_core::money::Money;
    ///
    /// let amount = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(amount.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Example
    /// ```rust
    /// use sitebill_core::money::Money;
    ///
    /// let amount = Money::from_major_minor(10, 99); // $10.99
    /// assert_eq!(amount.cents(), 1099);
    ///
    /// let credit = Money::from_major_minor(-5, 50); // -$5.50 (credit)
    /// assert_eq!(credit.cents(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -$5.50, not -$4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        // Handle sign: if major is negative, minor should subtract
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Computes a percentage share of this amount.
    ///
    /// This is the single place the progress-billing formula touches
    /// rounding: `completed = amount × progress%`, `this_bill = amount ×
    /// (progress% − previously_invoiced%)`, and so on all route through
    /// here, so every component of the dashboard agrees to the cent.
    ///
    /// ## Implementation
    /// Integer math in i128: `(amount_cents * bps ± 5000) / 10000`,
    /// rounding half away from zero. The sign on the 5000 follows the
    /// numerator so negative percentages (credit bills) round
    /// symmetrically to positive ones.
    ///
    /// ## Example
    /// ```rust
    /// use sitebill_core::money::Money;
    /// use sitebill_core::types::Percent;
    ///
    /// let amount = Money::from_cents(100_000); // $1,000.00
    ///
    /// // 8.25% of $1,000.00 = $82.50
    /// assert_eq!(amount.percent_of(Percent::from_bps(825)).cents(), 8_250);
    ///
    /// // -20% of $1,000.00 = -$200.00 (previously invoiced ran ahead)
    /// assert_eq!(amount.percent_of(Percent::from_bps(-2_000)).cents(), -20_000);
    /// ```
    pub fn percent_of(&self, pct: Percent) -> Money {
        // i128 to prevent overflow on large contract values
        let numerator = self.0 as i128 * pct.bps() as i128;
        let rounded = if numerator >= 0 {
            (numerator + 5_000) / 10_000
        } else {
            (numerator - 5_000) / 10_000
        };
        Money::from_cents(rounded as i64)
    }

    /// Divides an amount by a quantity, for unit-rate derivation.
    ///
    /// ## Returns
    /// `None` when the quantity is zero, negative, or not finite - the
    /// caller treats that as "no rate can be derived", never as an error.
    ///
    /// ## Example
    /// ```rust
    /// use sitebill_core::money::Money;
    ///
    /// let amount = Money::from_cents(50_000); // $500.00
    /// let rate = amount.divide_quantity(10.0).unwrap();
    /// assert_eq!(rate.cents(), 5_000); // $50.00 per unit
    ///
    /// assert!(amount.divide_quantity(0.0).is_none());
    /// ```
    pub fn divide_quantity(&self, qty: f64) -> Option<Money> {
        if !qty.is_finite() || qty <= 0.0 {
            return None;
        }
        let rate = (self.0 as f64 / qty).round();
        if !rate.is_finite() {
            return None;
        }
        Some(Money::from_cents(rate as i64))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and logs. The dashboard formats currency through
/// `DashboardConfig::format_currency` to honor the configured symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Negation, for credit amounts.
impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation, for totals rows and invoice-link reconciliation.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        let money = Money::from_major_minor(10, 99);
        assert_eq!(money.cents(), 1099);

        let credit = Money::from_major_minor(-5, 50);
        assert_eq!(credit.cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
        assert_eq!((-a).cents(), -1000);
    }

    #[test]
    fn test_percent_of_whole_percent() {
        // 60% of $10,000.00 = $6,000.00 exactly
        let amount = Money::from_cents(1_000_000);
        assert_eq!(amount.percent_of(Percent::from_bps(6_000)).cents(), 600_000);
    }

    #[test]
    fn test_percent_of_rounds_half_away_from_zero() {
        // 8.25% of $10.00 = $0.825 → $0.83
        let amount = Money::from_cents(1_000);
        assert_eq!(amount.percent_of(Percent::from_bps(825)).cents(), 83);

        // Same magnitude, negative percent: -$0.825 → -$0.83
        assert_eq!(amount.percent_of(Percent::from_bps(-825)).cents(), -83);
    }

    #[test]
    fn test_percent_of_negative_percent() {
        // Previously invoiced ran 20% ahead of progress: bill is a credit
        let amount = Money::from_cents(100_000);
        assert_eq!(
            amount.percent_of(Percent::from_bps(-2_000)).cents(),
            -20_000
        );
    }

    #[test]
    fn test_percent_of_large_amount_no_overflow() {
        // $900 billion at 100% exercises the i128 intermediate
        let amount = Money::from_cents(90_000_000_000_000);
        assert_eq!(
            amount.percent_of(Percent::from_bps(10_000)).cents(),
            90_000_000_000_000
        );
    }

    #[test]
    fn test_divide_quantity() {
        let amount = Money::from_cents(50_000);
        assert_eq!(amount.divide_quantity(10.0).unwrap().cents(), 5_000);

        // Fractional quantities are common in construction (2.5 tons)
        assert_eq!(amount.divide_quantity(2.5).unwrap().cents(), 20_000);
    }

    #[test]
    fn test_divide_quantity_degenerate_inputs() {
        let amount = Money::from_cents(50_000);
        assert!(amount.divide_quantity(0.0).is_none());
        assert!(amount.divide_quantity(-1.0).is_none());
        assert!(amount.divide_quantity(f64::NAN).is_none());
        assert!(amount.divide_quantity(f64::INFINITY).is_none());
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, -50]
            .into_iter()
            .map(Money::from_cents)
            .sum();
        assert_eq!(total.cents(), 300);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_cents(100);
        assert!(positive.is_positive());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
    }
}
