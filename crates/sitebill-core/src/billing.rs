//! # Progress Billing
//!
//! The percentage-of-completion math behind the order-items table.
//!
//! ## The Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Progress Billing, One Row at a Time                        │
//! │                                                                         │
//! │  Inputs (stored):                                                       │
//! │    amount                    line value, base for all percentages       │
//! │    progress_overall     %    cumulative work completed to date          │
//! │    previously_invoiced  %    cumulative % billed on prior invoices      │
//! │                                                                         │
//! │  Derived (recomputed, never stored):                                    │
//! │    completed_amount            = amount × progress_overall              │
//! │    previously_invoiced_amount  = amount × previously_invoiced           │
//! │    new_progress                = progress_overall − previously_invoiced │
//! │    this_bill_amount            = amount × new_progress                  │
//! │                                                                         │
//! │  A missing input zeroes the figures that depend on it; nothing         │
//! │  panics, nothing produces NaN. new_progress is NOT clamped: prior      │
//! │  invoicing ahead of progress yields a negative (credit) bill.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This formula used to live in every table component that rendered it,
//! and the copies drifted. It lives here once, and every caller - editor,
//! DTO writer, analytics - goes through [`derive_billing`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{LineItemKind, OrderLineItem, Percent};

// =============================================================================
// Derived Billing Figures
// =============================================================================

/// The four derived billing figures for one line item.
///
/// Pure output of [`derive_billing`]; see the module docs for the formula.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillingDerived {
    /// amount × progress_overall; zero when progress is absent.
    pub completed_amount: Money,

    /// amount × previously_invoiced; zero when absent.
    pub previously_invoiced_amount: Money,

    /// progress_overall − previously_invoiced when both are present,
    /// otherwise zero. May be negative; deliberately not clamped.
    pub new_progress: Percent,

    /// amount × new_progress. Negative when new_progress is.
    pub this_bill_amount: Money,
}

/// Computes the derived billing figures for one row.
///
/// ## Guarantees
/// - Category rows yield all-zero figures regardless of their inputs.
/// - Total: no input combination panics; missing inputs degrade to zero.
/// - Out-of-range percents (negative, >100%) are computed literally -
///   clamping is the entry form's job, not the calculator's.
/// - Holding `amount` and `previously_invoiced` fixed, a larger
///   `progress_overall` never yields a smaller `this_bill_amount`.
///
/// ## Example
/// ```rust
/// use sitebill_core::billing::derive_billing;
/// use sitebill_core::{LineItemKind, Money, Percent};
///
/// let derived = derive_billing(
///     LineItemKind::Item,
///     Money::from_cents(100_000),          // $1,000.00
///     Some(Percent::from_bps(3_000)),      // 30% complete
///     Some(Percent::from_bps(5_000)),      // 50% already invoiced
/// );
///
/// // Prior invoicing ran ahead: this bill is a $200.00 credit
/// assert_eq!(derived.new_progress.bps(), -2_000);
/// assert_eq!(derived.this_bill_amount.cents(), -20_000);
/// ```
pub fn derive_billing(
    kind: LineItemKind,
    amount: Money,
    progress_overall: Option<Percent>,
    previously_invoiced: Option<Percent>,
) -> BillingDerived {
    // Grouping headers carry no financial values
    if kind.is_category() {
        return BillingDerived::default();
    }

    let completed_amount = progress_overall
        .map(|p| amount.percent_of(p))
        .unwrap_or_default();

    let previously_invoiced_amount = previously_invoiced
        .map(|p| amount.percent_of(p))
        .unwrap_or_default();

    let new_progress = match (progress_overall, previously_invoiced) {
        (Some(overall), Some(prior)) => overall - prior,
        _ => Percent::zero(),
    };

    let this_bill_amount = amount.percent_of(new_progress);

    BillingDerived {
        completed_amount,
        previously_invoiced_amount,
        new_progress,
        this_bill_amount,
    }
}

// =============================================================================
// Auto-Rate Derivation
// =============================================================================

/// Fills in a missing unit rate from `amount / quantity`.
///
/// ## Rules
/// - Fires only when the current rate is empty AND amount > 0 AND
///   quantity > 0; a rate someone typed always wins.
/// - Idempotent: re-running with the same inputs and a populated rate
///   returns that rate unchanged.
///
/// ## Example
/// ```rust
/// use sitebill_core::billing::derive_unit_rate;
/// use sitebill_core::Money;
///
/// // Empty rate, $500.00 over 10 units → $50.00
/// let rate = derive_unit_rate(None, Money::from_cents(50_000), Some(10.0));
/// assert_eq!(rate.unwrap().cents(), 5_000);
///
/// // Manually entered rate survives any amount/quantity change
/// let manual = Some(Money::from_cents(2_500));
/// assert_eq!(
///     derive_unit_rate(manual, Money::from_cents(50_000), Some(10.0)),
///     manual
/// );
/// ```
pub fn derive_unit_rate(
    current_rate: Option<Money>,
    amount: Money,
    quantity: Option<f64>,
) -> Option<Money> {
    // Manual entry always wins
    if current_rate.is_some() {
        return current_rate;
    }

    let qty = quantity?;
    if !amount.is_positive() {
        return None;
    }

    amount.divide_quantity(qty)
}

// =============================================================================
// Order Totals
// =============================================================================

/// Footer totals for an order's work breakdown table.
///
/// Category rows contribute nothing; only `item` rows carry money.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    /// Number of billable item rows (categories excluded).
    pub item_count: usize,
    /// Σ amount over item rows.
    pub amount_cents: i64,
    /// Σ completed_amount over item rows.
    pub completed_cents: i64,
    /// Σ previously_invoiced_amount over item rows.
    pub previously_invoiced_cents: i64,
    /// Σ this_bill_amount over item rows; may be negative.
    pub this_bill_cents: i64,
}

impl OrderTotals {
    /// Computes footer totals over a set of rows.
    pub fn from_items(items: &[OrderLineItem]) -> Self {
        let mut totals = OrderTotals::default();

        for item in items.iter().filter(|i| !i.is_category()) {
            let derived = item.billing();
            totals.item_count += 1;
            totals.amount_cents += item.amount_cents;
            totals.completed_cents += derived.completed_amount.cents();
            totals.previously_invoiced_cents += derived.previously_invoiced_amount.cents();
            totals.this_bill_cents += derived.this_bill_amount.cents();
        }

        totals
    }

    /// Σ amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }

    /// Σ this_bill as Money.
    #[inline]
    pub fn this_bill(&self) -> Money {
        Money::from_cents(self.this_bill_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_item(
        amount_cents: i64,
        progress_bps: Option<i64>,
        prior_bps: Option<i64>,
    ) -> OrderLineItem {
        OrderLineItem {
            id: "item-1".to_string(),
            order_id: "ord-1".to_string(),
            kind: LineItemKind::Item,
            product_service: "Concrete footings".to_string(),
            description: None,
            quantity: None,
            unit_rate_cents: None,
            amount_cents,
            progress_overall_bps: progress_bps,
            previously_invoiced_bps: prior_bps,
            vendor_id: None,
            position: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_missing_progress_zeroes_everything() {
        let derived = derive_billing(LineItemKind::Item, Money::from_cents(100_000), None, None);

        assert_eq!(derived.completed_amount, Money::zero());
        assert_eq!(derived.previously_invoiced_amount, Money::zero());
        assert_eq!(derived.new_progress, Percent::zero());
        assert_eq!(derived.this_bill_amount, Money::zero());
    }

    #[test]
    fn test_first_bill_equals_completed() {
        // Nothing previously invoiced: the whole completed amount bills now
        let derived = derive_billing(
            LineItemKind::Item,
            Money::from_cents(100_000),
            Some(Percent::from_bps(4_500)),
            Some(Percent::zero()),
        );

        assert_eq!(derived.completed_amount.cents(), 45_000);
        assert_eq!(derived.new_progress.bps(), 4_500);
        assert_eq!(derived.this_bill_amount, derived.completed_amount);
    }

    #[test]
    fn test_progress_delta_bills_the_difference() {
        // $10,000 line, 60% complete, 25% already invoiced → bill 35%
        let derived = derive_billing(
            LineItemKind::Item,
            Money::from_cents(1_000_000),
            Some(Percent::from_bps(6_000)),
            Some(Percent::from_bps(2_500)),
        );

        assert_eq!(derived.completed_amount.cents(), 600_000);
        assert_eq!(derived.previously_invoiced_amount.cents(), 250_000);
        assert_eq!(derived.new_progress.bps(), 3_500);
        assert_eq!(derived.this_bill_amount.cents(), 350_000);
    }

    #[test]
    fn test_prior_invoicing_ahead_yields_credit() {
        // Invoiced 50% but only 30% complete: -20% → -$200.00
        let derived = derive_billing(
            LineItemKind::Item,
            Money::from_cents(100_000),
            Some(Percent::from_bps(3_000)),
            Some(Percent::from_bps(5_000)),
        );

        assert_eq!(derived.new_progress.bps(), -2_000);
        assert_eq!(derived.this_bill_amount.cents(), -20_000);
    }

    #[test]
    fn test_only_prior_percent_present() {
        // Overall progress absent: delta is zero, nothing bills
        let derived = derive_billing(
            LineItemKind::Item,
            Money::from_cents(100_000),
            None,
            Some(Percent::from_bps(5_000)),
        );

        assert_eq!(derived.completed_amount, Money::zero());
        assert_eq!(derived.previously_invoiced_amount.cents(), 50_000);
        assert_eq!(derived.new_progress, Percent::zero());
        assert_eq!(derived.this_bill_amount, Money::zero());
    }

    #[test]
    fn test_category_rows_always_zero() {
        // Even with numeric fields present, headers carry no money
        for kind in [LineItemKind::MainCategory, LineItemKind::SubCategory] {
            let derived = derive_billing(
                kind,
                Money::from_cents(999_999),
                Some(Percent::from_bps(9_000)),
                Some(Percent::from_bps(1_000)),
            );
            assert_eq!(derived, BillingDerived::default());
        }
    }

    #[test]
    fn test_out_of_range_percent_computed_literally() {
        // 150% progress is the entry form's problem; the math just runs
        let derived = derive_billing(
            LineItemKind::Item,
            Money::from_cents(100_000),
            Some(Percent::from_bps(15_000)),
            Some(Percent::zero()),
        );

        assert_eq!(derived.completed_amount.cents(), 150_000);
        assert_eq!(derived.this_bill_amount.cents(), 150_000);
    }

    #[test]
    fn test_deterministic() {
        let run = || {
            derive_billing(
                LineItemKind::Item,
                Money::from_cents(777_777),
                Some(Percent::from_bps(3_333)),
                Some(Percent::from_bps(1_111)),
            )
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_this_bill_monotone_in_progress() {
        // Fixed amount and prior percent: more progress never bills less
        let amount = Money::from_cents(123_457);
        let prior = Some(Percent::from_bps(2_500));

        let mut last = i64::MIN;
        for bps in (0..=10_000).step_by(250) {
            let derived =
                derive_billing(LineItemKind::Item, amount, Some(Percent::from_bps(bps)), prior);
            assert!(derived.this_bill_amount.cents() >= last);
            last = derived.this_bill_amount.cents();
        }
    }

    #[test]
    fn test_derive_unit_rate_fills_empty_rate() {
        let rate = derive_unit_rate(None, Money::from_cents(50_000), Some(10.0));
        assert_eq!(rate.unwrap().cents(), 5_000);
    }

    #[test]
    fn test_derive_unit_rate_manual_entry_wins() {
        let manual = Some(Money::from_cents(2_500));
        let rate = derive_unit_rate(manual, Money::from_cents(50_000), Some(10.0));
        assert_eq!(rate, manual);
    }

    #[test]
    fn test_derive_unit_rate_requires_positive_inputs() {
        assert!(derive_unit_rate(None, Money::zero(), Some(10.0)).is_none());
        assert!(derive_unit_rate(None, Money::from_cents(50_000), Some(0.0)).is_none());
        assert!(derive_unit_rate(None, Money::from_cents(50_000), None).is_none());
    }

    #[test]
    fn test_order_totals_skip_categories() {
        let mut header = test_item(999_999, Some(9_000), None);
        header.kind = LineItemKind::MainCategory;

        let items = vec![
            header,
            test_item(100_000, Some(5_000), Some(2_000)),
            test_item(200_000, Some(2_500), None),
        ];

        let totals = OrderTotals::from_items(&items);
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.amount_cents, 300_000);
        assert_eq!(totals.completed_cents, 50_000 + 50_000);
        assert_eq!(totals.previously_invoiced_cents, 20_000);
        // Second row has no prior percent, so its delta is zero
        assert_eq!(totals.this_bill_cents, 30_000);
    }
}
