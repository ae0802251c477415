//! # Domain Types
//!
//! Core domain types used throughout SiteBill.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Customer ──► Contract ──► Order ──► OrderLineItem                      │
//! │                              │            │                             │
//! │                              │            └── vendor_id ──► Vendor      │
//! │                              │                                          │
//! │                              └──► Invoice ──► InvoiceLink ──┐           │
//! │                                                             │           │
//! │                             (order_item_id back-reference) ─┘           │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Percent      │   │  LineItemKind   │   │  InvoiceStatus  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (i64)      │   │  MainCategory   │   │  Draft          │       │
//! │  │  6000 = 60%     │   │  SubCategory    │   │  Sent / Paid    │       │
//! │  │  may be < 0     │   │  Item           │   │  Void           │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for cross-references
//! - Business ID: (invoice_number, contract_number, etc.) - human-readable

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::Sub;
use ts_rs::TS;

use crate::billing::{derive_billing, BillingDerived};
use crate::money::Money;

// =============================================================================
// Percent
// =============================================================================

/// A percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 6000 bps = 60% progress on a line item
///
/// ## Why Signed?
/// The new-progress percent is the literal difference
/// `progress_overall - previously_invoiced` and is deliberately NOT
/// clamped: when prior invoicing ran ahead of actual progress the delta
/// goes negative and the bill becomes a credit. Range enforcement to
/// [0, 100] happens only where a user types a value (see
/// [`crate::validation::clamp_progress_input`]), never inside the math.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Percent(i64);

impl Percent {
    /// Creates a percent from basis points.
    #[inline]
    pub const fn from_bps(bps: i64) -> Self {
        Percent(bps)
    }

    /// Creates a percent from a percentage value (`60.0` → 60%).
    ///
    /// Non-finite input degrades to zero; this is the coercion point for
    /// numbers arriving from the wire, so it must never produce garbage.
    pub fn from_percentage(pct: f64) -> Self {
        if !pct.is_finite() {
            return Percent(0);
        }
        Percent((pct * 100.0).round() as i64)
    }

    /// Creates a percent from a ratio of two cent amounts.
    ///
    /// Used by analytics for completion ratios. A non-positive
    /// denominator yields zero.
    pub fn from_ratio(numerator: i64, denominator: i64) -> Self {
        if denominator <= 0 {
            return Percent(0);
        }
        let scaled = numerator as i128 * 10_000;
        let rounded = if scaled >= 0 {
            (scaled + denominator as i128 / 2) / denominator as i128
        } else {
            (scaled - denominator as i128 / 2) / denominator as i128
        };
        Percent(rounded as i64)
    }

    /// Returns the value in basis points.
    #[inline]
    pub const fn bps(&self) -> i64 {
        self.0
    }

    /// Returns the value as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percent(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (credit-style progress delta).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Clamps to the closed interval [0%, 100%].
    ///
    /// Applied when a percent is typed into the dashboard; stored values
    /// and computed deltas are left untouched.
    #[inline]
    pub fn clamped(&self) -> Percent {
        Percent(self.0.clamp(0, 10_000))
    }
}

impl Default for Percent {
    fn default() -> Self {
        Percent::zero()
    }
}

/// Signed difference of two percents (progress delta).
impl Sub for Percent {
    type Output = Percent;

    #[inline]
    fn sub(self, other: Percent) -> Percent {
        Percent(self.0 - other.0)
    }
}

impl std::fmt::Display for Percent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.percentage())
    }
}

// =============================================================================
// Line Item Kind
// =============================================================================

/// Row kind in an order's work breakdown.
///
/// Category rows are grouping headers: they carry a label and a position
/// but no financial values, and every derived billing figure for them is
/// zero regardless of what their numeric fields contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    /// Top-level grouping header (e.g. "02 - Sitework").
    MainCategory,
    /// Nested grouping header under a main category.
    SubCategory,
    /// A billable row carrying quantity, rate, amount, and progress.
    Item,
}

impl LineItemKind {
    /// Returns true for the two grouping-header kinds.
    #[inline]
    pub const fn is_category(&self) -> bool {
        matches!(self, LineItemKind::MainCategory | LineItemKind::SubCategory)
    }
}

impl Default for LineItemKind {
    fn default() -> Self {
        LineItemKind::Item
    }
}

// =============================================================================
// Order Line Item
// =============================================================================

/// One row of an order's billable work breakdown.
///
/// ## Derived Fields Are Not Here
/// The API carries `completedAmount`, `previouslyInvoicedAmount`,
/// `newProgressPct` and `thisBill` alongside these fields, but they are a
/// cache of `(amount, progress_overall, previously_invoiced)` and are
/// recomputed on every use via [`OrderLineItem::billing`]. Storing them on
/// the type invites divergence between stored and displayed values.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderLineItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Order this row belongs to.
    pub order_id: String,

    /// Row kind: category header or billable item.
    pub kind: LineItemKind,

    /// Display label ("Concrete footings", "03 - Concrete", ...).
    pub product_service: String,

    /// Optional free-form detail under the label.
    pub description: Option<String>,

    /// Quantity; fractional values are common (2.5 tons, 0.75 acres).
    pub quantity: Option<f64>,

    /// Unit rate in cents; empty until entered or derived from
    /// amount / quantity.
    pub unit_rate_cents: Option<i64>,

    /// Line amount in cents - the base for all percentage calculations.
    /// Typically quantity × rate but may be entered independently.
    pub amount_cents: i64,

    /// Cumulative percent of this row's work completed to date, in bps.
    /// Clamped to [0, 100]% at entry; absent until first reported.
    pub progress_overall_bps: Option<i64>,

    /// Cumulative percent already billed on prior invoices, in bps.
    /// Clamped to [0, 100]% at entry; absent until first invoiced.
    pub previously_invoiced_bps: Option<i64>,

    /// Vendor assigned to perform this row's work, if any.
    pub vendor_id: Option<String>,

    /// Display position within the order (drag-drop reordering).
    pub position: i64,

    /// When the row was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the row was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl OrderLineItem {
    /// Returns the line amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }

    /// Returns the unit rate as Money, if set.
    #[inline]
    pub fn unit_rate(&self) -> Option<Money> {
        self.unit_rate_cents.map(Money::from_cents)
    }

    /// Returns the overall progress percent, if reported.
    #[inline]
    pub fn progress_overall(&self) -> Option<Percent> {
        self.progress_overall_bps.map(Percent::from_bps)
    }

    /// Returns the previously invoiced percent, if any.
    #[inline]
    pub fn previously_invoiced(&self) -> Option<Percent> {
        self.previously_invoiced_bps.map(Percent::from_bps)
    }

    /// Returns true for grouping-header rows.
    #[inline]
    pub fn is_category(&self) -> bool {
        self.kind.is_category()
    }

    /// Computes the four derived billing figures for this row.
    ///
    /// Category rows always yield all-zero figures.
    pub fn billing(&self) -> BillingDerived {
        derive_billing(
            self.kind,
            self.amount(),
            self.progress_overall(),
            self.previously_invoiced(),
        )
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// The lifecycle status of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Being assembled; amount and links still editable.
    Draft,
    /// Issued to the customer.
    Sent,
    /// Payment received in full.
    Paid,
    /// Cancelled; excluded from billed-to-date rollups.
    Void,
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Draft
    }
}

/// A link between an invoice and one order line item.
///
/// Records how much of the item's billable progress this invoice
/// captures. Linking never mutates the item's stored percents - rolling
/// `previously_invoiced` forward is a separate, manual follow-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceLink {
    /// The linked line item.
    pub order_item_id: String,

    /// Amount billed against that item on this invoice, in cents.
    pub billed_amount_cents: i64,
}

impl InvoiceLink {
    /// Returns the billed amount as Money.
    #[inline]
    pub fn billed_amount(&self) -> Money {
        Money::from_cents(self.billed_amount_cents)
    }
}

/// A billing event against an order.
///
/// ## Amount Rule
/// While any line-item link exists the invoice amount is forced to the
/// sum of linked billed amounts and is not independently editable; with
/// no links it reverts to the free-form `manual_amount_cents`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Invoice {
    pub id: String,
    pub order_id: String,
    /// Human-readable invoice number (business identifier).
    pub invoice_number: String,
    pub status: InvoiceStatus,
    /// Free-form amount used only while no links exist.
    pub manual_amount_cents: i64,
    /// Line-item links; may be empty.
    pub links: Vec<InvoiceLink>,
    #[ts(as = "Option<String>")]
    pub issue_date: Option<DateTime<Utc>>,
    #[ts(as = "Option<String>")]
    pub due_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Returns true while any line-item link exists.
    #[inline]
    pub fn has_links(&self) -> bool {
        !self.links.is_empty()
    }

    /// Sum of linked billed amounts.
    pub fn linked_total(&self) -> Money {
        self.links.iter().map(InvoiceLink::billed_amount).sum()
    }

    /// The invoice amount under the forcing rule: Σ links while links
    /// exist, otherwise the manually entered amount.
    pub fn effective_amount(&self) -> Money {
        if self.has_links() {
            self.linked_total()
        } else {
            Money::from_cents(self.manual_amount_cents)
        }
    }

    /// Amount this invoice bills against one specific line item.
    pub fn billed_against(&self, order_item_id: &str) -> Money {
        self.links
            .iter()
            .filter(|l| l.order_item_id == order_item_id)
            .map(InvoiceLink::billed_amount)
            .sum()
    }

    /// Whether this invoice counts toward billed-to-date rollups.
    #[inline]
    pub fn counts_toward_billing(&self) -> bool {
        self.status != InvoiceStatus::Void
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer that contracts work.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Soft delete flag.
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Contract
// =============================================================================

/// The lifecycle status of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    Draft,
    Active,
    Complete,
    Cancelled,
}

impl Default for ContractStatus {
    fn default() -> Self {
        ContractStatus::Draft
    }
}

/// A signed contract with a customer; the parent of orders.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Contract {
    pub id: String,
    pub customer_id: String,
    /// Human-readable contract number (business identifier).
    pub contract_number: String,
    pub title: String,
    /// Total contract value in cents.
    pub value_cents: i64,
    pub status: ContractStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Contract {
    /// Returns the contract value as Money.
    #[inline]
    pub fn value(&self) -> Money {
        Money::from_cents(self.value_cents)
    }
}

// =============================================================================
// Order
// =============================================================================

/// The lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Work breakdown being edited.
    Open,
    /// Progress billing in flight.
    Invoicing,
    /// Fully billed and closed out.
    Closed,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Open
    }
}

/// A unit of contracted work carrying a line-item breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    pub id: String,
    /// Parent contract, when the order was created from one.
    pub contract_id: Option<String>,
    pub customer_id: String,
    pub title: String,
    pub status: OrderStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Vendor
// =============================================================================

/// A subcontractor/vendor assignable to line items.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Vendor {
    pub id: String,
    pub name: String,
    /// Trade specialty ("Electrical", "Concrete", ...).
    pub trade: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Soft delete flag.
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_from_bps() {
        let pct = Percent::from_bps(6_000);
        assert_eq!(pct.bps(), 6_000);
        assert!((pct.percentage() - 60.0).abs() < 0.001);
    }

    #[test]
    fn test_percent_from_percentage() {
        assert_eq!(Percent::from_percentage(60.0).bps(), 6_000);
        assert_eq!(Percent::from_percentage(8.25).bps(), 825);
        // Non-finite input degrades to zero, never garbage
        assert_eq!(Percent::from_percentage(f64::NAN).bps(), 0);
        assert_eq!(Percent::from_percentage(f64::INFINITY).bps(), 0);
    }

    #[test]
    fn test_percent_subtraction_may_go_negative() {
        let delta = Percent::from_bps(3_000) - Percent::from_bps(5_000);
        assert_eq!(delta.bps(), -2_000);
        assert!(delta.is_negative());
    }

    #[test]
    fn test_percent_clamped() {
        assert_eq!(Percent::from_bps(-500).clamped().bps(), 0);
        assert_eq!(Percent::from_bps(15_000).clamped().bps(), 10_000);
        assert_eq!(Percent::from_bps(4_200).clamped().bps(), 4_200);
    }

    #[test]
    fn test_percent_from_ratio() {
        // 350_000 of 1_000_000 = 35%
        assert_eq!(Percent::from_ratio(350_000, 1_000_000).bps(), 3_500);
        // Zero denominator degrades to zero
        assert_eq!(Percent::from_ratio(350_000, 0).bps(), 0);
    }

    #[test]
    fn test_line_item_kind_category_check() {
        assert!(LineItemKind::MainCategory.is_category());
        assert!(LineItemKind::SubCategory.is_category());
        assert!(!LineItemKind::Item.is_category());
    }

    #[test]
    fn test_invoice_effective_amount_forcing_rule() {
        let mut invoice = Invoice {
            id: "inv-1".to_string(),
            order_id: "ord-1".to_string(),
            invoice_number: "INV-0001".to_string(),
            status: InvoiceStatus::Draft,
            manual_amount_cents: 123_400,
            links: Vec::new(),
            issue_date: None,
            due_date: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        // No links: manual amount wins
        assert_eq!(invoice.effective_amount().cents(), 123_400);

        // Links exist: amount forced to the link sum, manual ignored
        invoice.links.push(InvoiceLink {
            order_item_id: "item-1".to_string(),
            billed_amount_cents: 50_000,
        });
        invoice.links.push(InvoiceLink {
            order_item_id: "item-2".to_string(),
            billed_amount_cents: 25_000,
        });
        assert_eq!(invoice.effective_amount().cents(), 75_000);
        assert_eq!(invoice.billed_against("item-1").cents(), 50_000);
    }

    #[test]
    fn test_void_invoice_excluded_from_billing() {
        let invoice = Invoice {
            id: "inv-1".to_string(),
            order_id: "ord-1".to_string(),
            invoice_number: "INV-0001".to_string(),
            status: InvoiceStatus::Void,
            manual_amount_cents: 0,
            links: Vec::new(),
            issue_date: None,
            due_date: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(!invoice.counts_toward_billing());
    }
}
