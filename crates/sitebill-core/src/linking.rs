//! # Invoice Linking
//!
//! Reconciliation rules between invoices and order line items.
//!
//! ## The Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Invoice ↔ Line Item Linking                            │
//! │                                                                         │
//! │  1. REMAINING BILLABLE (per item, per invoice being edited)            │
//! │     remaining = this_bill_amount − Σ billed on OTHER invoices          │
//! │                                                                         │
//! │  2. CLAMP AT ENTRY                                                     │
//! │     A billed amount above remaining is silently corrected DOWN to      │
//! │     remaining - never rejected - and the correction is surfaced as     │
//! │     a user-facing notice.                                              │
//! │                                                                         │
//! │  3. FORCED TOTAL                                                       │
//! │     While links exist:  invoice_amount := Σ billed_amounts             │
//! │     (read-only in the UI). No links: free-form manual entry.           │
//! │                                                                         │
//! │  4. SAVE INVARIANT                                                     │
//! │     Σ(linked billed amounts) == invoice_amount, re-checked at every    │
//! │     save while any link exists.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Linking records billed amounts; it does NOT advance the items'
//! `previously_invoiced` percents. Rolling those forward after an invoice
//! goes out is a manual follow-up in the dashboard.

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Invoice, InvoiceLink, OrderLineItem};

// =============================================================================
// Remaining Billable
// =============================================================================

/// How much of an item's current bill other invoices have not yet taken.
///
/// `exclude_invoice_id` is the invoice being edited, so its own existing
/// links don't count against itself when re-opening a draft.
pub fn billed_on_other_invoices(
    order_item_id: &str,
    invoices: &[Invoice],
    exclude_invoice_id: Option<&str>,
) -> Money {
    invoices
        .iter()
        .filter(|inv| inv.counts_toward_billing())
        .filter(|inv| exclude_invoice_id != Some(inv.id.as_str()))
        .map(|inv| inv.billed_against(order_item_id))
        .sum()
}

/// The ceiling for a new billed amount against one item.
///
/// Negative results are possible (this bill is a credit, or other
/// invoices over-billed); the clamp handles them the same as any other
/// ceiling.
pub fn remaining_billable(item: &OrderLineItem, billed_elsewhere: Money) -> Money {
    item.billing().this_bill_amount - billed_elsewhere
}

// =============================================================================
// Clamp At Entry
// =============================================================================

/// A billed amount after entry-time clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClampedAmount {
    /// The amount actually recorded.
    pub amount: Money,
    /// True when the requested amount was corrected down.
    pub was_clamped: bool,
}

/// Clamps a requested billed amount to the item's remaining billable.
///
/// Silently corrects - never rejects - and flags the correction so the
/// dashboard can show a notice.
pub fn clamp_billed_amount(requested: Money, remaining: Money) -> ClampedAmount {
    if requested > remaining {
        ClampedAmount {
            amount: remaining,
            was_clamped: true,
        }
    } else {
        ClampedAmount {
            amount: requested,
            was_clamped: false,
        }
    }
}

// =============================================================================
// Forced Total & Save Invariant
// =============================================================================

/// Sum of billed amounts over a set of links.
pub fn linked_total(links: &[InvoiceLink]) -> Money {
    links.iter().map(InvoiceLink::billed_amount).sum()
}

/// Verifies the save invariant: while links exist, the invoice amount
/// must equal the link sum to the cent.
///
/// The forcing rule makes this true by construction inside the dashboard,
/// but a save built from stale or hand-assembled state re-checks here.
pub fn verify_linked_total(invoice_amount: Money, links: &[InvoiceLink]) -> CoreResult<()> {
    if links.is_empty() {
        return Ok(());
    }

    let expected = linked_total(links);
    if invoice_amount != expected {
        return Err(CoreError::LinkedTotalMismatch {
            expected_cents: expected.cents(),
            actual_cents: invoice_amount.cents(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
