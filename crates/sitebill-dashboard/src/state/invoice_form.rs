//! # Invoice Form State
//!
//! Create/edit session for one invoice, enforcing the linking rules.
//!
//! ## The Rules Enforced Here
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Invoice Form Behavior                                │
//! │                                                                         │
//! │  No links:                                                             │
//! │    amount field is free-form manual entry                              │
//! │                                                                         │
//! │  Links exist:                                                          │
//! │    amount := Σ linked billed amounts (field read-only)                 │
//! │    manual entry attempts → InvoiceAmountLocked                         │
//! │                                                                         │
//! │  Linking an item:                                                      │
//! │    requested billed amount is clamped (never rejected) to              │
//! │      remaining = this_bill − billed on OTHER invoices                  │
//! │    a clamp produces a notice string for the toast                      │
//! │                                                                         │
//! │  build():                                                              │
//! │    validates the invoice number and re-asserts Σ links == amount       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use uuid::Uuid;

use sitebill_core::linking::{
    billed_on_other_invoices, clamp_billed_amount, remaining_billable, verify_linked_total,
    ClampedAmount,
};
use sitebill_core::validation::validate_invoice_number;
use sitebill_core::{
    CoreError, CoreResult, Invoice, InvoiceLink, InvoiceStatus, Money, OrderLineItem,
};

/// Create/edit session for one invoice.
#[derive(Debug, Clone)]
pub struct InvoiceForm {
    order_id: String,
    /// `None` while creating; the existing ID while editing.
    invoice_id: Option<String>,
    invoice_number: String,
    status: InvoiceStatus,
    manual_amount: Money,
    links: Vec<InvoiceLink>,
    issue_date: Option<DateTime<Utc>>,
    due_date: Option<DateTime<Utc>>,
    notes: Option<String>,
    /// Preserved across edits so updates keep the original timestamp.
    created_at: Option<DateTime<Utc>>,
    /// Clamp notices accumulated since the last `take_notices`.
    notices: Vec<String>,
}

impl InvoiceForm {
    /// Starts a form for a new invoice on an order.
    pub fn new(order_id: &str) -> Self {
        InvoiceForm {
            order_id: order_id.to_string(),
            invoice_id: None,
            invoice_number: String::new(),
            status: InvoiceStatus::default(),
            manual_amount: Money::zero(),
            links: Vec::new(),
            issue_date: None,
            due_date: None,
            notes: None,
            created_at: None,
            notices: Vec::new(),
        }
    }

    /// Starts a form editing an existing invoice.
    pub fn edit(invoice: &Invoice) -> Self {
        InvoiceForm {
            order_id: invoice.order_id.clone(),
            invoice_id: Some(invoice.id.clone()),
            invoice_number: invoice.invoice_number.clone(),
            status: invoice.status,
            manual_amount: Money::from_cents(invoice.manual_amount_cents),
            links: invoice.links.clone(),
            issue_date: invoice.issue_date,
            due_date: invoice.due_date,
            notes: invoice.notes.clone(),
            created_at: Some(invoice.created_at),
            notices: Vec::new(),
        }
    }

    /// Whether this form creates a new invoice (vs updating one).
    pub fn is_new(&self) -> bool {
        self.invoice_id.is_none()
    }

    /// The order this invoice belongs to.
    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    /// Current links.
    pub fn links(&self) -> &[InvoiceLink] {
        &self.links
    }

    /// Whether any line-item link exists (amount locked).
    pub fn has_links(&self) -> bool {
        !self.links.is_empty()
    }

    /// The invoice amount under the forcing rule.
    pub fn amount(&self) -> Money {
        if self.has_links() {
            self.links.iter().map(InvoiceLink::billed_amount).sum()
        } else {
            self.manual_amount
        }
    }

    /// Sets the invoice number.
    pub fn set_invoice_number(&mut self, number: &str) -> CoreResult<()> {
        validate_invoice_number(number)?;
        self.invoice_number = number.trim().to_string();
        Ok(())
    }

    /// Sets the status.
    pub fn set_status(&mut self, status: InvoiceStatus) {
        self.status = status;
    }

    /// Sets the issue date.
    pub fn set_issue_date(&mut self, date: Option<DateTime<Utc>>) {
        self.issue_date = date;
    }

    /// Sets the due date.
    pub fn set_due_date(&mut self, date: Option<DateTime<Utc>>) {
        self.due_date = date;
    }

    /// Sets the notes.
    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes;
    }

    /// Sets the free-form amount.
    ///
    /// Refused while links exist - the field is read-only then, and a
    /// programmatic caller bypassing the UI gets the same answer.
    pub fn set_manual_amount(&mut self, amount: Money) -> CoreResult<()> {
        if self.has_links() {
            return Err(CoreError::InvoiceAmountLocked);
        }
        self.manual_amount = amount;
        Ok(())
    }

    /// Links a line item with a requested billed amount.
    ///
    /// The amount is clamped to the item's remaining billable, computed
    /// against all OTHER invoices (the one being edited is excluded from
    /// its own ceiling). A clamp is silently applied and queued as a
    /// user-facing notice. Linking the same item again replaces its link.
    pub fn link_item(
        &mut self,
        item: &OrderLineItem,
        requested: Money,
        all_invoices: &[Invoice],
    ) -> ClampedAmount {
        let billed_elsewhere =
            billed_on_other_invoices(&item.id, all_invoices, self.invoice_id.as_deref());
        let remaining = remaining_billable(item, billed_elsewhere);
        let clamped = clamp_billed_amount(requested, remaining);

        if clamped.was_clamped {
            self.notices.push(format!(
                "Billed amount for \"{}\" was reduced to the remaining billable {}",
                item.product_service, remaining
            ));
        }

        let link = InvoiceLink {
            order_item_id: item.id.clone(),
            billed_amount_cents: clamped.amount.cents(),
        };
        match self
            .links
            .iter_mut()
            .find(|l| l.order_item_id == item.id)
        {
            Some(existing) => *existing = link,
            None => self.links.push(link),
        }

        clamped
    }

    /// Removes a link; returns whether one existed.
    ///
    /// When the last link goes, the amount field reverts to free-form
    /// manual entry.
    pub fn unlink_item(&mut self, item_id: &str) -> bool {
        let initial_len = self.links.len();
        self.links.retain(|l| l.order_item_id != item_id);
        self.links.len() != initial_len
    }

    /// Drains the accumulated clamp notices for display.
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    /// Builds the invoice for saving.
    ///
    /// Validates the invoice number and re-asserts the link-sum
    /// invariant - true by construction here, but a save path must not
    /// trust its caller.
    pub fn build(&self) -> CoreResult<Invoice> {
        validate_invoice_number(&self.invoice_number)?;

        let amount = self.amount();
        verify_linked_total(amount, &self.links)?;

        let now = Utc::now();
        Ok(Invoice {
            id: self
                .invoice_id
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            order_id: self.order_id.clone(),
            invoice_number: self.invoice_number.clone(),
            status: self.status,
            manual_amount_cents: self.manual_amount.cents(),
            links: self.links.clone(),
            issue_date: self.issue_date,
            due_date: self.due_date,
            notes: self.notes.clone(),
            created_at: self.created_at.unwrap_or(now),
            updated_at: now,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sitebill_core::LineItemKind;

    fn test_item(id: &str, amount_cents: i64, progress_bps: i64, prior_bps: i64) -> OrderLineItem {
        OrderLineItem {
            id: id.to_string(),
            order_id: "ord-1".to_string(),
            kind: LineItemKind::Item,
            product_service: "Structural steel".to_string(),
            description: None,
            quantity: None,
            unit_rate_cents: None,
            amount_cents,
            progress_overall_bps: Some(progress_bps),
            previously_invoiced_bps: Some(prior_bps),
            vendor_id: None,
            position: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_manual_amount_without_links() {
        let mut form = InvoiceForm::new("ord-1");
        form.set_invoice_number("INV-0001").unwrap();
        form.set_manual_amount(Money::from_cents(123_400)).unwrap();

        assert_eq!(form.amount().cents(), 123_400);
        let invoice = form.build().unwrap();
        assert_eq!(invoice.effective_amount().cents(), 123_400);
    }

    #[test]
    fn test_linked_amount_forces_total_and_locks_manual() {
        let mut form = InvoiceForm::new("ord-1");
        form.set_invoice_number("INV-0001").unwrap();

        // $1,000 line, 60% complete, 25% invoiced → this bill $350
        let item = test_item("item-1", 100_000, 6_000, 2_500);
        let clamped = form.link_item(&item, Money::from_cents(20_000), &[]);
        assert!(!clamped.was_clamped);

        assert_eq!(form.amount().cents(), 20_000);

        let err = form.set_manual_amount(Money::from_cents(1)).unwrap_err();
        assert!(matches!(err, CoreError::InvoiceAmountLocked));
    }

    #[test]
    fn test_over_entry_clamped_with_notice() {
        let mut form = InvoiceForm::new("ord-1");
        form.set_invoice_number("INV-0001").unwrap();

        let item = test_item("item-1", 100_000, 6_000, 2_500);
        // Remaining billable is $350.00; ask for $500.00
        let clamped = form.link_item(&item, Money::from_cents(50_000), &[]);

        assert!(clamped.was_clamped);
        assert_eq!(clamped.amount.cents(), 35_000);
        assert_eq!(form.amount().cents(), 35_000);

        let notices = form.take_notices();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].contains("Structural steel"));
        // Draining leaves the queue empty
        assert!(form.take_notices().is_empty());
    }

    #[test]
    fn test_relinking_replaces_not_duplicates() {
        let mut form = InvoiceForm::new("ord-1");
        let item = test_item("item-1", 100_000, 6_000, 2_500);

        form.link_item(&item, Money::from_cents(10_000), &[]);
        form.link_item(&item, Money::from_cents(20_000), &[]);

        assert_eq!(form.links().len(), 1);
        assert_eq!(form.amount().cents(), 20_000);
    }

    #[test]
    fn test_unlink_reverts_to_manual_amount() {
        let mut form = InvoiceForm::new("ord-1");
        form.set_manual_amount(Money::from_cents(99_900)).unwrap();

        let item = test_item("item-1", 100_000, 6_000, 2_500);
        form.link_item(&item, Money::from_cents(20_000), &[]);
        assert_eq!(form.amount().cents(), 20_000);

        assert!(form.unlink_item("item-1"));
        assert!(!form.unlink_item("item-1"));
        assert_eq!(form.amount().cents(), 99_900);
    }

    #[test]
    fn test_ceiling_excludes_the_invoice_being_edited() {
        // The draft being edited already links $10,000 of this item
        let existing = Invoice {
            id: "inv-draft".to_string(),
            order_id: "ord-1".to_string(),
            invoice_number: "INV-0001".to_string(),
            status: InvoiceStatus::Draft,
            manual_amount_cents: 0,
            links: vec![InvoiceLink {
                order_item_id: "item-1".to_string(),
                billed_amount_cents: 10_000,
            }],
            issue_date: None,
            due_date: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let item = test_item("item-1", 100_000, 6_000, 2_500);
        let mut form = InvoiceForm::edit(&existing);

        // Full $350.00 is still available to THIS invoice
        let clamped = form.link_item(&item, Money::from_cents(35_000), &[existing.clone()]);
        assert!(!clamped.was_clamped);
        assert_eq!(clamped.amount.cents(), 35_000);
    }

    #[test]
    fn test_build_requires_invoice_number() {
        let form = InvoiceForm::new("ord-1");
        let err = form.build().unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_build_keeps_created_at_when_editing() {
        let created_at = Utc::now() - chrono::Duration::days(7);
        let existing = Invoice {
            id: "inv-1".to_string(),
            order_id: "ord-1".to_string(),
            invoice_number: "INV-0001".to_string(),
            status: InvoiceStatus::Sent,
            manual_amount_cents: 5_000,
            links: Vec::new(),
            issue_date: None,
            due_date: None,
            notes: None,
            created_at,
            updated_at: created_at,
        };

        let built = InvoiceForm::edit(&existing).build().unwrap();
        assert_eq!(built.id, "inv-1");
        assert_eq!(built.created_at, created_at);
        assert!(built.updated_at > created_at);
    }
}
