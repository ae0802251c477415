//! # Invoice Actions
//!
//! Load/save orchestration for invoices and their line-item links.

use tracing::{debug, info};

use crate::error::UiError;
use crate::state::InvoiceForm;
use sitebill_client::ApiClient;
use sitebill_core::Invoice;

/// Loads all invoices for an order.
pub async fn load_invoices(client: &ApiClient, order_id: &str) -> Result<Vec<Invoice>, UiError> {
    debug!(order_id = %order_id, "load_invoices action");
    Ok(client.invoices().list(order_id).await?)
}

/// Saves the invoice assembled in a form.
///
/// `build()` re-validates the invoice number and re-asserts the
/// link-sum invariant before anything goes on the wire; a violation
/// surfaces as a business-logic error and nothing is sent.
pub async fn save_invoice(client: &ApiClient, form: &InvoiceForm) -> Result<Invoice, UiError> {
    let invoice = form.build()?;
    debug!(
        order_id = %invoice.order_id,
        invoice_number = %invoice.invoice_number,
        linked = invoice.links.len(),
        "save_invoice action"
    );

    let saved = if form.is_new() {
        client.invoices().create(form.order_id(), &invoice).await?
    } else {
        client.invoices().update(form.order_id(), &invoice).await?
    };

    info!(
        invoice_id = %saved.id,
        amount_cents = saved.effective_amount().cents(),
        "Invoice saved"
    );
    Ok(saved)
}

/// Deletes an invoice.
pub async fn delete_invoice(
    client: &ApiClient,
    order_id: &str,
    invoice_id: &str,
) -> Result<(), UiError> {
    debug!(order_id = %order_id, invoice_id = %invoice_id, "delete_invoice action");
    client.invoices().delete(order_id, invoice_id).await?;
    info!(invoice_id = %invoice_id, "Invoice deleted");
    Ok(())
}
