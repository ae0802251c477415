//! # Invoice Repository
//!
//! Backend operations for an order's invoices.
//!
//! Invoices are scoped under their order:
//! `GET/POST /api/orders/{orderId}/invoices` and
//! `PATCH/DELETE /api/orders/{orderId}/invoices/{id}`.
//!
//! The wire payload always carries the forced invoice amount (link sum
//! while links exist); see [`crate::dto::InvoiceDto::from_domain`].

use tracing::{debug, info};

use crate::client::ApiClient;
use crate::dto::InvoiceDto;
use crate::error::ClientResult;
use sitebill_core::Invoice;

/// Repository for invoice operations.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    client: ApiClient,
}

impl InvoiceRepository {
    /// Creates a new InvoiceRepository.
    pub fn new(client: ApiClient) -> Self {
        InvoiceRepository { client }
    }

    /// Fetches all invoices for an order.
    pub async fn list(&self, order_id: &str) -> ClientResult<Vec<Invoice>> {
        debug!(order_id = %order_id, "Listing invoices");

        let dtos: Vec<InvoiceDto> = self
            .client
            .get_json(&format!("/api/orders/{}/invoices", order_id))
            .await?;

        Ok(dtos
            .into_iter()
            .map(|dto| dto.into_domain(order_id))
            .collect())
    }

    /// Creates an invoice.
    pub async fn create(&self, order_id: &str, invoice: &Invoice) -> ClientResult<Invoice> {
        debug!(order_id = %order_id, invoice_number = %invoice.invoice_number, "Creating invoice");

        let created: InvoiceDto = self
            .client
            .post_json(
                &format!("/api/orders/{}/invoices", order_id),
                &InvoiceDto::from_domain(invoice),
            )
            .await?;

        info!(order_id = %order_id, invoice_number = %invoice.invoice_number, "Invoice created");
        Ok(created.into_domain(order_id))
    }

    /// Updates an existing invoice.
    pub async fn update(&self, order_id: &str, invoice: &Invoice) -> ClientResult<Invoice> {
        debug!(order_id = %order_id, invoice_id = %invoice.id, "Updating invoice");

        let updated: InvoiceDto = self
            .client
            .patch_json(
                &format!("/api/orders/{}/invoices/{}", order_id, invoice.id),
                &InvoiceDto::from_domain(invoice),
            )
            .await?;

        Ok(updated.into_domain(order_id))
    }

    /// Deletes an invoice.
    pub async fn delete(&self, order_id: &str, invoice_id: &str) -> ClientResult<()> {
        debug!(order_id = %order_id, invoice_id = %invoice_id, "Deleting invoice");

        self.client
            .delete(&format!("/api/orders/{}/invoices/{}", order_id, invoice_id))
            .await
    }
}
