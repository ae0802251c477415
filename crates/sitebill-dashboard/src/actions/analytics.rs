//! # Analytics Actions
//!
//! Fetch-then-fold loaders behind the reporting cards. All aggregation
//! is pure and lives in `sitebill_core::analytics`; these actions only
//! decide what to fetch.

use tracing::debug;

use crate::error::UiError;
use sitebill_client::ApiClient;
use sitebill_core::analytics::{
    vendor_workloads, ContractSummary, OrderBillingSummary, VendorWorkload,
};
use sitebill_core::Invoice;

/// Loads the billing summary card for one order.
pub async fn load_order_analytics(
    client: &ApiClient,
    order_id: &str,
) -> Result<OrderBillingSummary, UiError> {
    debug!(order_id = %order_id, "load_order_analytics action");

    let order_items = client.order_items();
    let invoices_repo = client.invoices();
    let (items, invoices) = tokio::try_join!(
        order_items.list(order_id),
        invoices_repo.list(order_id),
    )?;

    Ok(OrderBillingSummary::from_parts(order_id, &items, &invoices))
}

/// Loads vendor workload cards for one order.
pub async fn load_vendor_workloads(
    client: &ApiClient,
    order_id: &str,
) -> Result<Vec<VendorWorkload>, UiError> {
    debug!(order_id = %order_id, "load_vendor_workloads action");

    let items = client.order_items().list(order_id).await?;
    Ok(vendor_workloads(&items))
}

/// Loads the contract overview table: one summary row per contract.
pub async fn load_contract_summaries(
    client: &ApiClient,
) -> Result<Vec<ContractSummary>, UiError> {
    debug!("load_contract_summaries action");

    let contracts_repo = client.contracts();
    let orders_repo = client.orders();
    let (contracts, orders) = tokio::try_join!(
        contracts_repo.list(),
        orders_repo.list(),
    )?;

    let mut invoices: Vec<Invoice> = Vec::new();
    for order in &orders {
        invoices.extend(client.invoices().list(&order.id).await?);
    }

    Ok(contracts
        .iter()
        .map(|contract| ContractSummary::from_parts(contract, &orders, &invoices))
        .collect())
}
