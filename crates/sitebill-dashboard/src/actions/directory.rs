//! # Directory Actions
//!
//! CRUD passthroughs for customers, vendors, contracts and orders.
//! These are the modal-backed tables of the dashboard: the logic is in
//! the backend, this layer adds logging and error translation.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::UiError;
use sitebill_client::ApiClient;
use sitebill_core::{Contract, Customer, Order, OrderStatus, Vendor};

/// The two directories the line-item editor needs for its dropdowns,
/// fetched together.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Directory {
    pub customers: Vec<Customer>,
    pub vendors: Vec<Vendor>,
}

/// Loads customers and vendors concurrently.
pub async fn load_directory(client: &ApiClient) -> Result<Directory, UiError> {
    debug!("load_directory action");

    let customers_repo = client.customers();
    let vendors_repo = client.vendors();
    let (customers, vendors) = tokio::try_join!(
        customers_repo.list(),
        vendors_repo.list(),
    )?;

    Ok(Directory { customers, vendors })
}

// =============================================================================
// Customers
// =============================================================================

/// Creates or updates a customer.
pub async fn save_customer(
    client: &ApiClient,
    customer: &Customer,
    is_new: bool,
) -> Result<Customer, UiError> {
    debug!(name = %customer.name, is_new = is_new, "save_customer action");

    let saved = if is_new {
        client.customers().create(customer).await?
    } else {
        client.customers().update(customer).await?
    };

    info!(customer_id = %saved.id, "Customer saved");
    Ok(saved)
}

/// Deletes a customer.
pub async fn delete_customer(client: &ApiClient, customer_id: &str) -> Result<(), UiError> {
    debug!(customer_id = %customer_id, "delete_customer action");
    client.customers().delete(customer_id).await?;
    Ok(())
}

// =============================================================================
// Vendors
// =============================================================================

/// Creates or updates a vendor.
pub async fn save_vendor(
    client: &ApiClient,
    vendor: &Vendor,
    is_new: bool,
) -> Result<Vendor, UiError> {
    debug!(name = %vendor.name, is_new = is_new, "save_vendor action");

    let saved = if is_new {
        client.vendors().create(vendor).await?
    } else {
        client.vendors().update(vendor).await?
    };

    info!(vendor_id = %saved.id, "Vendor saved");
    Ok(saved)
}

/// Deletes a vendor.
pub async fn delete_vendor(client: &ApiClient, vendor_id: &str) -> Result<(), UiError> {
    debug!(vendor_id = %vendor_id, "delete_vendor action");
    client.vendors().delete(vendor_id).await?;
    Ok(())
}

// =============================================================================
// Contracts
// =============================================================================

/// Loads all contracts.
pub async fn load_contracts(client: &ApiClient) -> Result<Vec<Contract>, UiError> {
    debug!("load_contracts action");
    Ok(client.contracts().list().await?)
}

/// Creates or updates a contract.
pub async fn save_contract(
    client: &ApiClient,
    contract: &Contract,
    is_new: bool,
) -> Result<Contract, UiError> {
    debug!(contract_number = %contract.contract_number, is_new = is_new, "save_contract action");

    let saved = if is_new {
        client.contracts().create(contract).await?
    } else {
        client.contracts().update(contract).await?
    };

    info!(contract_id = %saved.id, "Contract saved");
    Ok(saved)
}

/// Deletes a contract.
pub async fn delete_contract(client: &ApiClient, contract_id: &str) -> Result<(), UiError> {
    debug!(contract_id = %contract_id, "delete_contract action");
    client.contracts().delete(contract_id).await?;
    Ok(())
}

// =============================================================================
// Orders
// =============================================================================

/// Loads all orders.
pub async fn load_orders(client: &ApiClient) -> Result<Vec<Order>, UiError> {
    debug!("load_orders action");
    Ok(client.orders().list().await?)
}

/// Loads one order.
pub async fn load_order(client: &ApiClient, order_id: &str) -> Result<Order, UiError> {
    debug!(order_id = %order_id, "load_order action");
    Ok(client.orders().get(order_id).await?)
}

/// Creates a new order.
pub async fn create_order(client: &ApiClient, order: &Order) -> Result<Order, UiError> {
    debug!(title = %order.title, "create_order action");
    let saved = client.orders().create(order).await?;
    info!(order_id = %saved.id, "Order created");
    Ok(saved)
}

/// Moves an order to a new lifecycle status.
pub async fn set_order_status(
    client: &ApiClient,
    order: &Order,
    status: OrderStatus,
) -> Result<Order, UiError> {
    debug!(order_id = %order.id, ?status, "set_order_status action");

    let mut updated = order.clone();
    updated.status = status;
    Ok(client.orders().update(&updated).await?)
}
