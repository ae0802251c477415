//! # Order Repository
//!
//! Backend operations for orders themselves; their line items live in
//! [`crate::repository::order_items`].

use tracing::{debug, info};

use crate::client::ApiClient;
use crate::dto::OrderDto;
use crate::error::{ClientError, ClientResult};
use sitebill_core::Order;

/// Repository for order operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    client: ApiClient,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(client: ApiClient) -> Self {
        OrderRepository { client }
    }

    /// Fetches all orders.
    pub async fn list(&self) -> ClientResult<Vec<Order>> {
        debug!("Listing orders");

        let dtos: Vec<OrderDto> = self.client.get_json("/api/orders").await?;
        Ok(dtos.into_iter().map(OrderDto::into_domain).collect())
    }

    /// Fetches one order by ID.
    pub async fn get(&self, order_id: &str) -> ClientResult<Order> {
        debug!(order_id = %order_id, "Fetching order");

        let dto: OrderDto = self
            .client
            .get_json(&format!("/api/orders/{}", order_id))
            .await
            .map_err(|err| {
                if ApiClient::is_not_found(&err) {
                    ClientError::not_found("Order", order_id)
                } else {
                    err
                }
            })?;

        Ok(dto.into_domain())
    }

    /// Creates an order.
    pub async fn create(&self, order: &Order) -> ClientResult<Order> {
        debug!(title = %order.title, "Creating order");

        let created: OrderDto = self
            .client
            .post_json("/api/orders", &OrderDto::from_domain(order))
            .await?;

        info!(title = %order.title, "Order created");
        Ok(created.into_domain())
    }

    /// Updates an existing order.
    pub async fn update(&self, order: &Order) -> ClientResult<Order> {
        debug!(order_id = %order.id, "Updating order");

        let updated: OrderDto = self
            .client
            .patch_json(
                &format!("/api/orders/{}", order.id),
                &OrderDto::from_domain(order),
            )
            .await?;

        Ok(updated.into_domain())
    }
}
