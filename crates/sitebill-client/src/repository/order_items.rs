//! # Order Items Repository
//!
//! Backend operations for an order's line-item work breakdown.
//!
//! ## Save Model: Full Replacement + Refetch
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Item Save Lifecycle                                  │
//! │                                                                         │
//! │  1. LOAD                                                               │
//! │     └── list() → GET /api/orders/{id}/items                            │
//! │                  (stored derived fields IGNORED, recomputed locally)   │
//! │                                                                         │
//! │  2. EDIT (in the dashboard's ItemsEditor, not here)                    │
//! │                                                                         │
//! │  3. SAVE                                                               │
//! │     └── replace_all() → PUT /api/orders/{id}/items { items: [...] }    │
//! │         Response body DISCARDED                                        │
//! │                                                                         │
//! │  4. REFETCH                                                            │
//! │     └── list() again → canonical state, before edit mode exits         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use crate::client::ApiClient;
use crate::dto::{ItemsEnvelope, OrderItemDto};
use crate::error::ClientResult;
use sitebill_core::OrderLineItem;

/// Repository for order line-item operations.
#[derive(Debug, Clone)]
pub struct OrderItemsRepository {
    client: ApiClient,
}

impl OrderItemsRepository {
    /// Creates a new OrderItemsRepository.
    pub fn new(client: ApiClient) -> Self {
        OrderItemsRepository { client }
    }

    /// Fetches the full item set for an order.
    ///
    /// Rows come back sorted by their stored position; rows without a
    /// position fall back to their array index.
    pub async fn list(&self, order_id: &str) -> ClientResult<Vec<OrderLineItem>> {
        debug!(order_id = %order_id, "Listing order items");

        let dtos: Vec<OrderItemDto> = self
            .client
            .get_json(&format!("/api/orders/{}/items", order_id))
            .await?;

        let mut items: Vec<OrderLineItem> = dtos
            .into_iter()
            .enumerate()
            .map(|(index, dto)| dto.into_domain(order_id, index as i64))
            .collect();
        items.sort_by_key(|item| item.position);

        Ok(items)
    }

    /// Replaces the full item set for an order.
    ///
    /// ## Why No Return Value
    /// The response body is discarded: callers refetch via [`Self::list`]
    /// so canonical post-save state has exactly one source.
    pub async fn replace_all(&self, order_id: &str, items: &[OrderLineItem]) -> ClientResult<()> {
        debug!(order_id = %order_id, count = items.len(), "Replacing order items");

        let body = ItemsEnvelope {
            items: items.iter().map(OrderItemDto::from_domain).collect(),
        };

        self.client
            .put_discard(&format!("/api/orders/{}/items", order_id), &body)
            .await
    }
}
