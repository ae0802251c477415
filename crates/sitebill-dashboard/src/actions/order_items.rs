//! # Order Item Actions
//!
//! Load/save orchestration for the order-items editor.
//!
//! ## Save Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Click Save                                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Snapshot the working copy (editor stays as-is)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PUT /api/orders/{id}/items ── failure ──► UiError, editor UNTOUCHED   │
//! │       │                                    (still dirty, user retries) │
//! │       ▼                                                                 │
//! │  GET /api/orders/{id}/items  ← canonical refetch                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  load_order(canonical) → dirty flag clears, edit mode may exit         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Concurrent edits from other sessions are not reconciled - last write
//! wins, and the refetch simply shows whatever won.

use tracing::{debug, info};

use crate::error::UiError;
use crate::state::EditorState;
use sitebill_client::ApiClient;
use sitebill_core::billing::OrderTotals;
use sitebill_core::validation::validate_uuid;
use sitebill_core::CoreError;

/// Loads an order's line items into the editor.
///
/// ## Returns
/// The number of rows loaded.
pub async fn load_order_items(
    client: &ApiClient,
    editor: &EditorState,
    order_id: &str,
) -> Result<usize, UiError> {
    validate_uuid(order_id).map_err(|e| UiError::validation(e.to_string()))?;
    debug!(order_id = %order_id, "load_order_items action");

    let items = client.order_items().list(order_id).await?;
    let count = items.len();

    editor.with_editor_mut(|e| e.load_order(order_id, items));

    info!(order_id = %order_id, rows = count, "Order items loaded");
    Ok(count)
}

/// Saves the editor's working copy, then refetches canonical state.
///
/// The refetch happens BEFORE edit mode may exit, and a failed PUT
/// leaves the working copy untouched - no partial application.
///
/// ## Returns
/// Footer totals of the canonical post-save state.
pub async fn save_order_items(
    client: &ApiClient,
    editor: &EditorState,
) -> Result<OrderTotals, UiError> {
    let (order_id, snapshot) =
        editor.with_editor(|e| (e.order_id().to_string(), e.items().to_vec()));

    if order_id.is_empty() {
        return Err(CoreError::NoOrderLoaded.into());
    }

    debug!(order_id = %order_id, rows = snapshot.len(), "save_order_items action");

    client.order_items().replace_all(&order_id, &snapshot).await?;

    // Canonical state comes from the follow-up GET, never the PUT echo
    let canonical = client.order_items().list(&order_id).await?;
    let totals = editor.with_editor_mut(|e| {
        e.load_order(&order_id, canonical);
        e.totals()
    });

    info!(
        order_id = %order_id,
        items = totals.item_count,
        this_bill_cents = totals.this_bill_cents,
        "Order items saved"
    );
    Ok(totals)
}

/// Discards unsaved edits by reloading canonical state.
pub async fn discard_order_edits(
    client: &ApiClient,
    editor: &EditorState,
) -> Result<usize, UiError> {
    let order_id = editor.with_editor(|e| e.order_id().to_string());
    if order_id.is_empty() {
        return Err(CoreError::NoOrderLoaded.into());
    }

    debug!(order_id = %order_id, "discard_order_edits action");
    load_order_items(client, editor, &order_id).await
}
