//! # Items Editor State
//!
//! Working copy of one order's line-item breakdown while it is being
//! edited.
//!
//! ## Edit Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Items Editor Operations                              │
//! │                                                                         │
//! │  Frontend Action          Action Function         Editor Change         │
//! │  ───────────────          ───────────────         ─────────────         │
//! │                                                                         │
//! │  Open order ─────────────► load_order_items() ──► load_order(items)     │
//! │                                                                         │
//! │  Type amount ────────────► (sync call) ─────────► set_amount()          │
//! │                                                   + auto-rate refire    │
//! │  Type progress % ────────► (sync call) ─────────► set_progress_*()      │
//! │                                                   clamped to [0,100]    │
//! │  Drag row ───────────────► (sync call) ─────────► move_row(from, to)    │
//! │                                                                         │
//! │  Click Save ─────────────► save_order_items() ──► PUT + refetch +       │
//! │                                                   load_order(canonical) │
//! │                                                                         │
//! │  NOTE: every edit recomputes nothing - derived figures are read        │
//! │        through OrderLineItem::billing() on demand, so there is no      │
//! │        cached value to go stale.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use sitebill_core::billing::{derive_unit_rate, OrderTotals};
use sitebill_core::validation::{
    clamp_progress_input, validate_amount_cents, validate_product_service, validate_quantity,
};
use sitebill_core::{
    CoreError, CoreResult, LineItemKind, Money, OrderLineItem, MAX_ORDER_ITEMS,
};

/// Working copy of one order's line items.
///
/// ## Invariants
/// - `position` always equals the row's index after any structural edit
/// - Progress percents are clamped to [0, 100] the moment they are set
/// - A save failure leaves the working copy untouched (still dirty)
#[derive(Debug, Clone, Default)]
pub struct ItemsEditor {
    order_id: String,
    items: Vec<OrderLineItem>,
    dirty: bool,
}

impl ItemsEditor {
    /// Creates an editor with no order loaded.
    pub fn detached() -> Self {
        ItemsEditor::default()
    }

    /// Replaces the working copy with canonical backend state.
    ///
    /// Called on first load and again after every successful save
    /// (the refetch), which is also what clears the dirty flag.
    pub fn load_order(&mut self, order_id: &str, mut items: Vec<OrderLineItem>) {
        items.sort_by_key(|item| item.position);
        self.order_id = order_id.to_string();
        self.items = items;
        self.renumber();
        self.dirty = false;
    }

    /// The loaded order's ID; empty while detached.
    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    /// Whether an order is loaded.
    pub fn has_order(&self) -> bool {
        !self.order_id.is_empty()
    }

    /// The working rows, in display order.
    pub fn items(&self) -> &[OrderLineItem] {
        &self.items
    }

    /// Whether unsaved edits exist.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Footer totals over the working copy.
    pub fn totals(&self) -> OrderTotals {
        OrderTotals::from_items(&self.items)
    }

    // -------------------------------------------------------------------------
    // Field edits
    // -------------------------------------------------------------------------

    /// Sets a row's quantity; `None` clears it.
    ///
    /// Changing the quantity re-fires auto-rate derivation: an empty
    /// unit rate fills from amount / quantity, a populated one is left
    /// alone.
    pub fn set_quantity(&mut self, item_id: &str, quantity: Option<f64>) -> CoreResult<()> {
        if let Some(qty) = quantity {
            validate_quantity(qty)?;
        }

        let item = self.item_mut(item_id)?;
        item.quantity = quantity;
        item.unit_rate_cents =
            derive_unit_rate(item.unit_rate(), item.amount(), item.quantity).map(|m| m.cents());
        item.updated_at = Utc::now();
        self.dirty = true;
        Ok(())
    }

    /// Sets a row's amount - the base for every percentage figure.
    ///
    /// Also re-fires auto-rate derivation, same as a quantity change.
    pub fn set_amount(&mut self, item_id: &str, amount: Money) -> CoreResult<()> {
        validate_amount_cents(amount.cents())?;

        let item = self.item_mut(item_id)?;
        item.amount_cents = amount.cents();
        item.unit_rate_cents =
            derive_unit_rate(item.unit_rate(), item.amount(), item.quantity).map(|m| m.cents());
        item.updated_at = Utc::now();
        self.dirty = true;
        Ok(())
    }

    /// Sets a row's unit rate directly; `None` clears it.
    ///
    /// A manually entered rate always wins over derivation; clearing it
    /// re-arms derivation for the next amount/quantity change.
    pub fn set_unit_rate(&mut self, item_id: &str, rate: Option<Money>) -> CoreResult<()> {
        let item = self.item_mut(item_id)?;
        item.unit_rate_cents = rate.map(|m| m.cents());
        item.updated_at = Utc::now();
        self.dirty = true;
        Ok(())
    }

    /// Sets a row's overall progress percent from raw user input.
    ///
    /// The value is clamped to [0, 100] here, at the point of entry;
    /// `None` (or a non-finite number) clears it back to "not reported".
    pub fn set_progress_overall(&mut self, item_id: &str, raw: Option<f64>) -> CoreResult<()> {
        let stored = raw
            .filter(|v| v.is_finite())
            .map(|v| clamp_progress_input(v).bps());

        let item = self.item_mut(item_id)?;
        item.progress_overall_bps = stored;
        item.updated_at = Utc::now();
        self.dirty = true;
        Ok(())
    }

    /// Sets a row's previously-invoiced percent from raw user input.
    ///
    /// Same clamping as [`Self::set_progress_overall`]. Nothing here
    /// stops this exceeding the overall progress: the resulting negative
    /// delta (a credit bill) is intended behavior.
    pub fn set_previously_invoiced(&mut self, item_id: &str, raw: Option<f64>) -> CoreResult<()> {
        let stored = raw
            .filter(|v| v.is_finite())
            .map(|v| clamp_progress_input(v).bps());

        let item = self.item_mut(item_id)?;
        item.previously_invoiced_bps = stored;
        item.updated_at = Utc::now();
        self.dirty = true;
        Ok(())
    }

    /// Sets a row's product/service label.
    pub fn set_product_service(&mut self, item_id: &str, label: &str) -> CoreResult<()> {
        validate_product_service(label)?;

        let item = self.item_mut(item_id)?;
        item.product_service = label.to_string();
        item.updated_at = Utc::now();
        self.dirty = true;
        Ok(())
    }

    /// Sets a row's free-form description; `None` clears it.
    pub fn set_description(&mut self, item_id: &str, description: Option<String>) -> CoreResult<()> {
        let item = self.item_mut(item_id)?;
        item.description = description;
        item.updated_at = Utc::now();
        self.dirty = true;
        Ok(())
    }

    /// Assigns (or unassigns) a vendor to a row.
    pub fn assign_vendor(&mut self, item_id: &str, vendor_id: Option<String>) -> CoreResult<()> {
        let item = self.item_mut(item_id)?;
        item.vendor_id = vendor_id;
        item.updated_at = Utc::now();
        self.dirty = true;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Structural edits
    // -------------------------------------------------------------------------

    /// Appends a new row and returns its ID.
    pub fn add_row(&mut self, kind: LineItemKind, product_service: &str) -> CoreResult<String> {
        if !self.has_order() {
            return Err(CoreError::NoOrderLoaded);
        }
        validate_product_service(product_service)?;
        if self.items.len() >= MAX_ORDER_ITEMS {
            return Err(CoreError::OrderTooLarge {
                max: MAX_ORDER_ITEMS,
            });
        }

        let now = Utc::now();
        let id = Uuid::new_v4().to_string();
        debug!(order_id = %self.order_id, id = %id, ?kind, "Adding row");

        self.items.push(OrderLineItem {
            id: id.clone(),
            order_id: self.order_id.clone(),
            kind,
            product_service: product_service.to_string(),
            description: None,
            quantity: None,
            unit_rate_cents: None,
            amount_cents: 0,
            progress_overall_bps: None,
            previously_invoiced_bps: None,
            vendor_id: None,
            position: self.items.len() as i64,
            created_at: now,
            updated_at: now,
        });
        self.dirty = true;
        Ok(id)
    }

    /// Removes a row by ID.
    pub fn remove_row(&mut self, item_id: &str) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|item| item.id != item_id);

        if self.items.len() == initial_len {
            return Err(CoreError::ItemNotFound(item_id.to_string()));
        }

        self.renumber();
        self.dirty = true;
        Ok(())
    }

    /// Moves a row from one index to another (drag-drop reorder).
    ///
    /// Positions are renumbered afterwards so they stay dense.
    pub fn move_row(&mut self, from: usize, to: usize) -> CoreResult<()> {
        if from >= self.items.len() || to >= self.items.len() {
            return Err(CoreError::Validation(
                sitebill_core::ValidationError::OutOfRange {
                    field: "row index".to_string(),
                    min: 0,
                    max: self.items.len().saturating_sub(1) as i64,
                },
            ));
        }
        if from == to {
            return Ok(());
        }

        let row = self.items.remove(from);
        self.items.insert(to, row);
        self.renumber();
        self.dirty = true;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn item_mut(&mut self, item_id: &str) -> CoreResult<&mut OrderLineItem> {
        self.items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()))
    }

    fn renumber(&mut self) {
        for (index, item) in self.items.iter_mut().enumerate() {
            item.position = index as i64;
        }
    }
}

// =============================================================================
// Shared Editor State
// =============================================================================

/// Shared editor state.
///
/// ## Thread Safety
/// Uses `Arc<Mutex<ItemsEditor>>` because:
/// - `Arc`: Allows shared ownership across async tasks
/// - `Mutex`: Ensures only one task modifies the working copy at a time
///
/// ## Why Not RwLock?
/// Editor operations are quick and most of them write. An RwLock would
/// add complexity with minimal benefit.
#[derive(Debug, Clone)]
pub struct EditorState {
    editor: Arc<Mutex<ItemsEditor>>,
}

impl EditorState {
    /// Creates a detached editor state.
    pub fn new() -> Self {
        EditorState {
            editor: Arc::new(Mutex::new(ItemsEditor::detached())),
        }
    }

    /// Executes a function with read access to the editor.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = editor_state.with_editor(|e| e.totals());
    /// ```
    pub fn with_editor<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ItemsEditor) -> R,
    {
        let editor = self.editor.lock().expect("Editor mutex poisoned");
        f(&editor)
    }

    /// Executes a function with write access to the editor.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// editor_state.with_editor_mut(|e| e.set_amount(&id, amount))?;
    /// ```
    pub fn with_editor_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut ItemsEditor) -> R,
    {
        let mut editor = self.editor.lock().expect("Editor mutex poisoned");
        f(&mut editor)
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_editor() -> ItemsEditor {
        let mut editor = ItemsEditor::detached();
        editor.load_order("ord-1", Vec::new());
        editor
    }

    #[test]
    fn test_detached_editor_rejects_adds() {
        let mut editor = ItemsEditor::detached();
        let err = editor.add_row(LineItemKind::Item, "Rebar").unwrap_err();
        assert!(matches!(err, CoreError::NoOrderLoaded));
    }

    #[test]
    fn test_load_sorts_and_clears_dirty() {
        let mut editor = loaded_editor();
        editor.add_row(LineItemKind::Item, "Rebar").unwrap();
        assert!(editor.is_dirty());

        // Refetch replaces the working copy and clears the flag
        editor.load_order("ord-1", Vec::new());
        assert!(!editor.is_dirty());
        assert!(editor.items().is_empty());
    }

    #[test]
    fn test_auto_rate_fires_on_amount_and_quantity_changes() {
        let mut editor = loaded_editor();
        let id = editor.add_row(LineItemKind::Item, "Gravel").unwrap();

        // Amount alone: no quantity yet, no rate derived
        editor.set_amount(&id, Money::from_cents(50_000)).unwrap();
        assert_eq!(editor.items()[0].unit_rate_cents, None);

        // Quantity arrives: rate fills from amount / quantity
        editor.set_quantity(&id, Some(10.0)).unwrap();
        assert_eq!(editor.items()[0].unit_rate_cents, Some(5_000));
    }

    #[test]
    fn test_manual_rate_survives_amount_changes() {
        let mut editor = loaded_editor();
        let id = editor.add_row(LineItemKind::Item, "Gravel").unwrap();

        editor.set_unit_rate(&id, Some(Money::from_cents(2_500))).unwrap();
        editor.set_amount(&id, Money::from_cents(50_000)).unwrap();
        editor.set_quantity(&id, Some(10.0)).unwrap();

        // Derivation never overwrites a populated rate
        assert_eq!(editor.items()[0].unit_rate_cents, Some(2_500));
    }

    #[test]
    fn test_cleared_rate_rearms_derivation() {
        let mut editor = loaded_editor();
        let id = editor.add_row(LineItemKind::Item, "Gravel").unwrap();

        editor.set_unit_rate(&id, Some(Money::from_cents(2_500))).unwrap();
        editor.set_unit_rate(&id, None).unwrap();
        editor.set_amount(&id, Money::from_cents(50_000)).unwrap();
        assert_eq!(editor.items()[0].unit_rate_cents, None);

        editor.set_quantity(&id, Some(10.0)).unwrap();
        assert_eq!(editor.items()[0].unit_rate_cents, Some(5_000));
    }

    #[test]
    fn test_progress_entry_clamped() {
        let mut editor = loaded_editor();
        let id = editor.add_row(LineItemKind::Item, "Framing").unwrap();

        editor.set_progress_overall(&id, Some(250.0)).unwrap();
        assert_eq!(editor.items()[0].progress_overall_bps, Some(10_000));

        editor.set_previously_invoiced(&id, Some(-10.0)).unwrap();
        assert_eq!(editor.items()[0].previously_invoiced_bps, Some(0));

        // NaN clears rather than storing garbage
        editor.set_progress_overall(&id, Some(f64::NAN)).unwrap();
        assert_eq!(editor.items()[0].progress_overall_bps, None);

        editor.set_progress_overall(&id, None).unwrap();
        assert_eq!(editor.items()[0].progress_overall_bps, None);
    }

    #[test]
    fn test_negative_delta_survives_entry() {
        let mut editor = loaded_editor();
        let id = editor.add_row(LineItemKind::Item, "Framing").unwrap();

        editor.set_amount(&id, Money::from_cents(100_000)).unwrap();
        editor.set_progress_overall(&id, Some(30.0)).unwrap();
        editor.set_previously_invoiced(&id, Some(50.0)).unwrap();

        let derived = editor.items()[0].billing();
        assert_eq!(derived.new_progress.bps(), -2_000);
        assert_eq!(derived.this_bill_amount.cents(), -20_000);
    }

    #[test]
    fn test_move_row_renumbers_positions() {
        let mut editor = loaded_editor();
        let a = editor.add_row(LineItemKind::MainCategory, "02 - Sitework").unwrap();
        let b = editor.add_row(LineItemKind::Item, "Excavation").unwrap();
        let c = editor.add_row(LineItemKind::Item, "Backfill").unwrap();

        editor.move_row(2, 0).unwrap();

        let ids: Vec<&str> = editor.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec![c.as_str(), a.as_str(), b.as_str()]);

        let positions: Vec<i64> = editor.items().iter().map(|i| i.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_move_row_out_of_bounds() {
        let mut editor = loaded_editor();
        editor.add_row(LineItemKind::Item, "Excavation").unwrap();

        let err = editor.move_row(0, 5).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_remove_row() {
        let mut editor = loaded_editor();
        let a = editor.add_row(LineItemKind::Item, "Excavation").unwrap();
        let b = editor.add_row(LineItemKind::Item, "Backfill").unwrap();

        editor.remove_row(&a).unwrap();
        assert_eq!(editor.items().len(), 1);
        assert_eq!(editor.items()[0].id, b);
        assert_eq!(editor.items()[0].position, 0);

        let err = editor.remove_row("missing").unwrap_err();
        assert!(matches!(err, CoreError::ItemNotFound(_)));
    }

    #[test]
    fn test_unknown_row_edit_fails() {
        let mut editor = loaded_editor();
        let err = editor
            .set_amount("missing", Money::from_cents(100))
            .unwrap_err();
        assert!(matches!(err, CoreError::ItemNotFound(_)));
    }

    #[test]
    fn test_totals_track_edits() {
        let mut editor = loaded_editor();
        let id = editor.add_row(LineItemKind::Item, "Excavation").unwrap();
        editor.set_amount(&id, Money::from_cents(100_000)).unwrap();
        editor.set_progress_overall(&id, Some(40.0)).unwrap();
        editor.set_previously_invoiced(&id, Some(10.0)).unwrap();

        let totals = editor.totals();
        assert_eq!(totals.item_count, 1);
        assert_eq!(totals.amount_cents, 100_000);
        assert_eq!(totals.completed_cents, 40_000);
        assert_eq!(totals.this_bill_cents, 30_000);
    }

    #[test]
    fn test_editor_state_shared_access() {
        let state = EditorState::new();
        state.with_editor_mut(|e| e.load_order("ord-1", Vec::new()));

        let id = state
            .with_editor_mut(|e| e.add_row(LineItemKind::Item, "Rebar"))
            .unwrap();
        state
            .with_editor_mut(|e| e.set_amount(&id, Money::from_cents(500)))
            .unwrap();

        assert_eq!(state.with_editor(|e| e.totals().amount_cents), 500);
        assert!(state.with_editor(|e| e.is_dirty()));
    }
}
