//! # Table View Helpers
//!
//! Client-side filtering and sorting for the dashboard's tables. These
//! operate on rows already fetched into memory - the backend is never
//! consulted for a filter keystroke or a column-header click.

use sitebill_core::{Customer, Invoice, OrderLineItem, Vendor};

// =============================================================================
// Sorting
// =============================================================================

/// Sortable columns of the order-items table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemSortKey {
    /// The stored drag-drop order (default).
    Position,
    /// Product/service label, case-insensitive.
    Label,
    /// Line amount.
    Amount,
    /// Overall progress percent; unreported rows sort first.
    Progress,
    /// This-bill amount (derived).
    ThisBill,
}

/// Sortable columns of the invoices table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceSortKey {
    Number,
    Amount,
    IssueDate,
}

/// Sorts item rows by a column.
///
/// Stable, so rows equal under the key keep their drag-drop order.
pub fn sort_items(items: &mut Vec<&OrderLineItem>, key: ItemSortKey, ascending: bool) {
    items.sort_by(|a, b| {
        let ordering = match key {
            ItemSortKey::Position => a.position.cmp(&b.position),
            ItemSortKey::Label => a
                .product_service
                .to_lowercase()
                .cmp(&b.product_service.to_lowercase()),
            ItemSortKey::Amount => a.amount_cents.cmp(&b.amount_cents),
            ItemSortKey::Progress => a.progress_overall_bps.cmp(&b.progress_overall_bps),
            ItemSortKey::ThisBill => a
                .billing()
                .this_bill_amount
                .cmp(&b.billing().this_bill_amount),
        };
        if ascending {
            ordering
        } else {
            ordering.reverse()
        }
    });
}

/// Sorts invoices by a column.
pub fn sort_invoices(invoices: &mut Vec<&Invoice>, key: InvoiceSortKey, ascending: bool) {
    invoices.sort_by(|a, b| {
        let ordering = match key {
            InvoiceSortKey::Number => a.invoice_number.cmp(&b.invoice_number),
            InvoiceSortKey::Amount => a.effective_amount().cmp(&b.effective_amount()),
            InvoiceSortKey::IssueDate => a.issue_date.cmp(&b.issue_date),
        };
        if ascending {
            ordering
        } else {
            ordering.reverse()
        }
    });
}

// =============================================================================
// Filtering
// =============================================================================

/// Filters item rows by a text query over label and description.
///
/// Case-insensitive substring match; an empty (or whitespace) query
/// returns every row.
pub fn filter_items<'a>(items: &'a [OrderLineItem], query: &str) -> Vec<&'a OrderLineItem> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items.iter().collect();
    }

    items
        .iter()
        .filter(|item| {
            item.product_service.to_lowercase().contains(&needle)
                || item
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Filters customers by name.
pub fn filter_customers<'a>(customers: &'a [Customer], query: &str) -> Vec<&'a Customer> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return customers.iter().collect();
    }

    customers
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&needle))
        .collect()
}

/// Filters vendors by name or trade.
pub fn filter_vendors<'a>(vendors: &'a [Vendor], query: &str) -> Vec<&'a Vendor> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return vendors.iter().collect();
    }

    vendors
        .iter()
        .filter(|v| {
            v.name.to_lowercase().contains(&needle)
                || v.trade
                    .as_deref()
                    .is_some_and(|t| t.to_lowercase().contains(&needle))
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sitebill_core::LineItemKind;

    fn test_item(id: &str, label: &str, amount_cents: i64, position: i64) -> OrderLineItem {
        OrderLineItem {
            id: id.to_string(),
            order_id: "ord-1".to_string(),
            kind: LineItemKind::Item,
            product_service: label.to_string(),
            description: None,
            quantity: None,
            unit_rate_cents: None,
            amount_cents,
            progress_overall_bps: None,
            previously_invoiced_bps: None,
            vendor_id: None,
            position,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_filter_items_case_insensitive() {
        let items = vec![
            test_item("a", "Concrete footings", 100, 0),
            test_item("b", "Structural steel", 200, 1),
            test_item("c", "Steel decking", 300, 2),
        ];

        let hits = filter_items(&items, "STEEL");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, "b");
        assert_eq!(hits[1].id, "c");
    }

    #[test]
    fn test_filter_items_matches_description() {
        let mut item = test_item("a", "Allowance", 100, 0);
        item.description = Some("Owner-selected fixtures".to_string());

        let items = vec![item, test_item("b", "Framing", 200, 1)];
        let hits = filter_items(&items, "fixtures");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "a");
    }

    #[test]
    fn test_filter_items_empty_query_returns_all() {
        let items = vec![
            test_item("a", "Concrete footings", 100, 0),
            test_item("b", "Structural steel", 200, 1),
        ];
        assert_eq!(filter_items(&items, "   ").len(), 2);
    }

    #[test]
    fn test_sort_items_by_amount_descending() {
        let items = vec![
            test_item("a", "Footings", 100, 0),
            test_item("b", "Steel", 300, 1),
            test_item("c", "Decking", 200, 2),
        ];

        let mut rows: Vec<&OrderLineItem> = items.iter().collect();
        sort_items(&mut rows, ItemSortKey::Amount, false);

        let ids: Vec<&str> = rows.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_sort_items_stable_on_ties() {
        let items = vec![
            test_item("a", "Footings", 100, 0),
            test_item("b", "Steel", 100, 1),
        ];

        let mut rows: Vec<&OrderLineItem> = items.iter().collect();
        sort_items(&mut rows, ItemSortKey::Amount, true);

        // Equal amounts keep their original order
        let ids: Vec<&str> = rows.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_sort_items_by_derived_this_bill() {
        let mut a = test_item("a", "Footings", 100_000, 0);
        a.progress_overall_bps = Some(1_000);
        a.previously_invoiced_bps = Some(0);
        let mut b = test_item("b", "Steel", 100_000, 1);
        b.progress_overall_bps = Some(5_000);
        b.previously_invoiced_bps = Some(0);

        let items = vec![a, b];
        let mut rows: Vec<&OrderLineItem> = items.iter().collect();
        sort_items(&mut rows, ItemSortKey::ThisBill, false);

        assert_eq!(rows[0].id, "b");
    }
}
