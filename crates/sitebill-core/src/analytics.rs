//! # Analytics Rollups
//!
//! Pure aggregations behind the dashboard's reporting cards.
//!
//! Everything here operates on already-fetched data; the action layer
//! decides what to load, these functions only fold it. Void invoices are
//! excluded from every billed-to-date figure.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::billing::OrderTotals;
use crate::money::Money;
use crate::types::{Contract, Invoice, Order, OrderLineItem, Percent};

// =============================================================================
// Order Billing Summary
// =============================================================================

/// Billing posture of one order: what the work is worth, what is
/// complete, what has been invoiced, and what is left.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderBillingSummary {
    pub order_id: String,
    /// Σ line amounts over item rows.
    pub total_cents: i64,
    /// Σ completed amounts over item rows.
    pub completed_cents: i64,
    /// Σ effective amounts of non-void invoices.
    pub invoiced_cents: i64,
    /// total − invoiced; may be negative when invoicing ran ahead.
    pub remaining_cents: i64,
    /// completed / total, as a percent.
    pub completion: Percent,
}

impl OrderBillingSummary {
    /// Folds an order's items and invoices into a summary.
    pub fn from_parts(order_id: &str, items: &[OrderLineItem], invoices: &[Invoice]) -> Self {
        let totals = OrderTotals::from_items(items);

        let invoiced: Money = invoices
            .iter()
            .filter(|inv| inv.counts_toward_billing())
            .map(Invoice::effective_amount)
            .sum();

        OrderBillingSummary {
            order_id: order_id.to_string(),
            total_cents: totals.amount_cents,
            completed_cents: totals.completed_cents,
            invoiced_cents: invoiced.cents(),
            remaining_cents: totals.amount_cents - invoiced.cents(),
            completion: Percent::from_ratio(totals.completed_cents, totals.amount_cents),
        }
    }
}

// =============================================================================
// Contract Summary
// =============================================================================

/// Rollup of one contract across its orders.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ContractSummary {
    pub contract_id: String,
    pub contract_number: String,
    pub order_count: usize,
    /// The signed contract value.
    pub value_cents: i64,
    /// Σ non-void invoice amounts across the contract's orders.
    pub invoiced_cents: i64,
}

impl ContractSummary {
    /// Folds a contract's orders and their invoices into a summary.
    ///
    /// `orders` and `invoices` may be broader sets; rows belonging to
    /// other contracts/orders are filtered out here.
    pub fn from_parts(contract: &Contract, orders: &[Order], invoices: &[Invoice]) -> Self {
        let contract_orders: Vec<&Order> = orders
            .iter()
            .filter(|o| o.contract_id.as_deref() == Some(contract.id.as_str()))
            .collect();

        let invoiced: Money = invoices
            .iter()
            .filter(|inv| inv.counts_toward_billing())
            .filter(|inv| contract_orders.iter().any(|o| o.id == inv.order_id))
            .map(Invoice::effective_amount)
            .sum();

        ContractSummary {
            contract_id: contract.id.clone(),
            contract_number: contract.contract_number.clone(),
            order_count: contract_orders.len(),
            value_cents: contract.value_cents,
            invoiced_cents: invoiced.cents(),
        }
    }
}

// =============================================================================
// Vendor Workload
// =============================================================================

/// Work assigned to one vendor across an order's line items.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VendorWorkload {
    pub vendor_id: String,
    /// Number of item rows assigned.
    pub item_count: usize,
    /// Σ assigned line amounts.
    pub amount_cents: i64,
}

/// Groups item rows by assigned vendor, largest workload first.
///
/// Unassigned rows and category headers are skipped.
pub fn vendor_workloads(items: &[OrderLineItem]) -> Vec<VendorWorkload> {
    let mut workloads: Vec<VendorWorkload> = Vec::new();

    for item in items.iter().filter(|i| !i.is_category()) {
        let Some(vendor_id) = item.vendor_id.as_deref() else {
            continue;
        };

        match workloads.iter_mut().find(|w| w.vendor_id == vendor_id) {
            Some(entry) => {
                entry.item_count += 1;
                entry.amount_cents += item.amount_cents;
            }
            None => workloads.push(VendorWorkload {
                vendor_id: vendor_id.to_string(),
                item_count: 1,
                amount_cents: item.amount_cents,
            }),
        }
    }

    workloads.sort_by(|a, b| b.amount_cents.cmp(&a.amount_cents));
    workloads
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        ContractStatus, InvoiceLink, InvoiceStatus, LineItemKind, OrderStatus,
    };
    use chrono::Utc;

    fn test_item(id: &str, amount_cents: i64, progress_bps: Option<i64>) -> OrderLineItem {
        OrderLineItem {
            id: id.to_string(),
            order_id: "ord-1".to_string(),
            kind: LineItemKind::Item,
            product_service: format!("Line {}", id),
            description: None,
            quantity: None,
            unit_rate_cents: None,
            amount_cents,
            progress_overall_bps: progress_bps,
            previously_invoiced_bps: None,
            vendor_id: None,
            position: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn test_invoice(order_id: &str, status: InvoiceStatus, amount_cents: i64) -> Invoice {
        Invoice {
            id: format!("inv-{}", amount_cents),
            order_id: order_id.to_string(),
            invoice_number: "INV-0001".to_string(),
            status,
            manual_amount_cents: amount_cents,
            links: Vec::new(),
            issue_date: None,
            due_date: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_order_billing_summary() {
        let items = vec![
            test_item("a", 600_000, Some(5_000)),
            test_item("b", 400_000, None),
        ];
        let invoices = vec![
            test_invoice("ord-1", InvoiceStatus::Sent, 200_000),
            test_invoice("ord-1", InvoiceStatus::Void, 999_999),
        ];

        let summary = OrderBillingSummary::from_parts("ord-1", &items, &invoices);
        assert_eq!(summary.total_cents, 1_000_000);
        assert_eq!(summary.completed_cents, 300_000);
        assert_eq!(summary.invoiced_cents, 200_000);
        assert_eq!(summary.remaining_cents, 800_000);
        assert_eq!(summary.completion.bps(), 3_000); // 30%
    }

    #[test]
    fn test_order_billing_summary_empty_order() {
        let summary = OrderBillingSummary::from_parts("ord-1", &[], &[]);
        assert_eq!(summary.total_cents, 0);
        assert_eq!(summary.completion, Percent::zero());
    }

    #[test]
    fn test_linked_invoice_uses_effective_amount() {
        let mut invoice = test_invoice("ord-1", InvoiceStatus::Sent, 1);
        invoice.links.push(InvoiceLink {
            order_item_id: "a".to_string(),
            billed_amount_cents: 150_000,
        });

        let summary = OrderBillingSummary::from_parts(
            "ord-1",
            &[test_item("a", 600_000, Some(5_000))],
            &[invoice],
        );
        // Forced link sum, not the stale manual amount
        assert_eq!(summary.invoiced_cents, 150_000);
    }

    #[test]
    fn test_contract_summary_filters_by_contract() {
        let contract = Contract {
            id: "con-1".to_string(),
            customer_id: "cust-1".to_string(),
            contract_number: "C-100".to_string(),
            title: "Warehouse shell".to_string(),
            value_cents: 5_000_000,
            status: ContractStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let order = |id: &str, contract_id: Option<&str>| Order {
            id: id.to_string(),
            contract_id: contract_id.map(str::to_string),
            customer_id: "cust-1".to_string(),
            title: id.to_string(),
            status: OrderStatus::Open,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let orders = vec![
            order("ord-1", Some("con-1")),
            order("ord-2", Some("con-1")),
            order("ord-3", Some("con-other")),
        ];
        let invoices = vec![
            test_invoice("ord-1", InvoiceStatus::Sent, 100_000),
            test_invoice("ord-2", InvoiceStatus::Paid, 50_000),
            test_invoice("ord-3", InvoiceStatus::Sent, 999_999),
        ];

        let summary = ContractSummary::from_parts(&contract, &orders, &invoices);
        assert_eq!(summary.order_count, 2);
        assert_eq!(summary.invoiced_cents, 150_000);
    }

    #[test]
    fn test_vendor_workloads_grouped_and_sorted() {
        let mut a = test_item("a", 100_000, None);
        a.vendor_id = Some("ven-1".to_string());
        let mut b = test_item("b", 300_000, None);
        b.vendor_id = Some("ven-2".to_string());
        let mut c = test_item("c", 50_000, None);
        c.vendor_id = Some("ven-1".to_string());
        let unassigned = test_item("d", 999_999, None);

        let workloads = vendor_workloads(&[a, b, c, unassigned]);
        assert_eq!(workloads.len(), 2);
        assert_eq!(workloads[0].vendor_id, "ven-2");
        assert_eq!(workloads[0].amount_cents, 300_000);
        assert_eq!(workloads[1].vendor_id, "ven-1");
        assert_eq!(workloads[1].item_count, 2);
        assert_eq!(workloads[1].amount_cents, 150_000);
    }
}
