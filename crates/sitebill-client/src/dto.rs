//! # Wire DTOs
//!
//! JSON shapes exchanged with the billing backend, and the one place
//! float money/percent values are coerced into core's integer types.
//!
//! ## The Coercion Boundary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Wire ↔ Domain Boundary                               │
//! │                                                                         │
//! │  Backend JSON (floats, camelCase)        Core types (ints, typed)      │
//! │  ───────────────────────────────         ─────────────────────────     │
//! │  "amount": 10000.0            ──────►    amount_cents: 1_000_000       │
//! │  "progressOverallPct": 60     ──────►    progress_overall_bps: 6000    │
//! │  "rate": null / NaN           ──────►    None (degrades, never NaN)    │
//! │  "completedAmount": 6000.0    ──────►    IGNORED (recomputed)          │
//! │                                                                         │
//! │  On write the four derived fields are filled from a FRESH              │
//! │  derive_billing() so the stored copies can never drift from what       │
//! │  the dashboard displays.                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sitebill_core::money::Money;
use sitebill_core::types::{
    Contract, ContractStatus, Customer, Invoice, InvoiceLink, InvoiceStatus, LineItemKind,
    Order, OrderLineItem, OrderStatus, Percent, Vendor,
};

// =============================================================================
// Numeric Coercion
// =============================================================================

/// Coerces an optional wire number into Money, degrading to zero.
///
/// Missing, NaN and infinite values all become $0.00 - the calculator's
/// contract is "never NaN, never panic", and this is where that starts.
pub fn money_from_api(value: Option<f64>) -> Money {
    match value {
        Some(v) if v.is_finite() => Money::from_cents((v * 100.0).round() as i64),
        _ => Money::zero(),
    }
}

/// Coerces an optional wire number into an optional Money.
///
/// Unlike [`money_from_api`], absence stays absent - a missing unit rate
/// must remain "empty" so auto-rate derivation can fill it later.
pub fn opt_money_from_api(value: Option<f64>) -> Option<Money> {
    match value {
        Some(v) if v.is_finite() => Some(Money::from_cents((v * 100.0).round() as i64)),
        _ => None,
    }
}

/// Coerces an optional wire percent into an optional Percent.
///
/// Mirrors the `hasProgress` convention: null and NaN both mean "no
/// progress reported", which downstream derives as zero.
pub fn percent_from_api(value: Option<f64>) -> Option<Percent> {
    match value {
        Some(v) if v.is_finite() => Some(Percent::from_percentage(v)),
        _ => None,
    }
}

/// Money to a wire number (major units).
pub fn money_to_api(value: Money) -> f64 {
    value.cents() as f64 / 100.0
}

/// Optional Money to a wire number.
pub fn opt_money_to_api(value: Option<Money>) -> Option<f64> {
    value.map(money_to_api)
}

/// Optional Percent to a wire number.
pub fn percent_to_api(value: Option<Percent>) -> Option<f64> {
    value.map(|p| p.percentage())
}

// =============================================================================
// Order Line Items
// =============================================================================

/// Wire shape of one order line item.
///
/// `GET /api/orders/{orderId}/items` returns an array of these;
/// `PUT /api/orders/{orderId}/items` sends them back wrapped in
/// [`ItemsEnvelope`]. The four derived fields ride along in both
/// directions but are only ever written, never read back into domain
/// state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDto {
    pub id: Option<String>,

    #[serde(rename = "type", default)]
    pub kind: LineItemKind,

    #[serde(default)]
    pub product_service: String,

    pub description: Option<String>,

    pub qty: Option<f64>,
    pub rate: Option<f64>,
    pub amount: Option<f64>,

    pub progress_overall_pct: Option<f64>,
    pub previously_invoiced_pct: Option<f64>,

    // Derived fields: sent redundantly, recomputed client-side on every
    // read, refreshed on every write
    pub completed_amount: Option<f64>,
    pub previously_invoiced_amount: Option<f64>,
    pub new_progress_pct: Option<f64>,
    pub this_bill: Option<f64>,

    pub vendor_id: Option<String>,
    pub position: Option<i64>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl OrderItemDto {
    /// Converts a wire row into a domain row.
    ///
    /// The derived fields on the wire are ignored here; callers get them
    /// back through [`OrderLineItem::billing`], freshly computed.
    pub fn into_domain(self, order_id: &str, fallback_position: i64) -> OrderLineItem {
        let now = Utc::now();

        OrderLineItem {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            order_id: order_id.to_string(),
            kind: self.kind,
            product_service: self.product_service,
            description: self.description,
            quantity: self.qty.filter(|q| q.is_finite()),
            unit_rate_cents: opt_money_from_api(self.rate).map(|m| m.cents()),
            amount_cents: money_from_api(self.amount).cents(),
            progress_overall_bps: percent_from_api(self.progress_overall_pct).map(|p| p.bps()),
            previously_invoiced_bps: percent_from_api(self.previously_invoiced_pct)
                .map(|p| p.bps()),
            vendor_id: self.vendor_id,
            position: self.position.unwrap_or(fallback_position),
            created_at: self.created_at.unwrap_or(now),
            updated_at: self.updated_at.unwrap_or(now),
        }
    }

    /// Converts a domain row into its wire shape, recomputing the four
    /// derived fields so the backend stores exactly what is displayed.
    pub fn from_domain(item: &OrderLineItem) -> Self {
        let derived = item.billing();

        OrderItemDto {
            id: Some(item.id.clone()),
            kind: item.kind,
            product_service: item.product_service.clone(),
            description: item.description.clone(),
            qty: item.quantity,
            rate: opt_money_to_api(item.unit_rate()),
            amount: Some(money_to_api(item.amount())),
            progress_overall_pct: percent_to_api(item.progress_overall()),
            previously_invoiced_pct: percent_to_api(item.previously_invoiced()),
            completed_amount: Some(money_to_api(derived.completed_amount)),
            previously_invoiced_amount: Some(money_to_api(derived.previously_invoiced_amount)),
            new_progress_pct: Some(derived.new_progress.percentage()),
            this_bill: Some(money_to_api(derived.this_bill_amount)),
            vendor_id: item.vendor_id.clone(),
            position: Some(item.position),
            created_at: Some(item.created_at),
            updated_at: Some(item.updated_at),
        }
    }
}

/// Body of `PUT /api/orders/{orderId}/items` (full replacement).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemsEnvelope {
    pub items: Vec<OrderItemDto>,
}

// =============================================================================
// Invoices
// =============================================================================

/// Wire shape of one invoice link.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLinkDto {
    pub order_item_id: String,
    pub amount: Option<f64>,
}

/// Wire shape of one invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDto {
    pub id: Option<String>,
    #[serde(default)]
    pub invoice_number: String,
    pub status: Option<InvoiceStatus>,
    pub invoice_amount: Option<f64>,
    pub linked_line_items: Option<Vec<InvoiceLinkDto>>,
    pub issue_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl InvoiceDto {
    /// Converts a wire invoice into the domain type.
    pub fn into_domain(self, order_id: &str) -> Invoice {
        let now = Utc::now();

        Invoice {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            order_id: order_id.to_string(),
            invoice_number: self.invoice_number,
            status: self.status.unwrap_or_default(),
            manual_amount_cents: money_from_api(self.invoice_amount).cents(),
            links: self
                .linked_line_items
                .unwrap_or_default()
                .into_iter()
                .map(|l| InvoiceLink {
                    order_item_id: l.order_item_id,
                    billed_amount_cents: money_from_api(l.amount).cents(),
                })
                .collect(),
            issue_date: self.issue_date,
            due_date: self.due_date,
            notes: self.notes,
            created_at: self.created_at.unwrap_or(now),
            updated_at: self.updated_at.unwrap_or(now),
        }
    }

    /// Converts a domain invoice into its wire shape.
    ///
    /// `invoiceAmount` always carries [`Invoice::effective_amount`]: the
    /// forced link sum while links exist, the manual amount otherwise.
    pub fn from_domain(invoice: &Invoice) -> Self {
        InvoiceDto {
            id: Some(invoice.id.clone()),
            invoice_number: invoice.invoice_number.clone(),
            status: Some(invoice.status),
            invoice_amount: Some(money_to_api(invoice.effective_amount())),
            linked_line_items: Some(
                invoice
                    .links
                    .iter()
                    .map(|l| InvoiceLinkDto {
                        order_item_id: l.order_item_id.clone(),
                        amount: Some(money_to_api(l.billed_amount())),
                    })
                    .collect(),
            ),
            issue_date: invoice.issue_date,
            due_date: invoice.due_date,
            notes: invoice.notes.clone(),
            created_at: Some(invoice.created_at),
            updated_at: Some(invoice.updated_at),
        }
    }
}

// =============================================================================
// Directory Resources
// =============================================================================

/// Wire shape of a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_active: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl CustomerDto {
    pub fn into_domain(self) -> Customer {
        let now = Utc::now();
        Customer {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            is_active: self.is_active.unwrap_or(true),
            created_at: self.created_at.unwrap_or(now),
            updated_at: self.updated_at.unwrap_or(now),
        }
    }

    pub fn from_domain(customer: &Customer) -> Self {
        CustomerDto {
            id: Some(customer.id.clone()),
            name: customer.name.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
            address: customer.address.clone(),
            is_active: Some(customer.is_active),
            created_at: Some(customer.created_at),
            updated_at: Some(customer.updated_at),
        }
    }
}

/// Wire shape of a vendor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorDto {
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    pub trade: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl VendorDto {
    pub fn into_domain(self) -> Vendor {
        let now = Utc::now();
        Vendor {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: self.name,
            trade: self.trade,
            email: self.email,
            phone: self.phone,
            is_active: self.is_active.unwrap_or(true),
            created_at: self.created_at.unwrap_or(now),
            updated_at: self.updated_at.unwrap_or(now),
        }
    }

    pub fn from_domain(vendor: &Vendor) -> Self {
        VendorDto {
            id: Some(vendor.id.clone()),
            name: vendor.name.clone(),
            trade: vendor.trade.clone(),
            email: vendor.email.clone(),
            phone: vendor.phone.clone(),
            is_active: Some(vendor.is_active),
            created_at: Some(vendor.created_at),
            updated_at: Some(vendor.updated_at),
        }
    }
}

/// Wire shape of a contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDto {
    pub id: Option<String>,
    #[serde(default)]
    pub customer_id: String,
    #[serde(default)]
    pub contract_number: String,
    #[serde(default)]
    pub title: String,
    pub value: Option<f64>,
    pub status: Option<ContractStatus>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ContractDto {
    pub fn into_domain(self) -> Contract {
        let now = Utc::now();
        Contract {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            customer_id: self.customer_id,
            contract_number: self.contract_number,
            title: self.title,
            value_cents: money_from_api(self.value).cents(),
            status: self.status.unwrap_or_default(),
            created_at: self.created_at.unwrap_or(now),
            updated_at: self.updated_at.unwrap_or(now),
        }
    }

    pub fn from_domain(contract: &Contract) -> Self {
        ContractDto {
            id: Some(contract.id.clone()),
            customer_id: contract.customer_id.clone(),
            contract_number: contract.contract_number.clone(),
            title: contract.title.clone(),
            value: Some(money_to_api(contract.value())),
            status: Some(contract.status),
            created_at: Some(contract.created_at),
            updated_at: Some(contract.updated_at),
        }
    }
}

/// Wire shape of an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: Option<String>,
    pub contract_id: Option<String>,
    #[serde(default)]
    pub customer_id: String,
    #[serde(default)]
    pub title: String,
    pub status: Option<OrderStatus>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl OrderDto {
    pub fn into_domain(self) -> Order {
        let now = Utc::now();
        Order {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            contract_id: self.contract_id,
            customer_id: self.customer_id,
            title: self.title,
            status: self.status.unwrap_or_default(),
            created_at: self.created_at.unwrap_or(now),
            updated_at: self.updated_at.unwrap_or(now),
        }
    }

    pub fn from_domain(order: &Order) -> Self {
        OrderDto {
            id: Some(order.id.clone()),
            contract_id: order.contract_id.clone(),
            customer_id: order.customer_id.clone(),
            title: order.title.clone(),
            status: Some(order.status),
            created_at: Some(order.created_at),
            updated_at: Some(order.updated_at),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
