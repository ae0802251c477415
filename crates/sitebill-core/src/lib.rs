//! # sitebill-core: Pure Business Logic for SiteBill
//!
//! This crate is the **heart** of SiteBill. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SiteBill Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Dashboard Frontend (TypeScript)                │   │
//! │  │    Orders Table ──► Progress Modal ──► Invoice Modal ──► Cards  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 sitebill-dashboard (sessions/actions)           │   │
//! │  │    load_order_items, save_order_items, save_invoice, ...        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ sitebill-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  billing  │  │  linking  │  │   │
//! │  │   │ LineItem  │  │   Money   │  │ progress  │  │  invoice  │  │   │
//! │  │   │  Invoice  │  │  Percent  │  │   math    │  │   links   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO DATABASE • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 sitebill-client (HTTP repositories)             │   │
//! │  │          GET/PUT /api/orders/{id}/items, invoices, ...          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (OrderLineItem, Invoice, Customer, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`billing`] - Progress-billing calculator and order totals
//! - [`linking`] - Invoice/line-item link reconciliation
//! - [`analytics`] - Pure rollups for dashboard reporting
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network, database, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Derived Never Stored**: Billing figures are recomputed from their three
//!    inputs on every use; the stored copies the API carries are ignored
//!
//! ## Example Usage
//!
//! ```rust
//! use sitebill_core::billing::derive_billing;
//! use sitebill_core::{LineItemKind, Money, Percent};
//!
//! // $10,000.00 contract line, 60% complete, 25% already invoiced
//! let derived = derive_billing(
//!     LineItemKind::Item,
//!     Money::from_cents(1_000_000),
//!     Some(Percent::from_bps(6_000)),
//!     Some(Percent::from_bps(2_500)),
//! );
//!
//! // This billing cycle captures the 35% delta
//! assert_eq!(derived.new_progress.bps(), 3_500);
//! assert_eq!(derived.this_bill_amount.cents(), 350_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod analytics;
pub mod billing;
pub mod error;
pub mod linking;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use sitebill_core::Money` instead of
// `use sitebill_core::money::Money`

pub use billing::{derive_billing, derive_unit_rate, BillingDerived, OrderTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum rows allowed in a single order's work breakdown
///
/// ## Business Reason
/// Parsed contracts occasionally explode into thousands of rows when a
/// schedule-of-values PDF is mangled; this cap keeps an editor session
/// (and the full-replacement PUT) at a size the backend accepts.
pub const MAX_ORDER_ITEMS: usize = 500;

/// Maximum length of a product/service description cell
///
/// ## Business Reason
/// Matches the backend column limit so a save never fails after the fact.
pub const MAX_PRODUCT_SERVICE_LEN: usize = 300;
