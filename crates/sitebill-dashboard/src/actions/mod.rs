//! # Actions Module
//!
//! The functions the dashboard frontend invokes. Every action takes the
//! state it needs explicitly - an [`sitebill_client::ApiClient`] and/or
//! a session state object - instead of reading ambient globals, and
//! returns `Result<T, UiError>` for a single user-facing toast on
//! failure.

pub mod analytics;
pub mod directory;
pub mod invoices;
pub mod order_items;

pub use analytics::{load_contract_summaries, load_order_analytics, load_vendor_workloads};
pub use directory::{
    create_order, delete_contract, delete_customer, delete_vendor, load_contracts,
    load_directory, load_order, load_orders, save_contract, save_customer, save_vendor,
    set_order_status, Directory,
};
pub use invoices::{delete_invoice, load_invoices, save_invoice};
pub use order_items::{discard_order_edits, load_order_items, save_order_items};
