//! # SiteBill Dashboard Layer
//!
//! Session state and actions for the SiteBill dashboard.
//!
//! ## Module Organization
//! ```text
//! sitebill_dashboard/
//! ├── lib.rs          ◄─── You are here (wiring & tracing init)
//! ├── state/
//! │   ├── mod.rs           ◄─── State type exports
//! │   ├── items_editor.rs  ◄─── Order line-item edit session
//! │   ├── invoice_form.rs  ◄─── Invoice create/edit session
//! │   └── config.rs        ◄─── Dashboard configuration
//! ├── actions/
//! │   ├── mod.rs           ◄─── Action exports
//! │   ├── order_items.rs   ◄─── Load/save-with-refetch for items
//! │   ├── invoices.rs      ◄─── Invoice save with invariant checks
//! │   ├── directory.rs     ◄─── Customer/vendor/contract/order CRUD
//! │   └── analytics.rs     ◄─── Reporting card loaders
//! ├── view.rs         ◄─── Client-side table filter/sort helpers
//! └── error.rs        ◄─── UI-facing error type
//! ```
//!
//! ## Execution Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Dashboard Execution Model                            │
//! │                                                                         │
//! │  • Field edits are SYNCHRONOUS: a keystroke mutates the editor         │
//! │    session on the calling task, derived figures recompute on read      │
//! │                                                                         │
//! │  • Backend calls are ASYNC and unordered relative to each other,       │
//! │    with two exceptions:                                                │
//! │      1. a save is followed by a refetch of canonical state BEFORE      │
//! │         edit mode exits                                                │
//! │      2. nothing - concurrent sessions are last-write-wins, no          │
//! │         optimistic locking                                             │
//! │                                                                         │
//! │  • No automatic retries; a failure is one toast and pre-save state     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod actions;
pub mod error;
pub mod state;
pub mod view;

pub use error::{ErrorCode, UiError};
pub use state::{DashboardConfig, EditorState, InvoiceForm, ItemsEditor};

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=sitebill=trace` - Show trace for sitebill crates only
/// - Default: INFO level, debug for sitebill crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sitebill=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
