//! # State Module
//!
//! Session state for the dashboard.
//!
//! ## Why Multiple State Types?
//! Instead of a single `AppState` struct containing everything,
//! we use separate state types. This approach:
//!
//! 1. **Better Separation of Concerns**: Each state type has a single responsibility
//! 2. **Easier Testing**: Can construct individual states in isolation
//! 3. **Clearer Action Signatures**: Actions declare exactly what state they need
//! 4. **Reduced Contention**: Independent states don't block each other
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │          ┌──────────────────┬──────────────────┐                        │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │ EditorState  │  │ InvoiceForm  │  │ DashboardConfig  │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Arc<Mutex<  │  │  links +     │  │  api_base_url    │              │
//! │  │  ItemsEditor │  │  clamp       │  │  currency        │              │
//! │  │  >>          │  │  notices     │  │  company_name    │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • EditorState: Protected by Arc<Mutex<T>> for exclusive access        │
//! │  • InvoiceForm: Owned by one modal at a time, no sharing needed        │
//! │  • DashboardConfig: Read-only after initialization                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod invoice_form;
mod items_editor;

pub use config::DashboardConfig;
pub use invoice_form::InvoiceForm;
pub use items_editor::{EditorState, ItemsEditor};
