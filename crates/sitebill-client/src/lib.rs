//! # sitebill-client: Backend API Layer for SiteBill
//!
//! This crate provides access to the billing backend for the SiteBill
//! dashboard. The backend - routes under `/api/*`, persistence, auth -
//! is an external collaborator reached only through its JSON contracts.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SiteBill Data Flow                               │
//! │                                                                         │
//! │  Dashboard action (save_order_items)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  sitebill-client (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   ApiClient   │    │  Repositories │    │     DTOs     │  │   │
//! │  │   │  (client.rs)  │    │ (order_items, │    │   (dto.rs)   │  │   │
//! │  │   │               │    │  invoices...) │    │              │  │   │
//! │  │   │ reqwest pool  │◄───│ OrderItems    │◄───│ float↔cents  │  │   │
//! │  │   │ base URL/auth │    │ Invoices ...  │    │ coercion     │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Billing Backend (external)                  │   │
//! │  │   /api/orders/{id}/items, /api/customers, /api/vendors, ...    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`client`] - HTTP client configuration and repository access
//! - [`dto`] - Wire shapes and float/cents coercion
//! - [`error`] - Client error types
//! - [`repository`] - Repository implementations per resource
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sitebill_client::{ApiClient, ApiConfig};
//!
//! let config = ApiConfig::new("https://billing.example.com");
//! let client = ApiClient::new(config)?;
//!
//! // Use repositories
//! let items = client.order_items().list("order-uuid").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod dto;
pub mod error;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::{ApiClient, ApiConfig};
pub use error::{ClientError, ClientResult};

// Repository re-exports for convenience
pub use repository::contracts::ContractRepository;
pub use repository::customers::CustomerRepository;
pub use repository::invoices::InvoiceRepository;
pub use repository::order_items::OrderItemsRepository;
pub use repository::orders::OrderRepository;
pub use repository::vendors::VendorRepository;
