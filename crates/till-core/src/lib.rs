//! # till-core: Pure Business Logic for Till POS
//!
//! This crate is the **heart** of Till POS. It owns the transaction state
//! machine (the cart), the catalog cache bookkeeping, and the money math,
//! all with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Till POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation (shell / web view)                 │   │
//! │  │   Category bar ──► Item grid ──► Cart panel ──► Confirmation    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ notifications                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                till-client (services, HTTP)                     │   │
//! │  │   CatalogService, TransactionSubmitter, AnalyticsService        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  catalog  │  │   │
//! │  │   │ Category  │  │   Money   │  │   Cart    │  │  Catalog  │  │   │
//! │  │   │   Bill    │  │  decimal  │  │ Snapshot  │  │   Cache   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO RENDERING                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Category, CatalogItem, Bill, analytics rows)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The cart engine and its change notifications
//! - [`catalog`] - Catalog cache with last-request-wins refresh tokens
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::{Cart, CatalogItem, Money};
//!
//! let tea = CatalogItem::new(1, "Tea", Money::from_cents(250));
//!
//! let mut cart = Cart::new();
//! cart.add_item(&tea);
//! cart.add_item(&tea);
//!
//! let snapshot = cart.snapshot();
//! assert_eq!(snapshot.lines[0].quantity, 2);
//! assert_eq!(snapshot.total, Money::from_cents(500));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartListener, CartSnapshot, LineChange, SnapshotLine};
pub use catalog::{CatalogCache, RefreshOutcome, RefreshTicket};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;
