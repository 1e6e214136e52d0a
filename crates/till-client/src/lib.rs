//! # till-client: Collaborators & Services for Till POS
//!
//! Everything that waits on the network lives here. The only two suspension
//! points that matter to the cart are the catalog refresh and the bill
//! submission; both are owned by services in this crate.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Till Client Architecture                         │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    PosSession (one per terminal)                 │  │
//! │  │                                                                  │  │
//! │  │  Owns the Cart, wires cart notifications to the emitter          │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │         ┌─────────────────────┼─────────────────────┐                  │
//! │         ▼                     ▼                     ▼                   │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │ CatalogService │  │  Transaction   │  │  AnalyticsService      │    │
//! │  │                │  │  Submitter     │  │                        │    │
//! │  │ Last request   │  │ Idle →         │  │ Revenue, per-category, │    │
//! │  │ wins refresh   │  │ Submitting →   │  │ per-item, recent bills │    │
//! │  │                │  │ Succeeded/Fail │  │                        │    │
//! │  └───────┬────────┘  └───────┬────────┘  └───────────┬────────────┘    │
//! │          └───────────────────┼───────────────────────┘                  │
//! │                              ▼                                          │
//! │                 PosBackend ◄── HttpBackend (reqwest)                   │
//! │                                                                         │
//! │  NOTIFICATIONS (to the presentation layer via PosEventEmitter):        │
//! │  • on_cart_changed      - every cart mutation                          │
//! │  • on_catalog_refreshed - every applied refresh                        │
//! │  • on_submission_result - every attempt that reached the service       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use till_client::{ClientConfig, NoOpEmitter, PosSession};
//!
//! let config = ClientConfig::load(None)?;
//! let session = PosSession::connect(&config, Arc::new(NoOpEmitter))?;
//! session.start().await?;
//!
//! session.add_item(1).await;
//! if let Some(bill) = session.complete_transaction().await? {
//!     println!("{} {}", bill.bill_number, bill.total_amount);
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod analytics;
pub mod backend;
pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod http;
pub mod session;
pub mod submit;

#[cfg(test)]
pub(crate) mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use analytics::{AnalyticsService, Dashboard, DashboardSection, SectionFailure};
pub use backend::{CreatedBill, PosBackend};
pub use catalog::CatalogService;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ErrorKind, Notice};
pub use events::{NoOpEmitter, PosEventEmitter};
pub use http::HttpBackend;
pub use session::PosSession;
pub use submit::{SubmissionState, TransactionSubmitter};
