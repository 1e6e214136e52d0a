//! # Presentation Notifications
//!
//! The core never reaches into rendering. The presentation layer implements
//! [`PosEventEmitter`] and the session calls it after every observable
//! change:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  on_cart_changed(snapshot)          cart panel re-render               │
//! │  on_catalog_refreshed(cats, items)  category bar + item grid           │
//! │  on_submission_result(bill | err)   confirmation or dismissible notice │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use till_core::{Bill, CartListener, CartSnapshot, CatalogItem, Category};

use crate::error::ClientError;

/// Notifications for the presentation layer (implemented by the shell).
pub trait PosEventEmitter: Send + Sync {
    fn on_cart_changed(&self, snapshot: &CartSnapshot);

    fn on_catalog_refreshed(&self, categories: &[Category], items: &[CatalogItem]);

    /// Called once per submission attempt that reached the collaborator.
    fn on_submission_result(&self, result: Result<&Bill, &ClientError>);
}

/// No-op event emitter for headless use and tests.
pub struct NoOpEmitter;

impl PosEventEmitter for NoOpEmitter {
    fn on_cart_changed(&self, _snapshot: &CartSnapshot) {}
    fn on_catalog_refreshed(&self, _categories: &[Category], _items: &[CatalogItem]) {}
    fn on_submission_result(&self, _result: Result<&Bill, &ClientError>) {}
}

/// Forwards cart notifications from the core cart to an emitter.
pub(crate) struct CartForwarder(pub(crate) Arc<dyn PosEventEmitter>);

impl CartListener for CartForwarder {
    fn on_cart_changed(&self, snapshot: &CartSnapshot) {
        self.0.on_cart_changed(snapshot);
    }
}
