//! # Terminal Session
//!
//! One register's worth of state: the cart, the catalog service and the
//! submitter, handed to the presentation layer as a single handle instead
//! of ambient globals.
//!
//! ## Checkout Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    complete_transaction()                               │
//! │                                                                         │
//! │  1. snapshot = cart.snapshot()          (lock held only for the copy)  │
//! │  2. result   = submitter.submit(snapshot).await                        │
//! │  3. emitter.on_submission_result(result)                               │
//! │  4. success → cart.settle(snapshot)     (explicit, separate step)      │
//! │     failure → cart untouched                                           │
//! │                                                                         │
//! │  The cart stays usable during step 2. Settling takes off only what     │
//! │  the bill covered, so lines added meanwhile survive.                   │
//! │                                                                         │
//! │  Steps 2 and 4 are not atomic. The returned Bill is the record that    │
//! │  the sale happened even if step 4 never runs.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tracing::{debug, info};

use till_core::{
    Bill, Cart, CartSnapshot, CatalogItem, Category, CategoryId, ItemId, LineChange,
    RefreshOutcome,
};

use crate::analytics::AnalyticsService;
use crate::backend::PosBackend;
use crate::catalog::CatalogService;
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::events::{CartForwarder, NoOpEmitter, PosEventEmitter};
use crate::http::HttpBackend;
use crate::submit::{SubmissionState, TransactionSubmitter};

/// Cart, catalog and billing for one terminal.
pub struct PosSession {
    cart: Mutex<Cart>,
    catalog: CatalogService,
    submitter: TransactionSubmitter,
    analytics: AnalyticsService,
    emitter: Arc<dyn PosEventEmitter>,
}

impl PosSession {
    pub fn new(backend: Arc<dyn PosBackend>, config: &ClientConfig) -> Self {
        Self::with_emitter(backend, config, Arc::new(NoOpEmitter))
    }

    pub fn with_emitter(
        backend: Arc<dyn PosBackend>,
        config: &ClientConfig,
        emitter: Arc<dyn PosEventEmitter>,
    ) -> Self {
        let mut cart = Cart::new();
        cart.subscribe(Arc::new(CartForwarder(emitter.clone())));

        PosSession {
            cart: Mutex::new(cart),
            catalog: CatalogService::with_emitter(backend.clone(), emitter.clone()),
            submitter: TransactionSubmitter::new(backend.clone()),
            analytics: AnalyticsService::new(backend, config.recent_bills_limit()),
            emitter,
        }
    }

    /// Session talking HTTP to the service named in `config`.
    pub fn connect(config: &ClientConfig, emitter: Arc<dyn PosEventEmitter>) -> ClientResult<Self> {
        let backend = Arc::new(HttpBackend::new(config)?);
        info!(
            terminal = config.terminal_name(),
            api = %backend.api_url(),
            "session created"
        );
        Ok(Self::with_emitter(backend, config, emitter))
    }

    /// Initial page load.
    pub async fn start(&self) -> ClientResult<RefreshOutcome> {
        self.catalog.load().await
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    pub async fn select_category(&self, filter: Option<CategoryId>) -> ClientResult<RefreshOutcome> {
        self.catalog.select_category(filter).await
    }

    pub async fn refresh_catalog(&self) -> ClientResult<RefreshOutcome> {
        self.catalog.refresh().await
    }

    pub async fn categories(&self) -> Vec<Category> {
        self.catalog.categories().await
    }

    pub async fn items(&self) -> Vec<CatalogItem> {
        self.catalog.items().await
    }

    pub async fn filter(&self) -> Option<CategoryId> {
        self.catalog.filter().await
    }

    pub fn catalog(&self) -> &CatalogService {
        &self.catalog
    }

    pub fn analytics(&self) -> &AnalyticsService {
        &self.analytics
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Adds one unit of a catalog item by id.
    ///
    /// Ids not in the current catalog are ignored (`Unchanged`).
    pub async fn add_item(&self, item_id: ItemId) -> LineChange {
        let Some(item) = self.catalog.item(item_id).await else {
            debug!(item_id, "add_item for id not in catalog ignored");
            return LineChange::Unchanged;
        };
        self.cart.lock().await.add_item(&item)
    }

    pub async fn remove_item(&self, item_id: ItemId) -> LineChange {
        self.cart.lock().await.remove_item(item_id)
    }

    pub async fn adjust_quantity(&self, item_id: ItemId, delta: i64) -> LineChange {
        self.cart.lock().await.adjust_quantity(item_id, delta)
    }

    pub async fn clear_cart(&self) -> LineChange {
        self.cart.lock().await.clear()
    }

    pub async fn snapshot(&self) -> CartSnapshot {
        self.cart.lock().await.snapshot()
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    pub fn submission_state(&self) -> SubmissionState {
        self.submitter.state()
    }

    pub fn subscribe_submission(&self) -> watch::Receiver<SubmissionState> {
        self.submitter.subscribe_state()
    }

    /// Submits the cart, reports the outcome, and settles the billed lines
    /// off the cart only if a bill was created.
    ///
    /// Returns `Ok(None)` for an empty cart.
    pub async fn complete_transaction(&self) -> ClientResult<Option<Bill>> {
        let snapshot = self.snapshot().await;

        let bill = match self.submitter.submit(&snapshot).await {
            Ok(Some(bill)) => bill,
            Ok(None) => return Ok(None),
            Err(err) => {
                self.emitter.on_submission_result(Err(&err));
                return Err(err);
            }
        };

        self.emitter.on_submission_result(Ok(&bill));
        let change = self.cart.lock().await.settle(&snapshot);
        debug!(bill_number = %bill.bill_number, ?change, "billed lines settled");
        Ok(Some(bill))
    }
}
