//! # Catalog Service
//!
//! Drives the core [`CatalogCache`] against the remote catalog.
//!
//! ## Refresh Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Catalog Refresh                                   │
//! │                                                                         │
//! │  select_category(Some(2))                                              │
//! │     │                                                                   │
//! │     ├── lock ── set_filter(2) ── begin_refresh() → ticket ── unlock     │
//! │     │                                                                   │
//! │     ├── fetch_items(2).await        (no lock held while waiting)        │
//! │     │                                                                   │
//! │     └── lock ── ticket current? ──┬── yes: replace items, notify       │
//! │                                   └── no:  drop response (Superseded)  │
//! │                                                                         │
//! │  A failed fetch for the current ticket leaves the cache untouched and  │
//! │  surfaces the error. A failed fetch for a superseded ticket is dropped.│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use till_core::validation::{validate_catalog, validate_categories, validate_item_draft};
use till_core::{
    CatalogCache, CatalogItem, Category, CategoryId, ItemDraft, ItemId, RefreshOutcome,
};

use crate::backend::PosBackend;
use crate::error::{ClientError, ClientResult};
use crate::events::{NoOpEmitter, PosEventEmitter};

/// Async owner of the catalog cache for one terminal.
pub struct CatalogService {
    backend: Arc<dyn PosBackend>,
    cache: Mutex<CatalogCache>,
    emitter: Arc<dyn PosEventEmitter>,
}

impl CatalogService {
    pub fn new(backend: Arc<dyn PosBackend>) -> Self {
        Self::with_emitter(backend, Arc::new(NoOpEmitter))
    }

    pub fn with_emitter(backend: Arc<dyn PosBackend>, emitter: Arc<dyn PosEventEmitter>) -> Self {
        CatalogService {
            backend,
            cache: Mutex::new(CatalogCache::new()),
            emitter,
        }
    }

    /// Initial page load: categories first, then items under the current
    /// filter.
    pub async fn load(&self) -> ClientResult<RefreshOutcome> {
        let categories = self.backend.fetch_categories().await?;
        validate_categories(&categories)
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))?;

        info!(count = categories.len(), "categories loaded");
        self.cache.lock().await.replace_categories(categories);
        self.refresh().await
    }

    /// Records the active filter without refreshing.
    pub async fn set_filter(&self, filter: Option<CategoryId>) {
        self.cache.lock().await.set_filter(filter);
    }

    /// Set filter, then refresh. The filter label and the items it scopes
    /// never disagree once this returns `Applied`.
    pub async fn select_category(&self, filter: Option<CategoryId>) -> ClientResult<RefreshOutcome> {
        self.set_filter(filter).await;
        self.refresh().await
    }

    /// Replaces the item list with a fresh fetch under the current filter.
    ///
    /// ## Returns
    /// - `Ok(Applied)`: the cache now holds the response
    /// - `Ok(Superseded)`: a newer refresh was issued meanwhile; this
    ///   response (success or failure) was discarded
    /// - `Err(_)`: the fetch for the latest request failed; the cache is
    ///   unchanged
    pub async fn refresh(&self) -> ClientResult<RefreshOutcome> {
        let ticket = self.cache.lock().await.begin_refresh();
        debug!(seq = ticket.seq, filter = ?ticket.filter, "catalog refresh started");

        let fetched = match self.backend.fetch_items(ticket.filter).await {
            Ok(items) => validate_catalog(&items)
                .map(|()| items)
                .map_err(|e| ClientError::MalformedResponse(e.to_string())),
            Err(err) => Err(err),
        };

        let mut cache = self.cache.lock().await;
        let items = match fetched {
            Ok(items) => items,
            Err(err) if !cache.is_current(&ticket) => {
                debug!(seq = ticket.seq, error = %err, "discarding failure of superseded refresh");
                return Ok(RefreshOutcome::Superseded);
            }
            Err(err) => {
                warn!(seq = ticket.seq, filter = ?ticket.filter, error = %err, "catalog refresh failed");
                return Err(err);
            }
        };

        let outcome = cache.apply_items(ticket, items);
        if outcome.is_applied() {
            let categories = cache.list_categories().to_vec();
            let items = cache.list_items().to_vec();
            drop(cache);

            info!(seq = ticket.seq, filter = ?ticket.filter, count = items.len(), "catalog refreshed");
            self.emitter.on_catalog_refreshed(&categories, &items);
        }
        Ok(outcome)
    }

    // =========================================================================
    // Item Maintenance
    // =========================================================================

    /// Validates and creates an item, then refreshes the grid.
    pub async fn create_item(&self, draft: &ItemDraft) -> ClientResult<CatalogItem> {
        validate_item_draft(draft)?;
        let item = self.backend.create_item(draft).await?;
        info!(item_id = item.id, name = %item.name, "item created");
        self.refresh_after_write().await;
        Ok(item)
    }

    /// Validates and rewrites an item, then refreshes the grid.
    ///
    /// Cart lines already holding the item keep their captured name and
    /// price.
    pub async fn update_item(&self, item_id: ItemId, draft: &ItemDraft) -> ClientResult<CatalogItem> {
        validate_item_draft(draft)?;
        let item = self.backend.update_item(item_id, draft).await?;
        info!(item_id, price = %item.price, "item updated");
        self.refresh_after_write().await;
        Ok(item)
    }

    pub async fn delete_item(&self, item_id: ItemId) -> ClientResult<()> {
        self.backend.delete_item(item_id).await?;
        info!(item_id, "item deleted");
        self.refresh_after_write().await;
        Ok(())
    }

    /// The write already happened; a failed re-read only leaves the grid
    /// stale until the next refresh.
    async fn refresh_after_write(&self) {
        if let Err(err) = self.refresh().await {
            warn!(error = %err, "catalog refresh after item write failed");
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub async fn categories(&self) -> Vec<Category> {
        self.cache.lock().await.list_categories().to_vec()
    }

    pub async fn items(&self) -> Vec<CatalogItem> {
        self.cache.lock().await.list_items().to_vec()
    }

    pub async fn item(&self, item_id: ItemId) -> Option<CatalogItem> {
        self.cache.lock().await.item(item_id).cloned()
    }

    pub async fn filter(&self) -> Option<CategoryId> {
        self.cache.lock().await.filter()
    }

    pub async fn filter_label(&self) -> Option<String> {
        self.cache.lock().await.filter_label().map(str::to_string)
    }
}
