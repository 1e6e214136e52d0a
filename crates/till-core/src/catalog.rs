//! # Catalog Cache
//!
//! Holds the last successfully fetched categories and items plus the active
//! category filter. Fetching is somebody else's job (`till-client`); this
//! module only decides whether a response is still wanted.
//!
//! ## Last Request Wins
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Refresh Sequencing                                   │
//! │                                                                         │
//! │  begin_refresh()  ──► ticket seq=1 (filter: Drinks)                    │
//! │  begin_refresh()  ──► ticket seq=2 (filter: Food)                      │
//! │                                                                         │
//! │  response seq=2 arrives ──► seq == latest ──► APPLY                    │
//! │  response seq=1 arrives ──► seq <  latest ──► DISCARD (Superseded)     │
//! │                                                                         │
//! │  Failed responses follow the same rule: a failure for a superseded     │
//! │  ticket is dropped, a failure for the latest leaves the cache as is.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use crate::types::{Category, CatalogItem, CategoryId, ItemId};

/// Issued when a refresh starts; handed back with the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
    /// Monotonically increasing per cache.
    pub seq: u64,
    /// Filter that was active when the request was issued.
    pub filter: Option<CategoryId>,
}

/// Result of handing a response to the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The response belonged to the latest request and is now the cache.
    Applied,
    /// A newer request was issued meanwhile; the response was dropped.
    Superseded,
}

impl RefreshOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, RefreshOutcome::Applied)
    }
}

/// Categories, items and the active filter for one terminal session.
#[derive(Debug, Default, Clone)]
pub struct CatalogCache {
    categories: Vec<Category>,
    items: Vec<CatalogItem>,
    filter: Option<CategoryId>,
    latest_seq: u64,
}

impl CatalogCache {
    pub fn new() -> Self {
        CatalogCache::default()
    }

    // =========================================================================
    // Filter & Sequencing
    // =========================================================================

    /// Records the active filter. Does not refresh anything; the caller sets
    /// the filter, then refreshes, then re-renders.
    pub fn set_filter(&mut self, filter: Option<CategoryId>) {
        self.filter = filter;
    }

    pub fn filter(&self) -> Option<CategoryId> {
        self.filter
    }

    /// Starts a refresh under the current filter, superseding any refresh
    /// still in flight.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.latest_seq += 1;
        RefreshTicket {
            seq: self.latest_seq,
            filter: self.filter,
        }
    }

    /// Checks if `ticket` is the most recently issued one.
    pub fn is_current(&self, ticket: &RefreshTicket) -> bool {
        ticket.seq == self.latest_seq
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    // =========================================================================
    // Applying Responses
    // =========================================================================

    /// Replaces the item list with `items` if `ticket` is still current.
    ///
    /// The replacement is whole: the cache never holds a mix of two
    /// responses.
    pub fn apply_items(&mut self, ticket: RefreshTicket, items: Vec<CatalogItem>) -> RefreshOutcome {
        if !self.is_current(&ticket) {
            debug!(
                seq = ticket.seq,
                latest = self.latest_seq,
                "discarding superseded catalog response"
            );
            return RefreshOutcome::Superseded;
        }

        debug!(seq = ticket.seq, count = items.len(), "catalog items replaced");
        self.items = items;
        RefreshOutcome::Applied
    }

    /// Replaces the category list.
    pub fn replace_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn list_categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn list_items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Looks an item up by id among the currently held items.
    pub fn item(&self, item_id: ItemId) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    /// Name of the category the filter points at, if it is known.
    pub fn filter_label(&self) -> Option<&str> {
        let filter = self.filter?;
        self.categories
            .iter()
            .find(|category| category.id == filter)
            .map(|category| category.name.as_str())
    }
}
