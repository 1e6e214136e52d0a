//! # Domain Types
//!
//! Core domain types used throughout Till POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │   │   CatalogItem   │   │    BillLine     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │◄──│  category_id?   │   │  item_id        │       │
//! │  │  name           │   │  id, name       │   │  quantity       │       │
//! │  └─────────────────┘   │  price          │   │  unit_price     │       │
//! │                        └─────────────────┘   └────────┬────────┘       │
//! │                                                       │ createBill     │
//! │                                                       ▼                │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ RevenueSummary  │   │   BillSummary   │   │      Bill       │       │
//! │  │ CategoryAnalyt. │   │  (recent bills) │   │  bill_number    │       │
//! │  │ ItemAnalytics   │   └─────────────────┘   │  total_amount   │       │
//! │  └─────────────────┘                         │  created_at     │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Representation
//! These types mirror the JSON contracts of the catalog/billing service.
//! Monetary fields travel as decimal numbers (see [`crate::money::decimal`]);
//! timestamps accept both RFC 3339 and the SQL `YYYY-MM-DD HH:MM:SS` form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{self, Money};

/// Catalog item identity.
pub type ItemId = i64;

/// Category identity.
pub type CategoryId = i64;

// =============================================================================
// Catalog
// =============================================================================

/// A product category. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Category {
            id,
            name: name.into(),
        }
    }
}

/// An item available for sale.
///
/// Immutable once fetched; the catalog cache replaces the whole list on
/// every successful refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogItem {
    /// Unique identifier.
    pub id: ItemId,

    /// Display name shown on the item grid and copied into cart lines.
    pub name: String,

    /// Unit price, never negative.
    #[serde(with = "money::decimal")]
    #[ts(type = "number")]
    pub price: Money,

    /// Owning category; `None` means uncategorized.
    #[serde(default)]
    pub category_id: Option<CategoryId>,

    /// Category name as joined by the catalog service.
    #[serde(default)]
    pub category_name: Option<String>,

    /// Optional picture for the item card.
    #[serde(default)]
    pub image_url: Option<String>,
}

impl CatalogItem {
    /// Creates an uncategorized item.
    pub fn new(id: ItemId, name: impl Into<String>, price: Money) -> Self {
        CatalogItem {
            id,
            name: name.into(),
            price,
            category_id: None,
            category_name: None,
            image_url: None,
        }
    }

    /// Assigns the item to a category.
    pub fn in_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

/// Fields an operator supplies when creating or editing a catalog item.
///
/// The service assigns the id and joins the category name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemDraft {
    pub name: String,

    #[serde(with = "money::decimal")]
    #[ts(type = "number")]
    pub price: Money,

    pub category_id: CategoryId,

    #[serde(default)]
    pub image_url: Option<String>,
}

impl ItemDraft {
    pub fn new(name: impl Into<String>, price: Money, category_id: CategoryId) -> Self {
        ItemDraft {
            name: name.into(),
            price,
            category_id,
            image_url: None,
        }
    }

    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

// =============================================================================
// Billing
// =============================================================================

/// One entry of a bill request.
///
/// The unit price comes from the cart line, never from the catalog, so a
/// price change mid-session cannot alter a transaction already in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BillLine {
    pub item_id: ItemId,
    pub quantity: i64,
    #[serde(with = "money::decimal")]
    #[ts(type = "number")]
    pub unit_price: Money,
}

impl BillLine {
    /// Line subtotal as the billing service computes it.
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// A bill created by the billing collaborator.
///
/// Read-only; the confirmation display is its only consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Bill {
    /// Storage id, used for later lookup.
    #[serde(default)]
    pub bill_id: Option<i64>,

    /// Collaborator-assigned bill number (e.g. `BILL-20240101-1A2B3C4D`).
    #[serde(deserialize_with = "bill_number::deserialize")]
    pub bill_number: String,

    #[serde(with = "money::decimal")]
    #[ts(type = "number")]
    pub total_amount: Money,

    #[serde(with = "timestamp")]
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// A row of the bill history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BillSummary {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(deserialize_with = "bill_number::deserialize")]
    pub bill_number: String,

    #[serde(with = "money::decimal")]
    #[ts(type = "number")]
    pub total_amount: Money,

    #[serde(with = "timestamp")]
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// A stored bill with its lines, as returned by a bill lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BillDetail {
    pub id: i64,

    #[serde(deserialize_with = "bill_number::deserialize")]
    pub bill_number: String,

    #[serde(with = "money::decimal")]
    #[ts(type = "number")]
    pub total_amount: Money,

    #[serde(with = "timestamp")]
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub items: Vec<BillDetailLine>,
}

/// A line of a stored bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BillDetailLine {
    pub item_id: ItemId,

    /// Current catalog name of the item.
    #[serde(default)]
    pub item_name: Option<String>,

    pub quantity: i64,

    #[serde(with = "money::decimal")]
    #[ts(type = "number")]
    pub unit_price: Money,

    #[serde(with = "money::decimal")]
    #[ts(type = "number")]
    pub subtotal: Money,
}

// =============================================================================
// Analytics
// =============================================================================

/// Revenue across all bills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RevenueSummary {
    #[serde(with = "money::decimal")]
    #[ts(type = "number")]
    pub total_revenue: Money,
}

/// Sales totals for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryAnalytics {
    pub id: CategoryId,
    pub name: String,
    pub total_items_sold: i64,
    #[serde(with = "money::decimal")]
    #[ts(type = "number")]
    pub total_revenue: Money,
}

/// Sales totals for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemAnalytics {
    pub id: ItemId,
    pub name: String,
    #[serde(with = "money::decimal")]
    #[ts(type = "number")]
    pub price: Money,
    #[serde(default)]
    pub category_name: Option<String>,
    pub total_quantity_sold: i64,
    #[serde(with = "money::decimal")]
    #[ts(type = "number")]
    pub total_revenue: Money,
}

// =============================================================================
// Wire Codecs
// =============================================================================

/// Serde adapter for bill timestamps.
///
/// Encodes RFC 3339. Decodes RFC 3339, or a naive `YYYY-MM-DD HH:MM:SS`
/// (optionally with fractional seconds or a `T` separator) taken as UTC,
/// which is what SQL `CURRENT_TIMESTAMP` columns produce.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("unrecognised timestamp '{}'", raw))
        })
    }

    /// Parses any of the accepted timestamp forms.
    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .map(|naive| naive.and_utc())
    }
}

/// Bill numbers arrive as strings or bare integers depending on the
/// billing backend; both decode to a `String`.
pub mod bill_number {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => text,
            Raw::Number(number) => number.to_string(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
