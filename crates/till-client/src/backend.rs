//! # Collaborator Seam
//!
//! Everything a terminal needs from the catalog, billing and analytics
//! service, plus the back-office writes (item maintenance, bill edits),
//! expressed as one object-safe async trait. Services hold an
//! `Arc<dyn PosBackend>`; production uses [`crate::http::HttpBackend`],
//! tests use in-memory fakes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use till_core::money;
use till_core::types::{bill_number, timestamp};
use till_core::{
    Bill, BillDetail, BillLine, BillSummary, CatalogItem, Category, CategoryAnalytics, CategoryId,
    ItemAnalytics, ItemDraft, ItemId, Money, RevenueSummary,
};

use crate::error::ClientResult;

/// Remote catalog/billing/analytics collaborator.
///
/// Every method is a network round trip. Implementations own transport
/// timeouts; callers enforce none.
#[async_trait]
pub trait PosBackend: Send + Sync {
    async fn fetch_categories(&self) -> ClientResult<Vec<Category>>;

    /// Items, optionally scoped to one category.
    async fn fetch_items(&self, category: Option<CategoryId>) -> ClientResult<Vec<CatalogItem>>;

    /// Creates a bill. Fails with `SubmissionRejected` when the billing
    /// service refuses the request (unknown item, quantity below 1).
    async fn create_bill(&self, lines: &[BillLine]) -> ClientResult<CreatedBill>;

    /// Bill history, newest first.
    async fn fetch_bills(&self) -> ClientResult<Vec<BillSummary>>;

    /// One bill with its lines; `None` when the service has no such bill.
    async fn fetch_bill(&self, bill_id: i64) -> ClientResult<Option<BillDetail>>;

    async fn fetch_revenue_summary(&self) -> ClientResult<RevenueSummary>;

    async fn fetch_category_analytics(&self) -> ClientResult<Vec<CategoryAnalytics>>;

    async fn fetch_item_analytics(&self) -> ClientResult<Vec<ItemAnalytics>>;

    // Back office

    /// Creates a catalog item and returns it as stored.
    async fn create_item(&self, draft: &ItemDraft) -> ClientResult<CatalogItem>;

    /// Replaces every editable field of an item.
    async fn update_item(&self, item_id: ItemId, draft: &ItemDraft) -> ClientResult<CatalogItem>;

    /// Deletes an item. The service refuses items already sold on a bill.
    async fn delete_item(&self, item_id: ItemId) -> ClientResult<()>;

    /// Replaces a bill's lines; the service recomputes its total.
    async fn update_bill(&self, bill_id: i64, lines: &[BillLine]) -> ClientResult<BillDetail>;

    async fn delete_bill(&self, bill_id: i64) -> ClientResult<()>;

    /// Deletes every bill, which also zeroes all analytics.
    async fn clear_bills(&self) -> ClientResult<()>;
}

// =============================================================================
// Wire DTOs
// =============================================================================

/// Body of a bill creation request.
#[derive(Debug, Clone, Serialize)]
pub struct CreateBillRequest<'a> {
    pub items: &'a [BillLine],
}

/// What the billing service answers on creation.
///
/// The service does not always echo `created_at`; [`CreatedBill::into_bill`]
/// fills it with the time the answer was received.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedBill {
    #[serde(default)]
    pub bill_id: Option<i64>,

    #[serde(deserialize_with = "bill_number::deserialize")]
    pub bill_number: String,

    #[serde(with = "money::decimal")]
    pub total_amount: Money,

    #[serde(default, deserialize_with = "optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl CreatedBill {
    pub fn into_bill(self, received_at: DateTime<Utc>) -> Bill {
        Bill {
            bill_id: self.bill_id,
            bill_number: self.bill_number,
            total_amount: self.total_amount,
            created_at: self.created_at.unwrap_or(received_at),
        }
    }
}

fn optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(raw) => timestamp::parse(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'"))),
    }
}

/// Confirmation body of deletes and clears.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

/// Error body the service sends with non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_created_bill_without_timestamp_is_stamped() {
        let created: CreatedBill = serde_json::from_str(
            r#"{"bill_id": 12, "bill_number": "BILL-20240101-1A2B3C4D", "total_amount": 8.25}"#,
        )
        .unwrap();
        assert_eq!(created.created_at, None);

        let received = Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap();
        let bill = created.into_bill(received);
        assert_eq!(bill.bill_id, Some(12));
        assert_eq!(bill.total_amount, Money::from_cents(825));
        assert_eq!(bill.created_at, received);
    }

    #[test]
    fn test_created_bill_keeps_service_timestamp() {
        let created: CreatedBill = serde_json::from_str(
            r#"{"bill_number": "BILL-1", "total_amount": "0.30000000000000004", "created_at": "2024-03-05 14:02:11"}"#,
        )
        .unwrap();

        let bill = created.into_bill(Utc::now());
        assert_eq!(bill.total_amount, Money::from_cents(30));
        assert_eq!(
            bill.created_at,
            Utc.with_ymd_and_hms(2024, 3, 5, 14, 2, 11).unwrap()
        );
        assert_eq!(bill.bill_id, None);
    }

    #[test]
    fn test_created_bill_rejects_garbage_timestamp() {
        let parsed: Result<CreatedBill, _> = serde_json::from_str(
            r#"{"bill_number": "BILL-1", "total_amount": 1, "created_at": "yesterday"}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_request_body_shape() {
        let lines = [BillLine {
            item_id: 3,
            quantity: 2,
            unit_price: Money::from_cents(250),
        }];
        let json = serde_json::to_value(CreateBillRequest { items: &lines }).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"items": [{"item_id": 3, "quantity": 2, "unit_price": 2.5}]})
        );
    }
}
