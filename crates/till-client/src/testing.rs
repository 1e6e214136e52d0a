//! In-memory collaborator for service tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use till_core::{
    BillDetail, BillDetailLine, BillLine, BillSummary, CatalogItem, Category, CategoryAnalytics,
    CategoryId, ItemAnalytics, ItemDraft, ItemId, Money, RevenueSummary,
};

use crate::backend::{CreatedBill, PosBackend};
use crate::error::{ClientError, ClientResult};
use crate::events::PosEventEmitter;

type Failure = fn() -> ClientError;

pub(crate) fn unreachable() -> ClientError {
    ClientError::Unreachable("connection refused".into())
}

pub(crate) fn rejected() -> ClientError {
    ClientError::SubmissionRejected {
        status: 400,
        message: "Item 99 not found".into(),
    }
}

#[derive(Default)]
pub(crate) struct FakeBackend {
    pub categories: Mutex<Vec<Category>>,
    pub items: Mutex<HashMap<Option<CategoryId>, Vec<CatalogItem>>>,
    pub failing_filters: Mutex<HashSet<Option<CategoryId>>>,
    pub item_gates: Mutex<HashMap<Option<CategoryId>, Arc<Notify>>>,
    pub item_requested: Notify,
    pub item_calls: AtomicUsize,

    pub bill_failure: Mutex<Option<Failure>>,
    pub bill_total_override: Mutex<Option<Money>>,
    pub bill_gate: Mutex<Option<Arc<Notify>>>,
    pub bill_requested: Notify,
    pub bill_requests: Mutex<Vec<Vec<BillLine>>>,

    pub bills: Mutex<Vec<BillSummary>>,
    pub bill_details: Mutex<HashMap<i64, BillDetail>>,
    pub revenue: Mutex<Option<RevenueSummary>>,
    pub category_analytics: Mutex<Vec<CategoryAnalytics>>,
    pub item_analytics: Mutex<Vec<ItemAnalytics>>,
    pub failing_sections: Mutex<HashSet<&'static str>>,

    pub sold_items: Mutex<HashSet<ItemId>>,
    pub item_writes: Mutex<Vec<String>>,
}

fn refused(message: impl Into<String>) -> ClientError {
    ClientError::UnexpectedStatus {
        status: 400,
        message: message.into(),
    }
}

impl FakeBackend {
    /// Two categories and three items, the usual fixture.
    pub fn stocked() -> Self {
        let backend = FakeBackend::default();
        *backend.categories.lock().unwrap() = vec![Category::new(1, "Drinks"), Category::new(2, "Food")];

        let tea = CatalogItem::new(1, "Tea", Money::from_cents(250)).in_category(1);
        let coffee = CatalogItem::new(2, "Coffee", Money::from_cents(300)).in_category(1);
        let scone = CatalogItem::new(3, "Scone", Money::from_cents(325)).in_category(2);
        {
            let mut items = backend.items.lock().unwrap();
            items.insert(None, vec![tea.clone(), coffee.clone(), scone.clone()]);
            items.insert(Some(1), vec![tea, coffee]);
            items.insert(Some(2), vec![scone]);
        }
        backend
    }

    pub fn gate_items(&self, filter: Option<CategoryId>) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.item_gates.lock().unwrap().insert(filter, gate.clone());
        gate
    }

    pub fn gate_bills(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.bill_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn fail_bills_with(&self, failure: Failure) {
        *self.bill_failure.lock().unwrap() = Some(failure);
    }

    pub fn bill_request_count(&self) -> usize {
        self.bill_requests.lock().unwrap().len()
    }

    /// Files `item` under "all" and under its category, replacing any
    /// earlier version in place.
    fn store_item(&self, item: CatalogItem) {
        let mut items = self.items.lock().unwrap();
        for (filter, list) in items.iter_mut() {
            let belongs = filter.is_none() || *filter == item.category_id;
            match list.iter().position(|existing| existing.id == item.id) {
                Some(index) if belongs => list[index] = item.clone(),
                Some(index) => {
                    list.remove(index);
                }
                None if belongs => list.push(item.clone()),
                None => {}
            }
        }
        if let Some(category) = item.category_id {
            items.entry(Some(category)).or_insert_with(|| vec![item.clone()]);
        }
    }

    fn drafted(&self, id: ItemId, draft: &ItemDraft) -> CatalogItem {
        let category_name = self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|category| category.id == draft.category_id)
            .map(|category| category.name.clone());
        CatalogItem {
            id,
            name: draft.name.clone(),
            price: draft.price,
            category_id: Some(draft.category_id),
            category_name,
            image_url: draft.image_url.clone(),
        }
    }

    fn section(&self, name: &'static str) -> ClientResult<()> {
        if self.failing_sections.lock().unwrap().contains(name) {
            return Err(ClientError::UnexpectedStatus {
                status: 500,
                message: format!("{name} unavailable"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PosBackend for FakeBackend {
    async fn fetch_categories(&self) -> ClientResult<Vec<Category>> {
        self.section("categories")?;
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn fetch_items(&self, category: Option<CategoryId>) -> ClientResult<Vec<CatalogItem>> {
        self.item_calls.fetch_add(1, Ordering::SeqCst);
        self.item_requested.notify_one();

        let gate = self.item_gates.lock().unwrap().get(&category).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.failing_filters.lock().unwrap().contains(&category) {
            return Err(unreachable());
        }
        Ok(self
            .items
            .lock()
            .unwrap()
            .get(&category)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_bill(&self, lines: &[BillLine]) -> ClientResult<CreatedBill> {
        let number = {
            let mut requests = self.bill_requests.lock().unwrap();
            requests.push(lines.to_vec());
            requests.len()
        };
        self.bill_requested.notify_one();

        let gate = self.bill_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if let Some(failure) = *self.bill_failure.lock().unwrap() {
            return Err(failure());
        }

        let total = self
            .bill_total_override
            .lock()
            .unwrap()
            .unwrap_or_else(|| lines.iter().map(BillLine::subtotal).sum());
        Ok(CreatedBill {
            bill_id: Some(number as i64),
            bill_number: format!("BILL-20240101-{number:08X}"),
            total_amount: total,
            created_at: None,
        })
    }

    async fn fetch_bills(&self) -> ClientResult<Vec<BillSummary>> {
        self.section("bills")?;
        Ok(self.bills.lock().unwrap().clone())
    }

    async fn fetch_bill(&self, bill_id: i64) -> ClientResult<Option<BillDetail>> {
        self.section("bill")?;
        Ok(self.bill_details.lock().unwrap().get(&bill_id).cloned())
    }

    async fn fetch_revenue_summary(&self) -> ClientResult<RevenueSummary> {
        self.section("revenue")?;
        Ok(self.revenue.lock().unwrap().unwrap_or(RevenueSummary {
            total_revenue: Money::zero(),
        }))
    }

    async fn fetch_category_analytics(&self) -> ClientResult<Vec<CategoryAnalytics>> {
        self.section("category_analytics")?;
        Ok(self.category_analytics.lock().unwrap().clone())
    }

    async fn fetch_item_analytics(&self) -> ClientResult<Vec<ItemAnalytics>> {
        self.section("item_analytics")?;
        Ok(self.item_analytics.lock().unwrap().clone())
    }

    async fn create_item(&self, draft: &ItemDraft) -> ClientResult<CatalogItem> {
        let next_id = {
            let items = self.items.lock().unwrap();
            items.values().flatten().map(|item| item.id).max().unwrap_or(0) + 1
        };
        let item = self.drafted(next_id, draft);
        self.item_writes.lock().unwrap().push(format!("create {next_id}"));
        self.store_item(item.clone());
        Ok(item)
    }

    async fn update_item(&self, item_id: ItemId, draft: &ItemDraft) -> ClientResult<CatalogItem> {
        let known = self
            .items
            .lock()
            .unwrap()
            .values()
            .flatten()
            .any(|item| item.id == item_id);
        if !known {
            return Err(refused(format!("Item {item_id} not found")));
        }
        let item = self.drafted(item_id, draft);
        self.item_writes.lock().unwrap().push(format!("update {item_id}"));
        self.store_item(item.clone());
        Ok(item)
    }

    async fn delete_item(&self, item_id: ItemId) -> ClientResult<()> {
        if self.sold_items.lock().unwrap().contains(&item_id) {
            return Err(refused("Cannot delete item: it has been used in 1 bill(s)"));
        }
        self.item_writes.lock().unwrap().push(format!("delete {item_id}"));
        for list in self.items.lock().unwrap().values_mut() {
            list.retain(|item| item.id != item_id);
        }
        Ok(())
    }

    async fn update_bill(&self, bill_id: i64, lines: &[BillLine]) -> ClientResult<BillDetail> {
        let mut details = self.bill_details.lock().unwrap();
        let Some(detail) = details.get_mut(&bill_id) else {
            return Err(refused(format!("Bill {bill_id} not found")));
        };
        detail.items = lines
            .iter()
            .map(|line| BillDetailLine {
                item_id: line.item_id,
                item_name: None,
                quantity: line.quantity,
                unit_price: line.unit_price,
                subtotal: line.subtotal(),
            })
            .collect();
        detail.total_amount = lines.iter().map(BillLine::subtotal).sum();
        Ok(detail.clone())
    }

    async fn delete_bill(&self, bill_id: i64) -> ClientResult<()> {
        self.bill_details.lock().unwrap().remove(&bill_id);
        self.bills
            .lock()
            .unwrap()
            .retain(|bill| bill.id != Some(bill_id));
        Ok(())
    }

    async fn clear_bills(&self) -> ClientResult<()> {
        self.bills.lock().unwrap().clear();
        self.bill_details.lock().unwrap().clear();
        *self.revenue.lock().unwrap() = None;
        self.category_analytics.lock().unwrap().clear();
        self.item_analytics.lock().unwrap().clear();
        Ok(())
    }
}

/// Records every notification as a short line of text.
#[derive(Default)]
pub(crate) struct RecordingEmitter {
    pub events: Mutex<Vec<String>>,
}

impl RecordingEmitter {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl PosEventEmitter for RecordingEmitter {
    fn on_cart_changed(&self, snapshot: &till_core::CartSnapshot) {
        self.events.lock().unwrap().push(format!(
            "cart lines={} total={}",
            snapshot.item_count, snapshot.total
        ));
    }

    fn on_catalog_refreshed(&self, categories: &[Category], items: &[CatalogItem]) {
        self.events.lock().unwrap().push(format!(
            "catalog categories={} items={}",
            categories.len(),
            items.len()
        ));
    }

    fn on_submission_result(&self, result: Result<&till_core::Bill, &ClientError>) {
        let line = match result {
            Ok(bill) => format!("bill {} {}", bill.bill_number, bill.total_amount),
            Err(err) => format!("failed {:?}", err.kind()),
        };
        self.events.lock().unwrap().push(line);
    }
}
