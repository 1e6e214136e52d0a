//! # Analytics Service
//!
//! Dashboard loading and bill history maintenance. Nothing here feeds the
//! cart.
//!
//! Each section loads on its own; one failing section is reported and the
//! rest still render.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use till_core::validation::validate_bill_lines;
use ts_rs::TS;

use till_core::{BillDetail, BillLine, BillSummary, CategoryAnalytics, ItemAnalytics, RevenueSummary};

use crate::backend::PosBackend;
use crate::error::{ClientResult, Notice};

/// A dashboard section that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SectionFailure {
    pub section: DashboardSection,
    pub notice: Notice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DashboardSection {
    Revenue,
    Categories,
    Items,
    RecentBills,
}

/// Everything the analytics view shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Dashboard {
    pub revenue: Option<RevenueSummary>,
    pub categories: Vec<CategoryAnalytics>,
    pub items: Vec<ItemAnalytics>,
    pub recent_bills: Vec<BillSummary>,
    pub failures: Vec<SectionFailure>,
}

impl Dashboard {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct AnalyticsService {
    backend: Arc<dyn PosBackend>,
    recent_bills_limit: usize,
}

impl AnalyticsService {
    pub fn new(backend: Arc<dyn PosBackend>, recent_bills_limit: usize) -> Self {
        AnalyticsService {
            backend,
            recent_bills_limit,
        }
    }

    /// Loads all four sections concurrently.
    pub async fn load_dashboard(&self) -> Dashboard {
        let (revenue, categories, items, bills) = tokio::join!(
            self.backend.fetch_revenue_summary(),
            self.backend.fetch_category_analytics(),
            self.backend.fetch_item_analytics(),
            self.backend.fetch_bills(),
        );

        let mut failures = Vec::new();
        let revenue = record(&mut failures, DashboardSection::Revenue, revenue);
        let categories =
            record(&mut failures, DashboardSection::Categories, categories).unwrap_or_default();
        let items = record(&mut failures, DashboardSection::Items, items).unwrap_or_default();
        let recent_bills = record(&mut failures, DashboardSection::RecentBills, bills)
            .map(|bills| bills.into_iter().take(self.recent_bills_limit).collect())
            .unwrap_or_default();

        let dashboard = Dashboard {
            revenue,
            categories,
            items,
            recent_bills,
            failures,
        };

        info!(
            bills = dashboard.recent_bills.len(),
            failed_sections = dashboard.failures.len(),
            "dashboard loaded"
        );
        dashboard
    }

    /// One bill with its lines, or `None` if the service has no such bill.
    pub async fn fetch_bill(&self, bill_id: i64) -> ClientResult<Option<BillDetail>> {
        self.backend.fetch_bill(bill_id).await
    }

    /// Replaces a stored bill's lines. The same rules as a new sale apply.
    pub async fn update_bill(&self, bill_id: i64, lines: &[BillLine]) -> ClientResult<BillDetail> {
        validate_bill_lines(lines)?;
        let bill = self.backend.update_bill(bill_id, lines).await?;
        info!(bill_id, total = %bill.total_amount, "bill updated");
        Ok(bill)
    }

    pub async fn delete_bill(&self, bill_id: i64) -> ClientResult<()> {
        self.backend.delete_bill(bill_id).await?;
        info!(bill_id, "bill deleted");
        Ok(())
    }

    /// Deletes the whole bill history. Revenue and sales analytics start
    /// over from zero.
    pub async fn clear_bills(&self) -> ClientResult<()> {
        self.backend.clear_bills().await?;
        warn!("bill history cleared");
        Ok(())
    }
}

fn record<T>(
    failures: &mut Vec<SectionFailure>,
    section: DashboardSection,
    result: ClientResult<T>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(?section, error = %err, "dashboard section failed");
            failures.push(SectionFailure {
                section,
                notice: err.notice(),
            });
            None
        }
    }
}
