//! # HTTP Collaborator
//!
//! [`PosBackend`] over the service's JSON API.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET  {api}/categories                  → [{id, name}]                 │
//! │  GET  {api}/items[?category_id=N]       → [{id, name, price, ...}]     │
//! │  POST {api}/bills  {items: [...]}       → 201 {bill_id, bill_number,   │
//! │                                                total_amount}           │
//! │  GET  {api}/bills                       → [{id, bill_number, ...}]     │
//! │  GET  {api}/bills/{id}                  → {..., items: [...]} | 404    │
//! │  GET  {api}/analytics/revenue           → {total_revenue}              │
//! │  GET  {api}/analytics/categories        → [{id, name, ...}]            │
//! │  GET  {api}/analytics/items             → [{id, name, ...}]            │
//! │                                                                         │
//! │  POST   {api}/items         {name, price, category_id, image_url}      │
//! │                                              → 201 {id, name, ...}     │
//! │  PUT    {api}/items/{id}    (same body)      → {id, name, ...}         │
//! │  DELETE {api}/items/{id}                     → {message} | 400 in use  │
//! │  PUT    {api}/bills/{id}    {items: [...]}   → {..., items: [...]}     │
//! │  DELETE {api}/bills/{id}                     → {message}               │
//! │  POST   {api}/bills/clear                    → {message}               │
//! │                                                                         │
//! │  Errors come back as {"error": "..."} with a non-2xx status.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};
use url::Url;

use till_core::{
    BillDetail, BillLine, BillSummary, CatalogItem, Category, CategoryAnalytics, CategoryId,
    ItemAnalytics, ItemDraft, ItemId, RevenueSummary,
};

use crate::backend::{CreateBillRequest, CreatedBill, ErrorBody, MessageBody, PosBackend};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// reqwest-backed collaborator.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: Client,
    api: Url,
}

impl HttpBackend {
    /// Builds the HTTP client with the transport timeouts from `config`.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        let http = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(concat!("till-pos/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::InvalidConfig(e.to_string()))?;

        Ok(HttpBackend {
            http,
            api: config.api_url()?,
        })
    }

    pub fn api_url(&self) -> &Url {
        &self.api
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        Ok(self.api.join(path)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.endpoint(path)?;
        debug!(%url, "GET");
        let response = self.http.get(url).send().await?;
        decode(check_status(response).await?).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        debug!(%url, %method, "sending");
        let response = self.http.request(method, url).json(body).send().await?;
        decode(check_status(response).await?).await
    }

    /// Sends a body-less write and logs the service's confirmation.
    async fn send_empty(&self, method: Method, path: &str) -> ClientResult<()> {
        let url = self.endpoint(path)?;
        debug!(%url, %method, "sending");
        let response = self.http.request(method, url).send().await?;
        let confirmation: MessageBody = decode(check_status(response).await?).await?;
        info!(path, message = %confirmation.message, "service confirmed");
        Ok(())
    }
}

/// Maps a non-success status to `UnexpectedStatus`, keeping the service's
/// error message when it sent one.
async fn check_status(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = error_message(response).await;
    warn!(status = status.as_u16(), %message, "service returned an error");
    Err(ClientError::UnexpectedStatus {
        status: status.as_u16(),
        message,
    })
}

async fn error_message(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(parsed) => parsed.error,
        Err(_) if !body.trim().is_empty() => body,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl PosBackend for HttpBackend {
    async fn fetch_categories(&self) -> ClientResult<Vec<Category>> {
        self.get_json("categories").await
    }

    async fn fetch_items(&self, category: Option<CategoryId>) -> ClientResult<Vec<CatalogItem>> {
        let mut url = self.endpoint("items")?;
        if let Some(category_id) = category {
            url.query_pairs_mut()
                .append_pair("category_id", &category_id.to_string());
        }
        debug!(%url, "GET");
        let response = self.http.get(url).send().await?;
        decode(check_status(response).await?).await
    }

    async fn create_bill(&self, lines: &[BillLine]) -> ClientResult<CreatedBill> {
        let url = self.endpoint("bills")?;
        debug!(%url, line_count = lines.len(), "POST");
        let response = self
            .http
            .post(url)
            .json(&CreateBillRequest { items: lines })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            return Err(ClientError::SubmissionRejected {
                status: status.as_u16(),
                message,
            });
        }
        decode(response).await
    }

    async fn fetch_bills(&self) -> ClientResult<Vec<BillSummary>> {
        self.get_json("bills").await
    }

    async fn fetch_bill(&self, bill_id: i64) -> ClientResult<Option<BillDetail>> {
        let url = self.endpoint(&format!("bills/{bill_id}"))?;
        debug!(%url, "GET");
        let response = self.http.get(url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(bill_id, "bill not found");
            return Ok(None);
        }
        decode(check_status(response).await?).await.map(Some)
    }

    async fn fetch_revenue_summary(&self) -> ClientResult<RevenueSummary> {
        self.get_json("analytics/revenue").await
    }

    async fn fetch_category_analytics(&self) -> ClientResult<Vec<CategoryAnalytics>> {
        self.get_json("analytics/categories").await
    }

    async fn fetch_item_analytics(&self) -> ClientResult<Vec<ItemAnalytics>> {
        self.get_json("analytics/items").await
    }

    async fn create_item(&self, draft: &ItemDraft) -> ClientResult<CatalogItem> {
        self.send_json(Method::POST, "items", draft).await
    }

    async fn update_item(&self, item_id: ItemId, draft: &ItemDraft) -> ClientResult<CatalogItem> {
        self.send_json(Method::PUT, &format!("items/{item_id}"), draft)
            .await
    }

    async fn delete_item(&self, item_id: ItemId) -> ClientResult<()> {
        self.send_empty(Method::DELETE, &format!("items/{item_id}"))
            .await
    }

    async fn update_bill(&self, bill_id: i64, lines: &[BillLine]) -> ClientResult<BillDetail> {
        self.send_json(
            Method::PUT,
            &format!("bills/{bill_id}"),
            &CreateBillRequest { items: lines },
        )
        .await
    }

    async fn delete_bill(&self, bill_id: i64) -> ClientResult<()> {
        self.send_empty(Method::DELETE, &format!("bills/{bill_id}"))
            .await
    }

    async fn clear_bills(&self) -> ClientResult<()> {
        self.send_empty(Method::POST, "bills/clear").await
    }
}
