//! In-memory catalog source for testing

use crate::error::{ClientError, ClientResult};
use crate::source::CatalogSource;
use async_trait::async_trait;
use catalog_core::{Category, ProductPage};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::time::{Duration, sleep};
use uuid::Uuid;

/// Mock catalog source serving canned pages
///
/// Clones share the request log, so a test can hand one clone to the code
/// under test and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MockCatalogSource {
    /// Pages by page number
    pages: HashMap<u32, ProductPage>,

    /// Category list
    categories: Vec<Category>,

    /// Per-page response delay
    delays_ms: HashMap<u32, u64>,

    /// Fail product requests with this message
    product_failure: Option<String>,

    /// Fail category requests with this message
    category_failure: Option<String>,

    /// Product requests seen, in arrival order
    product_requests: Arc<Mutex<Vec<(u32, Uuid)>>>,

    /// Number of category requests seen
    category_requests: Arc<Mutex<usize>>,
}

impl MockCatalogSource {
    /// Create an empty mock source
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `page` for requests of its page number
    #[must_use]
    pub fn with_page(mut self, page: ProductPage) -> Self {
        self.pages.insert(page.pagination.page, page);
        self
    }

    /// Serve this category list
    #[must_use]
    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    /// Delay responses for one page number
    #[must_use]
    pub fn with_delay(mut self, page: u32, delay_ms: u64) -> Self {
        self.delays_ms.insert(page, delay_ms);
        self
    }

    /// Fail every product request
    #[must_use]
    pub fn with_product_failure(mut self, message: impl Into<String>) -> Self {
        self.product_failure = Some(message.into());
        self
    }

    /// Fail every category request
    #[must_use]
    pub fn with_category_failure(mut self, message: impl Into<String>) -> Self {
        self.category_failure = Some(message.into());
        self
    }

    /// Page numbers requested so far, in order
    pub fn requested_pages(&self) -> Vec<u32> {
        self.product_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(page, _)| *page)
            .collect()
    }

    /// Request ids received so far, in order
    pub fn request_ids(&self) -> Vec<Uuid> {
        self.product_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, id)| *id)
            .collect()
    }

    /// Number of category requests served or failed
    pub fn category_request_count(&self) -> usize {
        *self
            .category_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl CatalogSource for MockCatalogSource {
    async fn fetch_product_page(
        &self,
        page: u32,
        request_id: Uuid,
    ) -> ClientResult<ProductPage> {
        self.product_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((page, request_id));

        if let Some(delay) = self.delays_ms.get(&page) {
            sleep(Duration::from_millis(*delay)).await;
        }

        if let Some(ref message) = self.product_failure {
            return Err(ClientError::mock(message.clone()));
        }

        self.pages
            .get(&page)
            .cloned()
            .ok_or_else(|| ClientError::status(404, format!("mock://adminproducts?page={page}")))
    }

    async fn fetch_categories(&self) -> ClientResult<Vec<Category>> {
        *self
            .category_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += 1;

        if let Some(ref message) = self.category_failure {
            return Err(ClientError::mock(message.clone()));
        }

        Ok(self.categories.clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
