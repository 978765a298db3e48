//! Backend abstraction used by the dashboard and storefront

use crate::error::ClientResult;
use async_trait::async_trait;
use catalog_core::{Category, ProductPage};
use uuid::Uuid;

/// Source of catalog data
///
/// The HTTP client is the production implementation; tests plug in
/// [`crate::MockCatalogSource`].
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch one page of products with pagination and stats
    ///
    /// `request_id` tags the request so logs on both ends can be correlated.
    async fn fetch_product_page(&self, page: u32, request_id: Uuid)
    -> ClientResult<ProductPage>;

    /// Fetch the full category list
    async fn fetch_categories(&self) -> ClientResult<Vec<Category>>;

    /// Name of the source, for logging
    fn name(&self) -> &str;
}
