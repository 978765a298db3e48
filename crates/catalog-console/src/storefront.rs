//! Public storefront landing page

use crate::categories::CategoryDirectory;
use catalog_client::CatalogSource;

/// Landing page: header, category navigation and footer
///
/// Not gated on the session; anyone may browse categories.
#[derive(Debug, Default)]
pub struct StorefrontView {
    categories: CategoryDirectory,
}

impl StorefrontView {
    /// Create a storefront with no categories loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the category navigation
    pub async fn load(&mut self, source: &dyn CatalogSource) {
        self.categories.load(source).await;
    }

    /// Category directory backing the navigation
    pub const fn categories(&self) -> &CategoryDirectory {
        &self.categories
    }

    /// Navigation labels, upper-cased, in server order
    pub fn nav_labels(&self) -> Vec<String> {
        self.categories
            .categories()
            .iter()
            .map(|category| category.name.to_uppercase())
            .collect()
    }
}
