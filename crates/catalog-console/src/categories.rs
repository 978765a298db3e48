//! Category directory shared by the dashboard and storefront

use catalog_client::{CatalogSource, ClientResult};
use catalog_core::{Category, CategoryId};
use serde::Serialize;
use tracing::{debug, error};

/// Category list, fetched at most once per view
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryDirectory {
    categories: Vec<Category>,
    loaded: bool,
}

impl CategoryDirectory {
    /// Create an empty, unloaded directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch categories unless a fetch already happened
    ///
    /// Failures are logged and leave the directory empty.
    pub async fn load(&mut self, source: &dyn CatalogSource) {
        if self.loaded {
            debug!("categories already loaded, skipping fetch");
            return;
        }
        let result = source.fetch_categories().await;
        self.apply(result);
    }

    /// Record the result of a category fetch
    pub fn apply(&mut self, result: ClientResult<Vec<Category>>) {
        self.loaded = true;
        match result {
            Ok(categories) => {
                debug!(count = categories.len(), "loaded categories");
                self.categories = categories;
            }
            Err(e) => {
                error!(error = %e, "failed to fetch categories");
                self.categories.clear();
            }
        }
    }

    /// Whether a fetch has completed, successfully or not
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Categories in server order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a category name
    pub fn name_of(&self, id: CategoryId) -> Option<&str> {
        self.categories
            .iter()
            .find(|category| category.id == id)
            .map(|category| category.name.as_str())
    }

    /// Dropdown options as `(value, label)`, labels upper-cased
    pub fn options(&self) -> Vec<(String, String)> {
        std::iter::once(("all".to_string(), "ALL CATEGORIES".to_string()))
            .chain(
                self.categories
                    .iter()
                    .map(|category| (category.id.to_string(), category.name.to_uppercase())),
            )
            .collect()
    }
}
