//! Client-side filtering of the fetched product page
//!
//! Filtering never reaches outside the page it is given: counts derived from
//! the result describe the visible page only, not the whole catalog.

use catalog_core::{Product, ProductId, SellerId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category dropdown selection
///
/// The dropdown carries category ids as text, so matching compares the
/// product's category id rendered as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum CategorySelection {
    /// No category predicate
    #[default]
    All,
    /// Category id as selected in the dropdown
    Id(String),
}

impl CategorySelection {
    /// Select a category by numeric id
    pub fn id(id: i64) -> Self {
        Self::Id(id.to_string())
    }

    fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Id(selected) => product
                .category_id
                .is_some_and(|id| id.to_string() == *selected),
        }
    }
}

impl From<String> for CategorySelection {
    fn from(value: String) -> Self {
        if value == "all" {
            Self::All
        } else {
            Self::Id(value)
        }
    }
}

impl From<CategorySelection> for String {
    fn from(selection: CategorySelection) -> Self {
        selection.to_string()
    }
}

impl FromStr for CategorySelection {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::All);
        }
        Ok(Self::from(s.to_string()))
    }
}

impl fmt::Display for CategorySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}

/// Status dropdown selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    /// No status predicate
    #[default]
    All,
    /// Approved and in stock
    Active,
    /// Not approved, regardless of stock
    Pending,
    /// Out of stock, regardless of approval
    Inactive,
}

impl StatusFilter {
    /// Options in dropdown order
    pub const OPTIONS: [Self; 4] = [Self::All, Self::Active, Self::Inactive, Self::Pending];

    /// Test the derived-status predicate for this selection
    ///
    /// Pending and inactive overlap: an unapproved, out-of-stock product
    /// passes both.
    pub const fn matches(self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Active => product.is_active(),
            Self::Pending => product.is_pending(),
            Self::Inactive => product.is_inactive(),
        }
    }

    /// Dropdown label
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "ALL STATUS",
            Self::Active => "ACTIVE",
            Self::Pending => "PENDING",
            Self::Inactive => "INACTIVE",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Inactive => "inactive",
        };
        write!(f, "{name}")
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "pending" => Ok(Self::Pending),
            "inactive" => Ok(Self::Inactive),
            other => Err(format!(
                "unknown status '{other}', expected one of: all, active, inactive, pending"
            )),
        }
    }
}

/// Transient filter state held by the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Free-text search against product names
    pub search: String,

    /// Category selection
    pub category: CategorySelection,

    /// Status selection
    pub status: StatusFilter,

    /// Exact seller id
    pub seller_id: Option<SellerId>,

    /// Exact product id
    pub product_id: Option<ProductId>,
}

impl FilterCriteria {
    /// Whether a product passes every active predicate
    pub fn matches(&self, product: &Product) -> bool {
        self.category.matches(product)
            && self.seller_id.is_none_or(|id| product.seller_id == id)
            && self.product_id.is_none_or(|id| product.id == id)
            && self.status.matches(product)
            && self.matches_search(product)
    }

    fn matches_search(&self, product: &Product) -> bool {
        if self.search.trim().is_empty() {
            return true;
        }
        // The untrimmed term is matched, so surrounding spaces are significant.
        let needle = self.search.to_lowercase();
        product
            .name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains(&needle))
    }

    /// Filter a page of products, preserving order
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products
            .iter()
            .filter(|product| self.matches(product))
            .cloned()
            .collect()
    }

    /// Clear search, category and status
    ///
    /// Seller and product id filters survive a refresh.
    pub fn reset(&mut self) {
        self.search.clear();
        self.category = CategorySelection::All;
        self.status = StatusFilter::All;
    }

    /// Whether no predicate is active
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
            && self.category == CategorySelection::All
            && self.status == StatusFilter::All
            && self.seller_id.is_none()
            && self.product_id.is_none()
    }
}
