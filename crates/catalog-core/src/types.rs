//! Core data types for the catalog console
//!
//! Wire shapes follow the backend's JSON: products and pagination use
//! camelCase keys, categories use `CategoryID`/`CategoryName`. Every
//! container field carries a serde default so a partial response degrades to
//! empty lists and zero counts instead of failing to decode.

use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit JSON `null` like an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Product identifier type
pub type ProductId = i64;

/// Seller identifier type
pub type SellerId = i64;

/// Category identifier type
pub type CategoryId = i64;

/// A seller product listing as returned by the admin products endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product identifier
    pub id: ProductId,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Owning seller
    #[serde(default, deserialize_with = "null_as_default")]
    pub seller_id: SellerId,

    /// Category the product is listed under
    #[serde(default)]
    pub category_id: Option<CategoryId>,

    /// Whether an admin approved the listing
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_approved: bool,

    /// Whether the listing has stock
    #[serde(default, deserialize_with = "null_as_default")]
    pub stock_available: bool,
}

impl Product {
    /// Derived status: approved and in stock
    pub const fn is_active(&self) -> bool {
        self.is_approved && self.stock_available
    }

    /// Derived status: awaiting approval, regardless of stock
    pub const fn is_pending(&self) -> bool {
        !self.is_approved
    }

    /// Derived status: out of stock, regardless of approval
    pub const fn is_inactive(&self) -> bool {
        !self.stock_available
    }

    /// Name for display, empty when the backend omitted it
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

/// A product category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Category identifier
    #[serde(rename = "CategoryID")]
    pub id: CategoryId,

    /// Display name
    #[serde(rename = "CategoryName")]
    pub name: String,
}

/// Server-reported pagination for a page of products
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PageInfo {
    /// Current page number (1-based)
    pub page: u32,

    /// Number of items per page, fixed by the backend
    pub page_size: u32,

    /// Total number of pages
    pub total_pages: u32,

    /// Total number of products across all pages
    pub total_products: u64,
}

impl Default for PageInfo {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            total_pages: 1,
            total_products: 0,
        }
    }
}

/// Aggregate counts computed by the backend
///
/// These are independent of the client-side status predicate and are never
/// reconciled with it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductStats {
    /// Approved and in-stock products
    #[serde(deserialize_with = "null_as_default")]
    pub active_products: u64,

    /// Products awaiting approval
    #[serde(deserialize_with = "null_as_default")]
    pub pending_products: u64,

    /// Out-of-stock products
    #[serde(deserialize_with = "null_as_default")]
    pub inactive_products: u64,
}

/// One page of products plus pagination and stats
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProductPage {
    /// Products on this page, in server order
    #[serde(deserialize_with = "null_as_default")]
    pub products: Vec<Product>,

    /// Pagination info
    #[serde(deserialize_with = "null_as_default")]
    pub pagination: PageInfo,

    /// Aggregate counts
    #[serde(deserialize_with = "null_as_default")]
    pub stats: ProductStats,
}

/// Role of the signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Catalog administrator
    Admin,
    /// Any other role, kept verbatim
    Other(String),
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        if value == "admin" {
            Self::Admin
        } else {
            Self::Other(value)
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Other(role) => write!(f, "{role}"),
        }
    }
}

/// Signed-in user as seen by the console
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// User identifier
    pub id: i64,

    /// User role
    pub role: Role,
}

/// Explicit session context handed to views at construction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    /// Signed-in user, if any
    pub user: Option<SessionUser>,
}

impl SessionContext {
    /// Session with no signed-in user
    pub const fn anonymous() -> Self {
        Self { user: None }
    }

    /// Session for a signed-in user
    pub const fn signed_in(id: i64, role: Role) -> Self {
        Self {
            user: Some(SessionUser { id, role }),
        }
    }

    /// Whether the session belongs to an admin
    pub fn is_admin(&self) -> bool {
        self.user
            .as_ref()
            .is_some_and(|user| user.role == Role::Admin)
    }

    /// Guard clause for admin-only operations
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::AccessDenied`] when there is no user or the
    /// user is not an admin.
    pub fn ensure_admin(&self) -> crate::Result<()> {
        if self.is_admin() {
            return Ok(());
        }
        Err(crate::Error::AccessDenied {
            role: self.user.as_ref().map(|user| user.role.to_string()),
        })
    }
}
