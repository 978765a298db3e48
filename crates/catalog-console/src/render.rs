//! Plain-text rendering of the views
//!
//! Each screen is a [`Display`] wrapper over a borrowed view; the free
//! functions render one to a `String`.

use crate::categories::CategoryDirectory;
use crate::dashboard::{AccessState, DashboardView};
use crate::filter::{CategorySelection, StatusFilter};
use crate::storefront::StorefrontView;
use catalog_core::{CategoryId, Product};
use std::fmt::{self, Display, Formatter};

const RULE: &str = "------------------------------------------------------------------------";

/// Full-screen loading view
#[derive(Debug, Clone, Copy)]
pub struct LoadingScreen;

impl Display for LoadingScreen {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f)?;
        writeln!(f, "{:^72}", "Loading...")?;
        writeln!(f)?;
        writeln!(f, "{RULE}")
    }
}

/// Dashboard, or the loading or denied view in its place
#[derive(Debug, Clone, Copy)]
pub struct DashboardScreen<'a>(pub &'a DashboardView);

impl Display for DashboardScreen<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let view = self.0;
        if view.access() == AccessState::Denied {
            return writeln!(f, "Access denied: the product dashboard requires an admin session");
        }
        if view.is_loading() {
            return Display::fmt(&LoadingScreen, f);
        }

        writeln!(f, "ALL PRODUCTS AND LISTINGS")?;
        writeln!(f, "Manage your product listings and inventory")?;
        writeln!(f, "[+ Add Product] -> {}", view.create_product_route())?;
        writeln!(f, "{RULE}")?;

        write_filters(f, view)?;
        writeln!(
            f,
            "{} of {} products",
            view.visible_products().len(),
            view.products().len()
        )?;
        writeln!(f, "{RULE}")?;

        let stats = view.stats();
        writeln!(
            f,
            "TOTAL PRODUCTS: {} | PENDING PRODUCTS: {} | INACTIVE PRODUCTS: {} | ACTIVE PRODUCTS: {}",
            view.visible_products().len(),
            stats.pending_products,
            stats.inactive_products,
            stats.active_products
        )?;
        writeln!(f, "{RULE}")?;

        write_rows(f, view.visible_products(), view.categories())?;
        writeln!(f, "{RULE}")?;

        let pagination = view.pagination();
        writeln!(
            f,
            "{} Page {} of {} {}",
            Button("Previous", pagination.can_go_previous()),
            pagination.current_page(),
            pagination.total_pages(),
            Button("Next", pagination.can_go_next())
        )
    }
}

/// Pagination button, bracketed when enabled
struct Button<'a>(&'a str, bool);

impl Display for Button<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self(label, enabled) = self;
        if *enabled {
            write!(f, "[{label}]")
        } else {
            write!(f, "({label})")
        }
    }
}

fn write_filters(f: &mut Formatter<'_>, view: &DashboardView) -> fmt::Result {
    let criteria = view.criteria();
    let category = match &criteria.category {
        CategorySelection::All => "ALL CATEGORIES".to_string(),
        CategorySelection::Id(id) => id
            .parse::<CategoryId>()
            .ok()
            .and_then(|id| view.categories().name_of(id))
            .map_or_else(|| id.clone(), str::to_uppercase),
    };
    let seller = criteria
        .seller_id
        .map_or_else(|| "-".to_string(), |id| id.to_string());
    let product = criteria
        .product_id
        .map_or_else(|| "-".to_string(), |id| id.to_string());

    writeln!(
        f,
        "Search: \"{}\"  Seller ID: {seller}  Product ID: {product}  Category: {category}  Status: {}",
        criteria.search,
        criteria.status.label()
    )
}

fn write_rows(
    f: &mut Formatter<'_>,
    products: &[Product],
    categories: &CategoryDirectory,
) -> fmt::Result {
    if products.is_empty() {
        return writeln!(f, "No products found");
    }

    writeln!(
        f,
        "{:<8} {:<28} {:<8} {:<16} STATUS",
        "ID", "NAME", "SELLER", "CATEGORY"
    )?;
    for product in products {
        let category = product.category_id.map_or_else(
            || "-".to_string(),
            |id| {
                categories
                    .name_of(id)
                    .map_or_else(|| id.to_string(), str::to_uppercase)
            },
        );
        writeln!(
            f,
            "{:<8} {:<28} {:<8} {:<16} {}",
            product.id,
            product.display_name(),
            product.seller_id,
            category,
            status_labels(product)
        )?;
    }
    Ok(())
}

fn status_labels(product: &Product) -> String {
    let labels: Vec<&str> = [StatusFilter::Active, StatusFilter::Pending, StatusFilter::Inactive]
        .into_iter()
        .filter(|status| status.matches(product))
        .map(StatusFilter::label)
        .collect();
    labels.join(", ")
}

/// Category list as `id  NAME` lines
#[derive(Debug, Clone, Copy)]
pub struct CategoryListing<'a>(pub &'a CategoryDirectory);

impl Display for CategoryListing<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let categories = self.0.categories();
        if categories.is_empty() {
            return writeln!(f, "No categories");
        }
        for category in categories {
            writeln!(f, "{:<6} {}", category.id, category.name.to_uppercase())?;
        }
        Ok(())
    }
}

/// Storefront landing page
///
/// The banner stands in for the navbar and the closing line for the footer.
#[derive(Debug, Clone, Copy)]
pub struct StorefrontScreen<'a>(pub &'a StorefrontView);

impl Display for StorefrontScreen<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "{:^72}", "WELCOME TO THE STORE")?;
        writeln!(f, "{RULE}")?;

        let labels = self.0.nav_labels();
        if labels.is_empty() {
            writeln!(f, "Shop all products")?;
        } else {
            writeln!(f, "{}", labels.join(" | "))?;
        }

        writeln!(f, "{RULE}")?;
        writeln!(f, "About | Contact | Privacy | Terms")
    }
}

/// Render the loading view
pub fn loading() -> String {
    LoadingScreen.to_string()
}

/// Render the dashboard, or the loading or denied view in its place
pub fn dashboard(view: &DashboardView) -> String {
    DashboardScreen(view).to_string()
}

/// Render the category list
pub fn category_list(directory: &CategoryDirectory) -> String {
    CategoryListing(directory).to_string()
}

/// Render the storefront landing page
pub fn storefront(view: &StorefrontView) -> String {
    StorefrontScreen(view).to_string()
}
