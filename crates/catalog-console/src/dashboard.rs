//! Admin product dashboard state
//!
//! The dashboard owns the current product page, the filter criteria, the
//! pagination cursor, the server stats and the category directory. Page
//! fetches are split into [`DashboardView::begin_fetch`] and
//! [`DashboardView::complete_fetch`] so an event loop can keep several
//! requests in flight and still apply only the latest; the `*_page` async
//! methods run both halves back to back.

use crate::categories::CategoryDirectory;
use crate::fetcher::{FetchOutcome, FetchTicket, PageFetcher};
use crate::filter::{CategorySelection, FilterCriteria, StatusFilter};
use crate::pagination::PaginationController;
use catalog_client::{CatalogSource, ClientError, ClientResult};
use catalog_core::{
    DashboardConfig, Product, ProductId, ProductPage, ProductStats, SellerId, SessionContext,
};
use serde::Serialize;
use tracing::{debug, info};

/// Whether the session may use the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessState {
    /// Admin session; product requests are issued
    Granted,
    /// Anonymous or non-admin session; product requests are never issued
    Denied,
}

/// Effect of a completed page fetch on the dashboard
#[derive(Debug)]
pub enum PageUpdate {
    /// New page data is on screen
    Applied,
    /// The latest request failed; prior data stays and the cursor is rolled back
    Failed(ClientError),
    /// A newer request superseded this one; nothing changed
    Stale,
}

impl PageUpdate {
    /// Whether new page data was applied
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    /// Whether the visible state changed, either new data or loading ended
    pub const fn needs_redraw(&self) -> bool {
        !matches!(self, Self::Stale)
    }
}

/// Admin dashboard over one page of products
#[derive(Debug)]
pub struct DashboardView {
    session: SessionContext,
    access: AccessState,
    products: Vec<Product>,
    visible: Vec<Product>,
    criteria: FilterCriteria,
    pagination: PaginationController,
    stats: ProductStats,
    categories: CategoryDirectory,
    fetcher: PageFetcher,
    create_product_route: String,
}

impl DashboardView {
    /// Build a dashboard for `session`, checking the admin gate once
    pub fn new(session: SessionContext, config: &DashboardConfig) -> Self {
        let access = match session.ensure_admin() {
            Ok(()) => AccessState::Granted,
            Err(e) => {
                debug!(error = %e, "dashboard access denied");
                AccessState::Denied
            }
        };

        Self {
            session,
            access,
            products: Vec::new(),
            visible: Vec::new(),
            criteria: FilterCriteria::default(),
            pagination: PaginationController::new(config.initial_page),
            stats: ProductStats::default(),
            categories: CategoryDirectory::new(),
            fetcher: PageFetcher::new(),
            create_product_route: config.create_product_route.clone(),
        }
    }

    /// Fetch categories and the initial page concurrently
    pub async fn mount(&mut self, source: &dyn CatalogSource) {
        match self.begin_fetch() {
            Some(ticket) => {
                let (categories, page) = tokio::join!(
                    source.fetch_categories(),
                    PageFetcher::fetch(source, ticket)
                );
                self.categories.apply(categories);
                self.complete_fetch(ticket, page);
            }
            None => self.load_categories(source).await,
        }
    }

    /// Fetch the category list, once
    pub async fn load_categories(&mut self, source: &dyn CatalogSource) {
        self.categories.load(source).await;
    }

    /// Fetch the current page
    pub async fn load_page(&mut self, source: &dyn CatalogSource) {
        let ticket = self.begin_fetch();
        self.run(source, ticket).await;
    }

    /// Move to the next page and fetch it
    ///
    /// Returns `false` when already on the last page, when access is denied,
    /// or when the response was not applied.
    pub async fn next_page(&mut self, source: &dyn CatalogSource) -> bool {
        let ticket = self.request_next();
        self.run(source, ticket).await
    }

    /// Move to the previous page and fetch it
    pub async fn previous_page(&mut self, source: &dyn CatalogSource) -> bool {
        let ticket = self.request_previous();
        self.run(source, ticket).await
    }

    /// Re-fetch the current page without touching the filters
    pub async fn reload(&mut self, source: &dyn CatalogSource) -> bool {
        info!(page = self.pagination.current_page(), "reloading product page");
        let ticket = self.begin_fetch();
        self.run(source, ticket).await
    }

    async fn run(&mut self, source: &dyn CatalogSource, ticket: Option<FetchTicket>) -> bool {
        match ticket {
            Some(ticket) => {
                let result = PageFetcher::fetch(source, ticket).await;
                self.complete_fetch(ticket, result).is_applied()
            }
            None => false,
        }
    }

    /// Issue a ticket for the current page
    ///
    /// Returns `None` for a denied session.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if self.access == AccessState::Denied {
            debug!("skipping product fetch for non-admin session");
            return None;
        }
        Some(self.fetcher.issue(self.pagination.current_page()))
    }

    /// Advance the cursor and issue a ticket for the new page
    pub fn request_next(&mut self) -> Option<FetchTicket> {
        if self.access == AccessState::Denied {
            return self.begin_fetch();
        }
        self.pagination.next()?;
        self.begin_fetch()
    }

    /// Step the cursor back and issue a ticket for the new page
    pub fn request_previous(&mut self) -> Option<FetchTicket> {
        if self.access == AccessState::Denied {
            return self.begin_fetch();
        }
        self.pagination.previous()?;
        self.begin_fetch()
    }

    /// Apply a completed fetch if its ticket is still the latest
    ///
    /// Failures keep the prior products and stats and move the cursor back
    /// to the page they belong to.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: ClientResult<ProductPage>,
    ) -> PageUpdate {
        match self.fetcher.complete(ticket, result) {
            FetchOutcome::Applied(page) => {
                debug!(
                    page = page.pagination.page,
                    count = page.products.len(),
                    "applying product page"
                );
                self.products = page.products;
                self.stats = page.stats;
                self.pagination.apply(page.pagination);
                self.refilter();
                PageUpdate::Applied
            }
            FetchOutcome::Failed(e) => {
                self.pagination.rollback();
                PageUpdate::Failed(e)
            }
            FetchOutcome::Stale => PageUpdate::Stale,
        }
    }

    /// Set the search text
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.criteria.search = search.into();
        self.refilter();
    }

    /// Set the category selection
    pub fn set_category(&mut self, category: CategorySelection) {
        self.criteria.category = category;
        self.refilter();
    }

    /// Set the status selection
    pub fn set_status(&mut self, status: StatusFilter) {
        self.criteria.status = status;
        self.refilter();
    }

    /// Set or clear the seller id filter
    pub fn set_seller(&mut self, seller_id: Option<SellerId>) {
        self.criteria.seller_id = seller_id;
        self.refilter();
    }

    /// Set or clear the product id filter
    pub fn set_product(&mut self, product_id: Option<ProductId>) {
        self.criteria.product_id = product_id;
        self.refilter();
    }

    /// Clear search, category and status; keep id filters and data
    pub fn refresh(&mut self) {
        self.criteria.reset();
        self.refilter();
    }

    fn refilter(&mut self) {
        self.visible = self.criteria.apply(&self.products);
    }

    /// Access decided at construction
    pub const fn access(&self) -> AccessState {
        self.access
    }

    /// Session the dashboard was built for
    pub const fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Whether the latest page request is still outstanding
    pub const fn is_loading(&self) -> bool {
        self.fetcher.in_flight()
    }

    /// All products of the current page
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products passing the current filters
    pub fn visible_products(&self) -> &[Product] {
        &self.visible
    }

    /// Current filter criteria
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Pagination cursor
    pub const fn pagination(&self) -> &PaginationController {
        &self.pagination
    }

    /// Server-reported stats of the last applied page
    pub const fn stats(&self) -> ProductStats {
        self.stats
    }

    /// Category directory
    pub const fn categories(&self) -> &CategoryDirectory {
        &self.categories
    }

    /// Route of the product-creation page
    pub fn create_product_route(&self) -> &str {
        &self.create_product_route
    }

    /// Serializable view of the current state
    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            access: self.access,
            loading: self.is_loading(),
            criteria: self.criteria.clone(),
            page: self.pagination.current_page(),
            total_pages: self.pagination.total_pages(),
            can_go_previous: self.pagination.can_go_previous(),
            can_go_next: self.pagination.can_go_next(),
            total_products: self.pagination.info().total_products,
            visible_count: self.visible.len(),
            page_count: self.products.len(),
            stats: self.stats,
            products: self.visible.clone(),
            create_product_route: self.create_product_route.clone(),
        }
    }
}

/// Point-in-time dashboard state for JSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSnapshot {
    /// Access decision
    pub access: AccessState,
    /// Whether a request is outstanding
    pub loading: bool,
    /// Filter criteria
    pub criteria: FilterCriteria,
    /// Current page
    pub page: u32,
    /// Total pages, at least 1
    pub total_pages: u32,
    /// Previous enabled
    pub can_go_previous: bool,
    /// Next enabled
    pub can_go_next: bool,
    /// Server-reported total product count
    pub total_products: u64,
    /// Products passing the filters
    pub visible_count: usize,
    /// Products on the page
    pub page_count: usize,
    /// Server stats
    pub stats: ProductStats,
    /// Visible products
    pub products: Vec<Product>,
    /// Product-creation route
    pub create_product_route: String,
}
