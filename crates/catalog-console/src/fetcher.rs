//! Product page fetching with stale-response discard
//!
//! Every fetch is tagged with a [`FetchTicket`]. Only the response carrying
//! the most recently issued ticket is applied; anything older that lands
//! afterwards is dropped, so rapid navigation can never leave the view
//! showing a page other than the last one requested.

use catalog_client::{CatalogSource, ClientError, ClientResult};
use catalog_core::ProductPage;
use tracing::{debug, warn};
use uuid::Uuid;

/// Tag identifying one product page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    page: u32,
    request_id: Uuid,
}

impl FetchTicket {
    /// Page number requested
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Correlation id sent with the request
    pub const fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Monotonic issue order
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// What became of a completed fetch
#[derive(Debug)]
pub enum FetchOutcome {
    /// Latest request succeeded
    Applied(ProductPage),
    /// Latest request failed
    Failed(ClientError),
    /// A newer request was issued before this one completed
    Stale,
}

/// Issues tickets and decides which responses are still wanted
#[derive(Debug, Default)]
pub struct PageFetcher {
    issued: u64,
    outstanding: Option<FetchTicket>,
}

impl PageFetcher {
    /// Create a fetcher with nothing in flight
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for `page`, superseding any outstanding one
    pub fn issue(&mut self, page: u32) -> FetchTicket {
        self.issued += 1;
        let ticket = FetchTicket {
            generation: self.issued,
            page,
            request_id: Uuid::new_v4(),
        };
        if let Some(previous) = self.outstanding.replace(ticket) {
            debug!(
                superseded = %previous.request_id,
                page = previous.page,
                "superseding in-flight product request"
            );
        }
        ticket
    }

    /// Whether `ticket` is the latest one issued
    pub const fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.issued
    }

    /// Whether the latest request has not completed yet
    pub const fn in_flight(&self) -> bool {
        self.outstanding.is_some()
    }

    /// Settle a completed request
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: ClientResult<ProductPage>,
    ) -> FetchOutcome {
        if !self.is_current(&ticket) {
            debug!(
                request_id = %ticket.request_id,
                page = ticket.page,
                "discarding stale product response"
            );
            return FetchOutcome::Stale;
        }

        self.outstanding = None;
        match result {
            Ok(page) => FetchOutcome::Applied(page),
            Err(e) => {
                warn!(
                    request_id = %ticket.request_id,
                    page = ticket.page,
                    error = %e,
                    "failed to fetch product page"
                );
                FetchOutcome::Failed(e)
            }
        }
    }

    /// Send the request for `ticket` through `source`
    pub async fn fetch(source: &dyn CatalogSource, ticket: FetchTicket) -> ClientResult<ProductPage> {
        debug!(
            source = source.name(),
            request_id = %ticket.request_id,
            page = ticket.page,
            "fetching product page"
        );
        source.fetch_product_page(ticket.page, ticket.request_id).await
    }
}
