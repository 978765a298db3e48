//! Admin product dashboard and storefront console
//!
//! Views over the catalog backend: the admin [`DashboardView`] with its
//! filter engine, pagination cursor and stale-safe page fetcher, and the
//! public [`StorefrontView`]. Rendering is plain text; the binary drives the
//! views from the command line or an interactive browse loop.

#![forbid(unsafe_code)]

pub mod categories;
pub mod command;
pub mod dashboard;
pub mod fetcher;
pub mod filter;
pub mod pagination;
pub mod render;
pub mod storefront;

pub use categories::CategoryDirectory;
pub use command::BrowseCommand;
pub use dashboard::{AccessState, DashboardSnapshot, DashboardView, PageUpdate};
pub use fetcher::{FetchOutcome, FetchTicket, PageFetcher};
pub use filter::{CategorySelection, FilterCriteria, StatusFilter};
pub use pagination::PaginationController;
pub use storefront::StorefrontView;
