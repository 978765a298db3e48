//! Client for the catalog backend API
//!
//! Provides the HTTP [`ApiClient`] for the admin product listing and the
//! public category directory, the [`CatalogSource`] seam the views are written
//! against, and an in-memory [`MockCatalogSource`] for tests.

#![forbid(unsafe_code)]

pub mod api_client;
pub mod error;
pub mod mock;
pub mod source;

pub use api_client::{ApiClient, REQUEST_ID_HEADER};
pub use error::{ClientError, ClientResult};
pub use mock::MockCatalogSource;
pub use source::CatalogSource;
