//! Core types and utilities for the catalog console

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod types;

pub use config::{ApiConfig, Config, DashboardConfig, LoggingConfig, SessionConfig};
pub use error::{Error, Result};
pub use types::{
    Category, CategoryId, PageInfo, Product, ProductId, ProductPage, ProductStats, Role,
    SellerId, SessionContext, SessionUser,
};

/// Initialize the logging system
///
/// `RUST_LOG` takes precedence over the configured level. A `format` of
/// `json` selects structured output, anything else the human-readable layer.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(logging: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if logging.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    result.map_err(|e| Error::Other(format!("Failed to initialize logging: {e}")))
}
