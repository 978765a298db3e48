//! HTTP client for communicating with the catalog backend

use crate::error::{ClientError, ClientResult};
use crate::source::CatalogSource;
use async_trait::async_trait;
use catalog_core::{ApiConfig, Category, ProductPage};
use reqwest::{Client, Response, header};
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// API client for making HTTP requests to the catalog backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session_cookie: Option<String>,
}

impl ApiClient {
    /// Create a new API client with no timeout and no session
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: normalize_base_url(base_url.into()),
            session_cookie: None,
        }
    }

    /// Build a client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not http(s) or the HTTP client
    /// cannot be constructed.
    pub fn from_config(config: &ApiConfig) -> ClientResult<Self> {
        let base_url = normalize_base_url(config.base_url.clone());
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidBaseUrl {
                url: config.base_url.clone(),
                message: "expected an http or https URL".to_string(),
            });
        }

        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
            session_cookie: config.session_cookie.clone(),
        })
    }

    /// Set the session cookie sent with admin requests
    #[must_use]
    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one page of products through the admin endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the backend answers with a
    /// non-success status, or the body is not valid JSON.
    pub async fn admin_products(&self, page: u32, request_id: Uuid) -> ClientResult<ProductPage> {
        let url = format!("{}/api/adminproducts?page={page}", self.base_url);

        let mut request = self
            .client
            .post(&url)
            .header(REQUEST_ID_HEADER, request_id.to_string());

        if let Some(ref cookie) = self.session_cookie {
            request = request.header(header::COOKIE, cookie);
        }

        debug!(%request_id, page, "requesting product page");
        let response = request.send().await?;
        decode_json(&url, response).await
    }

    /// Fetch the public category list
    ///
    /// A `null` body is treated as an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the backend answers with a
    /// non-success status, or the body is not valid JSON.
    pub async fn categories(&self) -> ClientResult<Vec<Category>> {
        let url = format!("{}/api/categories", self.base_url);

        debug!("requesting categories");
        let response = self.client.get(&url).send().await?;
        let categories: Option<Vec<Category>> = decode_json(&url, response).await?;

        Ok(categories.unwrap_or_default())
    }
}

#[async_trait]
impl CatalogSource for ApiClient {
    async fn fetch_product_page(
        &self,
        page: u32,
        request_id: Uuid,
    ) -> ClientResult<ProductPage> {
        self.admin_products(page, request_id).await
    }

    async fn fetch_categories(&self) -> ClientResult<Vec<Category>> {
        self.categories().await
    }

    fn name(&self) -> &str {
        "http"
    }
}

async fn decode_json<T>(url: &str, response: Response) -> ClientResult<T>
where
    T: serde::de::DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::status(status.as_u16(), url));
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| ClientError::decode(url, e))
}

fn normalize_base_url(mut base_url: String) -> String {
    while base_url.ends_with('/') {
        base_url.pop();
    }
    base_url
}
