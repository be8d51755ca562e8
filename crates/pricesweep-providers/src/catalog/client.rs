//! Catalog HTTP client
//!
//! Issues one inclusive price-window query per call:
//!
//! ```text
//! GET {base_url}?minPrice={min}&maxPrice={max}
//! ```
//!
//! Any other query parameters already present on the base URL are preserved.
//! No retry: every failure is returned to the caller immediately.

use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{debug, error, instrument};

use pricesweep_core::{FilterRange, PageResult, RangeSource, SweepError};

use super::types::{CatalogError, CatalogPage};

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP client for a price-filterable product catalog
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: Url,
}

impl CatalogClient {
    /// Create a client with the default 30s request timeout
    ///
    /// # Errors
    ///
    /// `CatalogError::InvalidBaseUrl` if `base_url` does not parse.
    pub fn new(base_url: &str) -> Result<Self, CatalogError> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
    }

    /// Create a client with an explicit per-request timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let base_url = Url::parse(base_url).map_err(|e| CatalogError::InvalidBaseUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::ClientBuild(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL queried for `range`
    pub fn query_url(&self, range: FilterRange) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("minPrice", &range.min.to_string())
            .append_pair("maxPrice", &range.max.to_string());
        url
    }

    /// Fetch one page for `range`
    ///
    /// # Errors
    ///
    /// - `CatalogError::HttpStatus` for any non-success status
    /// - `CatalogError::Timeout` / `CatalogError::Transport` when no full response arrives
    /// - `CatalogError::Decode` when the body is not a catalog page
    #[instrument(skip(self), fields(range = %range))]
    pub async fn fetch_page(&self, range: FilterRange) -> Result<PageResult, CatalogError> {
        let url = self.query_url(range);

        debug!(event_type = "query_start", url = %url, "Querying price window");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            error!(
                event_type = "query_http_error",
                http_status = status.as_u16(),
                url = %url,
                "Catalog query rejected"
            );
            return Err(CatalogError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(&url, e))?;

        let page: CatalogPage = serde_json::from_slice(&body).inspect_err(|e| {
            error!(
                event_type = "query_decode_error",
                url = %url,
                body_bytes = body.len(),
                error = %e,
                "Catalog page did not decode"
            );
        })?;

        debug!(
            event_type = "query_complete",
            total = page.total,
            count = page.count,
            "Price window fetched"
        );

        Ok(page.into())
    }
}

fn transport_error(url: &Url, e: reqwest::Error) -> CatalogError {
    if e.is_timeout() {
        CatalogError::Timeout {
            url: url.to_string(),
        }
    } else {
        CatalogError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        }
    }
}

#[async_trait]
impl RangeSource for CatalogClient {
    async fn fetch(&self, range: FilterRange) -> Result<PageResult, SweepError> {
        self.fetch_page(range)
            .await
            .map_err(|e| e.into_sweep_error(range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_url_appends_bounds() {
        let client = CatalogClient::new("https://api.ecommerce.com/products").unwrap();
        let url = client.query_url(FilterRange::new(0, 100_000));
        assert_eq!(
            url.as_str(),
            "https://api.ecommerce.com/products?minPrice=0&maxPrice=100000"
        );
    }

    #[test]
    fn test_query_url_preserves_existing_params() {
        let client = CatalogClient::new("https://api.ecommerce.com/products?lang=en").unwrap();
        let url = client.query_url(FilterRange::new(-5, 5));
        assert_eq!(
            url.as_str(),
            "https://api.ecommerce.com/products?lang=en&minPrice=-5&maxPrice=5"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = CatalogClient::new("not a url").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidBaseUrl { .. }));
    }
}
