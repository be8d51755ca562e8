//! Catalog wire format and errors

use serde::Deserialize;
use thiserror::Error;

use pricesweep_core::Record;

/// Errors from the catalog HTTP client
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Base URL could not be parsed
    #[error("Invalid base URL {url}: {message}")]
    InvalidBaseUrl { url: String, message: String },

    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// Server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// Request timed out before a full response arrived
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    /// Connection or body stream failure
    #[error("HTTP error for {url}: {message}")]
    Transport { url: String, message: String },

    /// Body is not a catalog page
    #[error("Failed to decode catalog page: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One catalog page as served by the remote API
///
/// ```json
/// { "total": 2500, "count": 1000, "products": [ { "id": "...", "price": 42 } ] }
/// ```
#[derive(Debug, Deserialize)]
pub struct CatalogPage {
    /// Matches for the queried price window
    pub total: u64,
    /// Products in this page (server-reported)
    pub count: u64,
    pub products: Vec<Record>,
}
