//! Price-filterable product catalog over HTTP
//!
//! ## Data Format
//!
//! **API**: `GET {base_url}?minPrice={min}&maxPrice={max}` (bounds inclusive)
//!
//! **Response**:
//! ```json
//! { "total": 2500, "count": 1000, "products": [ { "...": "..." } ] }
//! ```
//!
//! - `total`: matches within the queried window, not the whole catalog
//! - `count`: products in this page, never more than the server's per-call cap
//! - `products`: opaque objects, passed through untouched
//!
//! ## Error Handling
//!
//! **Policy**: Fail-fast, no retry
//!
//! - **HTTP errors**: any non-2xx status → `CatalogError::HttpStatus`
//! - **Transport errors**: connect failure, timeout → `CatalogError::Transport` / `Timeout`
//! - **Body errors**: not a catalog page → `CatalogError::Decode`
//!
//! Through the `RangeSource` impl these surface as `SweepError::RemoteQuery`,
//! `SweepError::Transport` and `SweepError::Decode`.

pub mod client;
pub mod conversion;
pub mod types;

// Re-export main types for convenience
pub use client::{CatalogClient, DEFAULT_REQUEST_TIMEOUT_SECS};
pub use types::{CatalogError, CatalogPage};
