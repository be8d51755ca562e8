//! Remote collection providers
//!
//! Source-specific clients that answer inclusive price-window queries and plug into
//! the sweep through `pricesweep_core::RangeSource`.
//!
//! ## Supported Providers
//!
//! - `catalog` - JSON product catalog filtered by `minPrice`/`maxPrice`
//!
//! ## Adding New Providers
//!
//! ```text
//! providers/
//! └── [provider_name]/
//!     ├── mod.rs          # Public API and documentation
//!     ├── client.rs       # HTTP client + RangeSource impl
//!     ├── types.rs        # Wire structures and errors
//!     └── conversion.rs   # Convert to PageResult / SweepError
//! ```
//!
//! ## Design Principles
//!
//! 1. **Adapter pattern**: Convert provider format → `PageResult` (core format)
//! 2. **Error propagation**: Raise immediately, no silent failures, no retry
//! 3. **Stateless**: Call counting belongs to the run, not the client

#[cfg(feature = "catalog")]
pub mod catalog;

#[cfg(feature = "catalog")]
pub use catalog::{CatalogClient, CatalogError, CatalogPage};
