//! Catalog wire types → core types

use tracing::warn;

use pricesweep_core::{FilterRange, PageResult, SweepError};

use super::types::{CatalogError, CatalogPage};

impl From<CatalogPage> for PageResult {
    /// `count` is taken from the products actually present; a server-reported
    /// count that disagrees is logged and ignored.
    fn from(page: CatalogPage) -> Self {
        let returned = page.products.len() as u64;
        if page.count != returned {
            warn!(
                event_type = "count_mismatch",
                reported = page.count,
                returned = returned,
                "Server count disagrees with products returned"
            );
        }
        PageResult::new(page.total, page.products)
    }
}

impl CatalogError {
    /// Map a failed query for `range` onto the sweep error taxonomy
    pub fn into_sweep_error(self, range: FilterRange) -> SweepError {
        match self {
            CatalogError::HttpStatus { status, .. } => SweepError::RemoteQuery { range, status },
            CatalogError::Decode(e) => SweepError::Decode {
                range,
                message: e.to_string(),
            },
            other => SweepError::Transport {
                range,
                message: other.to_string(),
            },
        }
    }
}
