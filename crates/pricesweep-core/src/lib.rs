//! Exhaustive enumeration of capped price-window queries
//!
//! Retrieves every record of a remote collection that can only be filtered by an
//! inclusive `[min, max]` price window and that returns at most `cap` records per
//! call, using range bisection driven by the `(count, total)` each page reports.
//!
//! ## Features
//!
//! - Overflow-free floor midpoint, exact partition of every split
//! - Fork-join sweep of both halves with a bounded number of in-flight calls
//! - Seeded enumeration: a range already queried is never queried again
//! - Run-owned atomic call counter
//! - Tagged outcomes: `Complete` or `PartialUndercount` (single prices holding more
//!   than `cap` records), fatal errors as `Err`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pricesweep_core::{EnumerationDriver, FilterRange};
//!
//! let driver = EnumerationDriver::new(client, 1_000).with_max_concurrent_requests(16);
//! let report = driver.run(FilterRange::new(0, 100_000)).await?;
//! println!("{} of {} records in {} calls", report.records.len(), report.total, report.calls);
//! ```

pub mod counter;
pub mod driver;
pub mod enumerator;
pub mod errors;
pub mod page;
pub mod range;
pub mod source;

// Test utilities (only available in test builds or with test-utils feature)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export commonly used types
pub use counter::CallCounter;
pub use driver::{EnumerationDriver, RunReport, RunSummary};
pub use enumerator::{
    RangeEnumerator, Residue, Sweep, SweepStatus, DEFAULT_MAX_CONCURRENT_REQUESTS,
};
pub use errors::SweepError;
pub use page::{PageResult, Record};
pub use range::FilterRange;
pub use source::{CountingSource, RangeSource};
