//! Top-level orchestration of one enumeration run
//!
//! A run issues one query over the whole price domain to learn the population size,
//! then only recurses when that first page is not already the full answer. The first
//! page is handed to the enumerator as the seed for the full range, so the domain is
//! never queried twice.
//!
//! | Initial page | Calls | Action |
//! |--------------|-------|--------|
//! | `total == 0` | 1 | empty result |
//! | `total <= cap`, complete | 1 | initial records |
//! | otherwise | 1 + sweep | bisect from the seeded full range |
//!
//! Every run owns a fresh [`CallCounter`]; concurrent runs on one driver never
//! share counts.

use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{info, instrument};

use crate::counter::CallCounter;
use crate::enumerator::{
    RangeEnumerator, Residue, Sweep, SweepStatus, DEFAULT_MAX_CONCURRENT_REQUESTS,
};
use crate::errors::SweepError;
use crate::page::Record;
use crate::range::FilterRange;
use crate::source::{CountingSource, RangeSource};

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Window the run enumerated
    pub range: FilterRange,
    /// Population reported for the whole window by the initial query
    pub total: u64,
    /// Remote calls issued, successful or not
    pub calls: u64,
    /// Assembled records, ascending by price window
    pub records: Vec<Record>,
    /// Prices that could not be fully enumerated
    pub residues: Vec<Residue>,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn status(&self) -> SweepStatus {
        if self.residues.is_empty() {
            SweepStatus::Complete
        } else {
            SweepStatus::PartialUndercount {
                missing: self.missing(),
                residues: self.residues.len(),
            }
        }
    }

    /// `total` minus records returned
    pub fn missing(&self) -> u64 {
        self.total.saturating_sub(self.records.len() as u64)
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.status(), SweepStatus::Complete)
    }

    /// Serializable summary without the record payload
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            min_price: self.range.min,
            max_price: self.range.max,
            total: self.total,
            returned: self.records.len() as u64,
            calls: self.calls,
            elapsed_ms: self.elapsed.as_millis() as u64,
            residues: self.residues.clone(),
        }
    }
}

/// Run statistics for logs and export
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub min_price: i64,
    pub max_price: i64,
    pub total: u64,
    pub returned: u64,
    pub calls: u64,
    pub elapsed_ms: u64,
    pub residues: Vec<Residue>,
}

/// Runs full-domain enumerations against one source
pub struct EnumerationDriver<S> {
    source: S,
    cap: u64,
    max_concurrent_requests: usize,
}

impl<S: RangeSource> EnumerationDriver<S> {
    /// # Arguments
    ///
    /// * `source` - Client for the remote collection
    /// * `cap` - Server's per-call record cap
    pub fn new(source: S, cap: u64) -> Self {
        Self {
            source,
            cap,
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
        }
    }

    pub fn with_max_concurrent_requests(mut self, max_concurrent_requests: usize) -> Self {
        self.max_concurrent_requests = max_concurrent_requests;
        self
    }

    pub fn cap(&self) -> u64 {
        self.cap
    }

    /// Enumerate every record in `full_range`
    ///
    /// # Errors
    ///
    /// - `SweepError::InvalidRange` if `full_range.min > full_range.max` (no call issued)
    /// - Any remote, decode or transport failure; no partial records are returned
    #[instrument(skip_all, fields(range = %full_range, cap = self.cap))]
    pub async fn run(&self, full_range: FilterRange) -> Result<RunReport, SweepError> {
        if !full_range.is_valid() {
            return Err(SweepError::InvalidRange {
                min: full_range.min,
                max: full_range.max,
            });
        }

        let started = Instant::now();
        let counter = CallCounter::new();
        let source = CountingSource::new(&self.source, counter.clone());

        info!(
            event_type = "sweep_start",
            max_depth = full_range.max_split_depth(),
            max_concurrent_requests = self.max_concurrent_requests,
            "Querying full price domain"
        );

        let initial = source.fetch(full_range).await?;
        let total = initial.total;

        let sweep = if total == 0 {
            Sweep::default()
        } else if total <= self.cap && initial.is_complete() {
            Sweep {
                records: initial.records,
                residues: Vec::new(),
            }
        } else {
            info!(
                event_type = "sweep_recursing",
                total = total,
                count = initial.count,
                "Initial page incomplete, bisecting"
            );
            RangeEnumerator::with_max_concurrent_requests(source, self.max_concurrent_requests)
                .with_cap(self.cap)
                .enumerate(full_range, Some(initial))
                .await?
        };

        let report = RunReport {
            range: full_range,
            total,
            calls: counter.get(),
            records: sweep.records,
            residues: sweep.residues,
            elapsed: started.elapsed(),
        };

        info!(
            event_type = "sweep_complete",
            total = report.total,
            returned = report.records.len(),
            calls = report.calls,
            residues = report.residues.len(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Enumeration finished"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::SyntheticCatalog;

    #[tokio::test]
    async fn test_empty_domain_is_one_call() {
        let driver = EnumerationDriver::new(SyntheticCatalog::from_prices(vec![], 1_000), 1_000);

        let report = driver.run(FilterRange::new(0, 100_000)).await.unwrap();

        assert_eq!(report.total, 0);
        assert!(report.records.is_empty());
        assert_eq!(report.calls, 1);
        assert!(report.is_complete());
    }

    #[tokio::test]
    async fn test_population_under_cap_never_recurses() {
        let catalog = SyntheticCatalog::uniform(0, 100_000, 500, 1_000);
        let driver = EnumerationDriver::new(catalog, 1_000);

        let report = driver.run(FilterRange::new(0, 100_000)).await.unwrap();

        assert_eq!(report.records.len(), 500);
        assert_eq!(report.calls, 1);
    }

    #[tokio::test]
    async fn test_runs_do_not_share_counters() {
        let catalog = SyntheticCatalog::uniform(0, 100_000, 2_500, 1_000);
        let driver = EnumerationDriver::new(catalog, 1_000);
        let range = FilterRange::new(0, 100_000);

        let (first, second) = tokio::join!(driver.run(range), driver.run(range));
        let (first, second) = (first.unwrap(), second.unwrap());

        assert_eq!(first.calls, second.calls);
        assert_eq!(first.records, second.records);
    }

    #[tokio::test]
    async fn test_inverted_domain_is_rejected_without_calls() {
        let catalog = SyntheticCatalog::uniform(0, 10, 5, 10);
        let probe = catalog.clone();
        let driver = EnumerationDriver::new(catalog, 10);

        let err = driver.run(FilterRange::new(10, 0)).await.unwrap_err();

        assert!(matches!(err, SweepError::InvalidRange { min: 10, max: 0 }));
        assert_eq!(probe.fetches(), 0);
    }

    #[test]
    fn test_report_summary_and_status() {
        let report = RunReport {
            range: FilterRange::new(0, 10),
            total: 12,
            calls: 3,
            records: vec![],
            residues: vec![Residue {
                price: 4,
                total: 12,
                returned: 0,
            }],
            elapsed: Duration::from_millis(5),
        };

        assert_eq!(
            report.status(),
            SweepStatus::PartialUndercount {
                missing: 12,
                residues: 1
            }
        );
        let summary = report.summary();
        assert_eq!(summary.returned, 0);
        assert_eq!(summary.elapsed_ms, 5);
    }
}
