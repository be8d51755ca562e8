//! Test utilities for sweep tests across the workspace
//!
//! ## Module Organization
//!
//! - `mod.rs`: record builders and the in-memory [`SyntheticCatalog`]
//! - `generators.rs`: deterministic price distributions

pub mod generators;

use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::SweepError;
use crate::page::{PageResult, Record};
use crate::range::FilterRange;
use crate::source::RangeSource;

/// Creates a catalog record with an id and a price
pub fn create_test_record(id: usize, price: i64) -> Record {
    match json!({ "id": id, "price": price }) {
        serde_json::Value::Object(map) => map,
        _ => unreachable!("json! object literal"),
    }
}

/// In-memory collection answering inclusive price-window queries with a per-call cap
///
/// Behaves like the remote catalog: `total` counts every match in the window, at
/// most `cap` records come back, lowest prices first. Clones share the in-flight
/// gauges, so a clone kept by the test can observe a catalog moved into an
/// enumerator.
#[derive(Debug, Clone)]
pub struct SyntheticCatalog {
    prices: Arc<Vec<i64>>,
    cap: usize,
    failures: Vec<(FilterRange, u16)>,
    fetches: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
}

impl SyntheticCatalog {
    /// Catalog holding one record per entry of `prices`
    pub fn from_prices(mut prices: Vec<i64>, cap: usize) -> Self {
        prices.sort_unstable();
        Self {
            prices: Arc::new(prices),
            cap,
            failures: Vec::new(),
            fetches: Arc::new(AtomicUsize::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// `n` records spread evenly over `[min, max]`
    pub fn uniform(min: i64, max: i64, n: usize, cap: usize) -> Self {
        Self::from_prices(generators::uniform_prices(min, max, n), cap)
    }

    /// Answer queries for exactly `range` with HTTP `status`
    pub fn failing_on(mut self, range: FilterRange, status: u16) -> Self {
        self.failures.push((range, status));
        self
    }

    /// Records stored in the catalog
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// `fetch` invocations seen so far, failed ones included
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Highest number of simultaneous `fetch` calls observed
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    fn page(&self, range: FilterRange) -> PageResult {
        let start = self.prices.partition_point(|&p| p < range.min);
        let end = self.prices.partition_point(|&p| p <= range.max).max(start);
        let records = self.prices[start..end]
            .iter()
            .enumerate()
            .take(self.cap)
            .map(|(offset, &price)| create_test_record(start + offset, price))
            .collect();
        PageResult::new((end - start) as u64, records)
    }
}

#[async_trait]
impl RangeSource for SyntheticCatalog {
    async fn fetch(&self, range: FilterRange) -> Result<PageResult, SweepError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        // Let sibling branches overlap with this call
        tokio::task::yield_now().await;

        let result = match self.failures.iter().find(|(r, _)| *r == range) {
            Some(&(_, status)) => Err(SweepError::RemoteQuery { range, status }),
            None => Ok(self.page(range)),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}
