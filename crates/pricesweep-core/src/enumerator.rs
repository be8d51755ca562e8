//! Exhaustive range-bisection enumerator
//!
//! Resolves a price window into its complete record set, deciding purely from the
//! `(count, total)` a page reports whether the window is done or must be bisected.
//!
//! ## Cases (evaluated in this order against one page per window)
//!
//! | Case | Condition | Action |
//! |------|-----------|--------|
//! | Fully covered | `count >= total` | return the page's records |
//! | Unsplittable residue | `min == max`, `count < total` | return the page's records, report a [`Residue`] |
//! | Splittable | `min < max`, `count < total` | bisect, sweep both halves concurrently, concatenate lower then upper |
//!
//! A window with `min > max` yields an empty sweep and issues no call.
//!
//! ## Concurrency
//!
//! Both halves of a split are driven concurrently with `tokio::try_join!` and joined
//! before the parent resolves. The first error drops the sibling future and aborts the
//! sweep; nothing partial is returned. In-flight remote calls are bounded by a
//! semaphore whose permits are held only around the call itself, never across
//! recursion.

use futures::future::{BoxFuture, FutureExt};
use serde::Serialize;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::errors::SweepError;
use crate::page::{PageResult, Record};
use crate::range::FilterRange;
use crate::source::RangeSource;

/// Default ceiling on simultaneous remote calls
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 16;

/// A single price holding more records than one call can return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Residue {
    /// The price every record in this residue shares
    pub price: i64,
    /// Records the server reported at this price
    pub total: u64,
    /// Records actually returned
    pub returned: u64,
}

impl Residue {
    pub fn missing(&self) -> u64 {
        self.total.saturating_sub(self.returned)
    }
}

/// Completeness of a successful sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepStatus {
    /// Every matching record was returned
    Complete,
    /// One or more residues could not be fully enumerated by range narrowing
    PartialUndercount { missing: u64, residues: usize },
}

/// Records resolved for one window, lower prices first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sweep {
    pub records: Vec<Record>,
    pub residues: Vec<Residue>,
}

impl Sweep {
    fn covered(records: Vec<Record>) -> Self {
        Self {
            records,
            residues: Vec::new(),
        }
    }

    /// Concatenate a lower window's sweep with the adjacent upper window's
    fn merge(mut self, upper: Sweep) -> Self {
        self.records.extend(upper.records);
        self.residues.extend(upper.residues);
        self
    }

    /// Records the server matched but the sweep could not return
    pub fn missing(&self) -> u64 {
        self.residues.iter().map(Residue::missing).sum()
    }

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

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Recursive fork-join sweep over a [`RangeSource`]
pub struct RangeEnumerator<S> {
    source: S,
    limiter: Semaphore,
    cap: Option<u64>,
}

impl<S: RangeSource> RangeEnumerator<S> {
    pub fn new(source: S) -> Self {
        Self::with_max_concurrent_requests(source, DEFAULT_MAX_CONCURRENT_REQUESTS)
    }

    /// Bound simultaneous remote calls (a limit of 0 is treated as 1)
    pub fn with_max_concurrent_requests(source: S, max_concurrent_requests: usize) -> Self {
        Self {
            source,
            limiter: Semaphore::new(max_concurrent_requests.max(1)),
            cap: None,
        }
    }

    /// Declare the server's per-call cap; pages exceeding it are logged
    pub fn with_cap(mut self, cap: u64) -> Self {
        self.cap = Some(cap);
        self
    }

    /// Resolve `range` into its full record set
    ///
    /// `seed`, when given, must be the page already obtained by querying exactly
    /// `range`; it is used in place of a first fetch.
    ///
    /// # Errors
    ///
    /// Any remote, decode or transport failure in any branch.
    pub async fn enumerate(
        &self,
        range: FilterRange,
        seed: Option<PageResult>,
    ) -> Result<Sweep, SweepError> {
        if !range.is_valid() {
            warn!(
                event_type = "invalid_range",
                min = range.min,
                max = range.max,
                "Refusing to query inverted range, returning empty sweep"
            );
            return Ok(Sweep::default());
        }

        self.sweep(range, seed, 0).await
    }

    fn sweep(
        &self,
        range: FilterRange,
        seed: Option<PageResult>,
        depth: u32,
    ) -> BoxFuture<'_, Result<Sweep, SweepError>> {
        async move {
            let page = match seed {
                Some(page) => page,
                None => self.fetch(range).await?,
            };

            if page.is_complete() {
                return Ok(Sweep::covered(page.records));
            }

            let Some((lower, upper)) = range.split() else {
                let residue = Residue {
                    price: range.min,
                    total: page.total,
                    returned: page.count,
                };
                warn!(
                    event_type = "residue_detected",
                    price = residue.price,
                    total = residue.total,
                    returned = residue.returned,
                    missing = residue.missing(),
                    "Single price holds more records than one call returns"
                );
                return Ok(Sweep {
                    records: page.records,
                    residues: vec![residue],
                });
            };

            debug!(
                event_type = "range_split",
                range = %range,
                lower = %lower,
                upper = %upper,
                depth = depth,
                total = page.total,
                count = page.count,
                "Bisecting incomplete range"
            );

            // Parent page is discarded: the halves are queried afresh
            drop(page);

            let (low, high) = tokio::try_join!(
                self.sweep(lower, None, depth + 1),
                self.sweep(upper, None, depth + 1)
            )?;
            Ok(low.merge(high))
        }
        .boxed()
    }

    async fn fetch(&self, range: FilterRange) -> Result<PageResult, SweepError> {
        let page = {
            let _permit = self
                .limiter
                .acquire()
                .await
                .map_err(|e| SweepError::Transport {
                    range,
                    message: e.to_string(),
                })?;
            self.source.fetch(range).await
        };

        let page = page.inspect_err(|e| {
            warn!(
                event_type = "query_failed",
                range = %range,
                error = %e,
                "Range query failed, aborting sweep"
            );
        })?;

        if let Some(cap) = self.cap {
            if page.count > cap {
                warn!(
                    event_type = "cap_exceeded",
                    range = %range,
                    count = page.count,
                    cap = cap,
                    "Page holds more records than the declared per-call cap"
                );
            }
        }

        Ok(page)
    }
}
