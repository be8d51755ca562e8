//! Bounded query seam between the enumerator and a remote collection

use async_trait::async_trait;
use std::sync::Arc;

use crate::counter::CallCounter;
use crate::errors::SweepError;
use crate::page::PageResult;
use crate::range::FilterRange;

/// Anything that can answer one inclusive price-window query
///
/// Implementations issue exactly one remote call per `fetch`, perform no retry and
/// do not validate `min <= max` (the enumerator guarantees it).
#[async_trait]
pub trait RangeSource: Send + Sync {
    async fn fetch(&self, range: FilterRange) -> Result<PageResult, SweepError>;
}

#[async_trait]
impl<S: RangeSource + ?Sized> RangeSource for Arc<S> {
    async fn fetch(&self, range: FilterRange) -> Result<PageResult, SweepError> {
        (**self).fetch(range).await
    }
}

#[async_trait]
impl<'a, S: RangeSource + ?Sized> RangeSource for &'a S {
    async fn fetch(&self, range: FilterRange) -> Result<PageResult, SweepError> {
        (**self).fetch(range).await
    }
}

/// Wraps a source and counts every fetch attempt into a run-owned counter
///
/// The counter is bumped before the call is awaited, so failed calls are counted too.
pub struct CountingSource<S> {
    inner: S,
    counter: CallCounter,
}

impl<S: RangeSource> CountingSource<S> {
    pub fn new(inner: S, counter: CallCounter) -> Self {
        Self { inner, counter }
    }

    pub fn counter(&self) -> &CallCounter {
        &self.counter
    }
}

#[async_trait]
impl<S: RangeSource> RangeSource for CountingSource<S> {
    async fn fetch(&self, range: FilterRange) -> Result<PageResult, SweepError> {
        self.counter.increment();
        self.inner.fetch(range).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    #[async_trait]
    impl RangeSource for Failing {
        async fn fetch(&self, range: FilterRange) -> Result<PageResult, SweepError> {
            Err(SweepError::RemoteQuery { range, status: 503 })
        }
    }

    #[tokio::test]
    async fn test_failed_calls_are_counted() {
        let counter = CallCounter::new();
        let source = CountingSource::new(Failing, counter.clone());

        assert!(source.fetch(FilterRange::new(0, 1)).await.is_err());
        assert!(source.fetch(FilterRange::new(0, 1)).await.is_err());
        assert_eq!(counter.get(), 2);
    }
}
