//! Enumeration parameters

use serde::{Deserialize, Serialize};

/// Price domain, per-call cap and concurrency ceiling for a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Lowest price in the domain (inclusive)
    pub initial_min_price: i64,

    /// Highest price in the domain (inclusive)
    pub initial_max_price: i64,

    /// Most records the server returns for one query
    pub max_records_per_call: u64,

    /// Ceiling on simultaneous remote calls
    pub max_concurrent_requests: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            initial_min_price: 0,
            initial_max_price: 100_000,
            max_records_per_call: 1_000,
            max_concurrent_requests: 16,
        }
    }
}

impl SweepConfig {
    /// Validate the domain and limits
    pub fn validate(&self) -> Result<(), String> {
        if self.initial_min_price > self.initial_max_price {
            return Err(format!(
                "initial_min_price {} exceeds initial_max_price {}",
                self.initial_min_price, self.initial_max_price
            ));
        }

        if self.max_records_per_call == 0 {
            return Err("max_records_per_call must be at least 1".to_string());
        }

        if self.max_concurrent_requests == 0 {
            return Err("max_concurrent_requests must be at least 1".to_string());
        }

        Ok(())
    }
}
