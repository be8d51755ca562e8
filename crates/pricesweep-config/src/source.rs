//! Remote catalog configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Remote catalog connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Catalog endpoint; `minPrice`/`maxPrice` are appended per query
    pub base_url: String,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.ecommerce.com/products".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl SourceConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
