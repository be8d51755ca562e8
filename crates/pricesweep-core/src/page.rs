//! One server response for one price window

use serde::{Deserialize, Serialize};

/// Opaque catalog record (field name → value). Never inspected by the enumerator.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// One page returned by a bounded query
///
/// `total` is the population of the *queried* window, not of the whole collection.
/// `count` is the number of records actually returned, bounded by the per-call cap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    pub total: u64,
    pub count: u64,
    pub records: Vec<Record>,
}

impl PageResult {
    /// Build a page, deriving `count` from the record batch
    pub fn new(total: u64, records: Vec<Record>) -> Self {
        Self {
            total,
            count: records.len() as u64,
            records,
        }
    }

    /// Page answering a window with no matches
    pub fn empty() -> Self {
        Self::default()
    }

    /// The page already holds every record in its window
    pub fn is_complete(&self) -> bool {
        self.count >= self.total
    }

    /// Records the server matched but did not return
    pub fn shortfall(&self) -> u64 {
        self.total.saturating_sub(self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: u64) -> Record {
        match json!({ "id": id }) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_new_derives_count() {
        let page = PageResult::new(10, vec![record(1), record(2)]);
        assert_eq!(page.count, 2);
        assert_eq!(page.shortfall(), 8);
        assert!(!page.is_complete());
    }

    #[test]
    fn test_empty_page_is_complete() {
        let page = PageResult::empty();
        assert!(page.is_complete());
        assert_eq!(page.shortfall(), 0);
    }
}
