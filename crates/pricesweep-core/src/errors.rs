//! Sweep error types
//!
//! Every variant except `InvalidRange` is fatal to a run: the first failure in any
//! branch of the fork-join tree aborts the whole enumeration and no partial record
//! set is returned.

use thiserror::Error;

use crate::range::FilterRange;

/// Errors raised while enumerating a price window
#[derive(Error, Debug)]
pub enum SweepError {
    /// The remote collection answered with a non-success status
    #[error("Remote query failed for {range}: HTTP {status}")]
    RemoteQuery { range: FilterRange, status: u16 },

    /// The response body did not decode into a page
    #[error("Failed to decode page for {range}: {message}")]
    Decode { range: FilterRange, message: String },

    /// The request never produced a response (connect, timeout, body stream)
    #[error("Transport error for {range}: {message}")]
    Transport { range: FilterRange, message: String },

    /// A range with `min > max` was presented where a query was expected
    #[error("Invalid range: min {min} exceeds max {max}")]
    InvalidRange { min: i64, max: i64 },
}

impl SweepError {
    /// The range whose query produced this error, if any
    pub fn range(&self) -> Option<FilterRange> {
        match self {
            SweepError::RemoteQuery { range, .. }
            | SweepError::Decode { range, .. }
            | SweepError::Transport { range, .. } => Some(*range),
            SweepError::InvalidRange { .. } => None,
        }
    }

    /// HTTP status carried by a remote failure
    pub fn status(&self) -> Option<u16> {
        match self {
            SweepError::RemoteQuery { status, .. } => Some(*status),
            _ => None,
        }
    }
}
