//! Inclusive price windows and their bisection
//!
//! ## Midpoint
//!
//! `mid = min + (max - min) / 2`, with the offset taken as an unsigned distance so
//! that neither `min + max` nor `max - min` can overflow, even for windows spanning
//! the whole `i64` domain. Because `max - min` is non-negative the division floors.
//!
//! ## Partition
//!
//! For `min < max` the halves `[min, mid]` and `[mid + 1, max]` are disjoint and
//! their union is exactly `[min, max]` (`mid < max` always holds).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed, inclusive interval over the price domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterRange {
    pub min: i64,
    pub max: i64,
}

impl FilterRange {
    /// Create a range. Does not validate; see [`FilterRange::is_valid`].
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Range covering exactly one price
    pub const fn single(value: i64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// `min <= max`
    pub const fn is_valid(&self) -> bool {
        self.min <= self.max
    }

    /// Range denotes one price and cannot be narrowed further
    pub const fn is_single_value(&self) -> bool {
        self.min == self.max
    }

    /// Number of distinct integer prices covered (0 for an invalid range)
    pub fn width(&self) -> u128 {
        if self.is_valid() {
            u128::from(self.max.abs_diff(self.min)) + 1
        } else {
            0
        }
    }

    pub const fn contains(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Floor midpoint, computed without overflow
    ///
    /// Only meaningful for valid ranges.
    pub fn midpoint(&self) -> i64 {
        let offset = self.max.abs_diff(self.min) / 2;
        // offset <= max - min, so the result never exceeds max
        self.min.saturating_add_unsigned(offset)
    }

    /// Bisect into `[min, mid]` and `[mid + 1, max]`
    ///
    /// Returns `None` for single-value or invalid ranges.
    pub fn split(&self) -> Option<(FilterRange, FilterRange)> {
        if self.min >= self.max {
            return None;
        }
        let mid = self.midpoint();
        Some((
            FilterRange::new(self.min, mid),
            FilterRange::new(mid + 1, self.max),
        ))
    }

    /// Upper bound on bisection depth: `ceil(log2(width))`
    pub fn max_split_depth(&self) -> u32 {
        match self.width() {
            0 | 1 => 0,
            w => 128 - (w - 1).leading_zeros(),
        }
    }
}

impl fmt::Display for FilterRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}
