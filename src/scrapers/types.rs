use serde::{Deserialize, Serialize};
use std::fmt;

/// Check-in/check-out window a command operates on.
///
/// Dates are kept as `YYYY-MM-DD` text; lexicographic order on that format
/// is calendar order, which is all the store range query relies on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First check-in date
    pub start: String,
    /// Last check-out date
    pub end: String,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Whether a stay `[start_date, end_date]` falls inside this range
    pub fn contains(&self, start_date: &str, end_date: &str) -> bool {
        start_date >= self.start.as_str() && end_date <= self.end.as_str()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
