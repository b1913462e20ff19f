//! Time window splitting for bounded audit log queries.
//!
//! The audit API caps the number of records a single call may return, so a
//! date range is walked in fixed-size sub-intervals rather than queried in
//! one shot.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// One query sub-interval. Both bounds are inclusive UTC instants with
/// `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Split `[start, end]` into consecutive windows of at most `interval`.
    ///
    /// Windows are contiguous (each starts where the previous one ended) and
    /// the final window ends exactly at `end`. A range shorter than one
    /// interval produces a single window; `start == end` produces a single
    /// zero-length window.
    pub fn split(start: DateTime<Utc>, end: DateTime<Utc>, interval: Duration) -> WindowIter {
        WindowIter {
            cursor: start,
            end,
            step: interval.max(Duration::minutes(1)),
            done: start > end,
        }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} .. {}", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

/// Lazy iterator over the sub-intervals of a range. `Clone` to restart.
#[derive(Debug, Clone)]
pub struct WindowIter {
    cursor: DateTime<Utc>,
    end: DateTime<Utc>,
    step: Duration,
    done: bool,
}

impl Iterator for WindowIter {
    type Item = TimeWindow;

    fn next(&mut self) -> Option<TimeWindow> {
        if self.done {
            return None;
        }
        let start = self.cursor;
        let end = (start + self.step).min(self.end);
        if end >= self.end {
            self.done = true;
        }
        self.cursor = end;
        Some(TimeWindow { start, end })
    }
}
