use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A maximal contiguous interval during which an object satisfies the joint visibility
/// predicate. Both bounds are sampled instants and both are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ObservationWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Returns the duration of this window in hours.
    pub fn duration_hours(&self) -> f64 {
        self.duration().num_seconds() as f64 / 3600.0
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Closed-interval overlap test.
    pub fn overlaps(&self, other: &ObservationWindow) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// `HH:MM UTC → HH:MM UTC`, the form used in reports and notifications.
    pub fn describe(&self) -> String {
        format!(
            "{} → {}",
            self.start.format("%H:%M UTC"),
            self.end.format("%H:%M UTC")
        )
    }
}
