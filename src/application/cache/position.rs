//! Single-slot position memo.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::domain::PositionRecord;

/// Holds at most one record and the instant it was fetched.
///
/// There is exactly one satellite and one endpoint, so the slot is keyed
/// only by age. Record and timestamp are always set and cleared together.
#[derive(Debug, Default)]
pub struct PositionSlot {
    record: Option<Arc<PositionRecord>>,
    fetched_at: Option<Instant>,
}

impl PositionSlot {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            record: None,
            fetched_at: None,
        }
    }

    /// Age of the held record at `now`, if any.
    #[must_use]
    pub fn age(&self, now: Instant) -> Option<Duration> {
        self.fetched_at.map(|at| now.saturating_duration_since(at))
    }

    /// The held record if it is younger than `window`.
    ///
    /// A zero window never yields a record.
    #[must_use]
    pub fn fresh(&self, now: Instant, window: Duration) -> Option<Arc<PositionRecord>> {
        match self.age(now) {
            Some(age) if age < window => self.record.clone(),
            _ => None,
        }
    }

    /// Replace the held record and return the shared handle.
    pub fn store(&mut self, record: PositionRecord, at: Instant) -> Arc<PositionRecord> {
        let record = Arc::new(record);
        self.record = Some(Arc::clone(&record));
        self.fetched_at = Some(at);
        record
    }

    /// Forget the held record.
    pub fn clear(&mut self) {
        self.record = None;
        self.fetched_at = None;
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.record.is_none()
    }
}
