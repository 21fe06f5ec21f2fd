//! Two-Pointer Trailing Window Counter

use std::collections::BTreeMap;

use chrono::TimeDelta;
use sighting_data::{Event, EventId};
use tracing::debug;

/// Look-back used for `recent_bear_reports`
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Trailing counts keyed by sighting id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentCounts {
    counts: BTreeMap<EventId, u32>,
}

impl RecentCounts {
    /// Count for one sighting
    pub fn get(&self, id: EventId) -> Option<u32> {
        self.counts.get(&id).copied()
    }

    /// Number of counted sightings
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if nothing was counted
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Counts lined up with `events`
    pub fn in_order_of(&self, events: &[Event]) -> Vec<Option<u32>> {
        events.iter().map(|e| self.get(e.id)).collect()
    }
}

/// Counts sightings in `[t - window, t]` for each sighting at `t`
#[derive(Debug, Clone, Copy)]
pub struct TrailingWindowCounter {
    window: TimeDelta,
}

impl Default for TrailingWindowCounter {
    fn default() -> Self {
        Self::new(TimeDelta::days(DEFAULT_WINDOW_DAYS))
    }
}

impl TrailingWindowCounter {
    /// Create a new counter; negative windows are clamped to zero
    pub fn new(window: TimeDelta) -> Self {
        Self {
            window: window.max(TimeDelta::zero()),
        }
    }

    /// Look-back of this counter
    pub fn window(&self) -> TimeDelta {
        self.window
    }

    /// Count every sighting's trailing window.
    ///
    /// Sightings are sorted by `(timestamp, id)`. The left boundary only moves
    /// forward; the right edge covers every sighting sharing the current
    /// timestamp so simultaneous sightings all count each other. This differs
    /// from a positional rolling count, where an earlier tied row misses the
    /// rows sorted after it.
    pub fn count(&self, events: &[Event]) -> RecentCounts {
        let mut sorted: Vec<&Event> = events.iter().collect();
        sorted.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)));

        let mut counts = BTreeMap::new();
        let mut left = 0;
        let mut start = 0;

        while start < sorted.len() {
            let t = sorted[start].timestamp;

            let mut end = start;
            while end + 1 < sorted.len() && sorted[end + 1].timestamp == t {
                end += 1;
            }

            // a window reaching before the calendar start keeps everything
            if let Some(oldest) = t.checked_sub_signed(self.window) {
                while sorted[left].timestamp < oldest {
                    left += 1;
                }
            }

            let count = (end - left + 1) as u32;
            for event in &sorted[start..=end] {
                counts.insert(event.id, count);
            }

            start = end + 1;
        }

        debug!(
            "Counted trailing {}h windows for {} sightings",
            self.window.num_hours(),
            counts.len()
        );

        RecentCounts { counts }
    }
}
