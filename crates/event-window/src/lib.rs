//! Trailing Window Aggregation
//!
//! Counts, for every sighting, how many sightings happened in the trailing
//! window ending at (and including) its own timestamp.

mod trailing;

pub use trailing::{RecentCounts, TrailingWindowCounter, DEFAULT_WINDOW_DAYS};
