//! Nearest Terrain Cell Matching

use std::cmp::Ordering;
use std::collections::BTreeMap;

use sighting_data::{Event, EventId, GeoPoint, TerrainCell};
use tracing::debug;

use crate::error::MatchError;

/// Squared Euclidean distance in raw degree space
pub fn flat_distance_sq(a: GeoPoint, b: GeoPoint) -> f64 {
    let dlat = a.latitude - b.latitude;
    let dlon = a.longitude - b.longitude;
    dlat * dlat + dlon * dlon
}

/// The terrain cell chosen for one sighting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainMatch {
    /// Index into the original terrain sequence
    pub cell_index: usize,
    pub distance_sq: f64,
}

/// Chosen cells keyed by sighting id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TerrainMatches {
    matches: BTreeMap<EventId, TerrainMatch>,
}

impl TerrainMatches {
    /// Match for one sighting
    pub fn get(&self, id: EventId) -> Option<&TerrainMatch> {
        self.matches.get(&id)
    }

    /// Number of matched sightings
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Check if nothing was matched
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Iterate matches in id order
    pub fn iter(&self) -> impl Iterator<Item = (&EventId, &TerrainMatch)> {
        self.matches.iter()
    }
}

/// Brute-force nearest-neighbour matcher over a fixed terrain grid
#[derive(Debug, Clone, Copy)]
pub struct TerrainMatcher<'a> {
    cells: &'a [TerrainCell],
}

impl<'a> TerrainMatcher<'a> {
    /// Create a matcher; the grid must not be empty
    pub fn new(cells: &'a [TerrainCell]) -> Result<Self, MatchError> {
        if cells.is_empty() {
            return Err(MatchError::NoTerrainData);
        }
        Ok(Self { cells })
    }

    /// Terrain grid being searched
    pub fn cells(&self) -> &'a [TerrainCell] {
        self.cells
    }

    /// Cell referenced by a match
    pub fn cell(&self, m: &TerrainMatch) -> Option<&'a TerrainCell> {
        self.cells.get(m.cell_index)
    }

    /// Closest cell to `point`; ties keep the lowest index
    pub fn nearest(&self, point: GeoPoint) -> TerrainMatch {
        let mut best = TerrainMatch {
            cell_index: 0,
            distance_sq: flat_distance_sq(point, self.cells[0].point()),
        };

        for (cell_index, cell) in self.cells.iter().enumerate().skip(1) {
            let distance_sq = flat_distance_sq(point, cell.point());
            if distance_sq.total_cmp(&best.distance_sq) == Ordering::Less {
                best = TerrainMatch {
                    cell_index,
                    distance_sq,
                };
            }
        }

        best
    }

    /// Match every sighting, O(events × cells)
    pub fn match_events(&self, events: &[Event]) -> TerrainMatches {
        let matches: BTreeMap<_, _> = events
            .iter()
            .map(|event| (event.id, self.nearest(event.point())))
            .collect();

        debug!(
            "Matched {} sightings against {} terrain cells",
            matches.len(),
            self.cells.len()
        );

        TerrainMatches { matches }
    }
}
