//! Spatial Matching Error Types

use thiserror::Error;

/// Errors raised by the spatial stages
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// The terrain reference grid is empty
    #[error("terrain grid is empty")]
    NoTerrainData,

    /// No sightings to compute a centroid from
    #[error("no sightings to compute a centroid from")]
    EmptyDataset,
}
