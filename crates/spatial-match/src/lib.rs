//! Spatial Matching
//!
//! Two deliberately distinct metrics:
//! - flat squared distance in degree space, used to pick the nearest terrain cell
//! - WGS84 inverse geodesic, used for the distance to the sighting centroid

mod error;
mod geodesic;
mod nearest;

pub use error::MatchError;
pub use geodesic::{centroid, CentroidDistances, GeodesicDistance, Wgs84Geodesic};
pub use nearest::{flat_distance_sq, TerrainMatch, TerrainMatcher, TerrainMatches};
