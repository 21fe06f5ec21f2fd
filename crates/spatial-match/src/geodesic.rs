//! Geodesic Distance to the Sighting Centroid

use std::collections::BTreeMap;

use geographiclib_rs::{Geodesic, InverseGeodesic};
use sighting_data::{Event, EventId, GeoPoint};
use tracing::debug;

use crate::error::MatchError;

/// Distance service injected into a pipeline run
pub trait GeodesicDistance: Send + Sync {
    /// Distance between two points in kilometres
    fn distance_km(&self, from: GeoPoint, to: GeoPoint) -> f64;
}

/// Inverse geodesic on the WGS84 ellipsoid
#[derive(Debug, Clone)]
pub struct Wgs84Geodesic {
    geod: Geodesic,
}

impl Wgs84Geodesic {
    /// Create a new WGS84 service
    pub fn new() -> Self {
        Self {
            geod: Geodesic::wgs84(),
        }
    }
}

impl Default for Wgs84Geodesic {
    fn default() -> Self {
        Self::new()
    }
}

impl GeodesicDistance for Wgs84Geodesic {
    fn distance_km(&self, from: GeoPoint, to: GeoPoint) -> f64 {
        let meters: f64 = self
            .geod
            .inverse(from.latitude, from.longitude, to.latitude, to.longitude);
        meters / 1000.0
    }
}

/// Arithmetic mean latitude and longitude of all sightings
pub fn centroid(events: &[Event]) -> Result<GeoPoint, MatchError> {
    if events.is_empty() {
        return Err(MatchError::EmptyDataset);
    }
    let n = events.len() as f64;
    let (lat_sum, lon_sum) = events
        .iter()
        .fold((0.0, 0.0), |(lat, lon), e| (lat + e.latitude, lon + e.longitude));
    Ok(GeoPoint::new(lat_sum / n, lon_sum / n))
}

/// Per-sighting distance to the centroid
#[derive(Debug, Clone, PartialEq)]
pub struct CentroidDistances {
    centroid: GeoPoint,
    distances: BTreeMap<EventId, f64>,
}

impl CentroidDistances {
    /// Compute distances with the given geodesy service
    pub fn compute(events: &[Event], geodesic: &dyn GeodesicDistance) -> Result<Self, MatchError> {
        let centroid = centroid(events)?;
        let distances = events
            .iter()
            .map(|e| (e.id, geodesic.distance_km(e.point(), centroid)))
            .collect();

        debug!(
            "Centroid at ({:.5}, {:.5}) over {} sightings",
            centroid.latitude,
            centroid.longitude,
            events.len()
        );

        Ok(Self {
            centroid,
            distances,
        })
    }

    /// Mean position of all sightings
    pub fn centroid(&self) -> GeoPoint {
        self.centroid
    }

    /// Distance for one sighting (km)
    pub fn get(&self, id: EventId) -> Option<f64> {
        self.distances.get(&id).copied()
    }

    /// Number of sightings measured
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Check if no sighting was measured
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}
