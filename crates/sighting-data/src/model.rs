//! Source Table Rows

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Sequential identifier assigned to each sighting on load
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventId(pub usize);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a new point
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Upstream severity category of a sighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Binary training label: only the highest tier is positive
    pub fn label(self) -> u8 {
        u8::from(self == RiskLevel::High)
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    /// Accepts the English categories (any case) and the prefectural
    /// open-data labels 高/中/低.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "高" => Ok(RiskLevel::High),
            "中" => Ok(RiskLevel::Medium),
            "低" => Ok(RiskLevel::Low),
            other => match other.to_ascii_lowercase().as_str() {
                "high" => Ok(RiskLevel::High),
                "medium" => Ok(RiskLevel::Medium),
                "low" => Ok(RiskLevel::Low),
                _ => Err(other.to_string()),
            },
        }
    }
}

/// A validated bear sighting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub timestamp: NaiveDateTime,
    pub latitude: f64,
    pub longitude: f64,
    pub species: Option<String>,
    pub risk_level: RiskLevel,
}

impl Event {
    /// Sighting location
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// One station reading; every measurement may be missing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub observed_at: NaiveDateTime,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub temperature: Option<f64>,
    pub precipitation: Option<f64>,
    pub snow_depth: Option<f64>,
}

/// Static reference cell of the terrain grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainCell {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<f64>,
    pub slope_angle: Option<f64>,
    pub distance_to_settlement: Option<f64>,
    pub fruit_availability: Option<f64>,
}

impl TerrainCell {
    /// Cell centre
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// The three materialized input tables of one run
#[derive(Debug, Clone, Default)]
pub struct SourceTables {
    pub events: Vec<Event>,
    pub weather: Vec<WeatherObservation>,
    pub terrain: Vec<TerrainCell>,
}
