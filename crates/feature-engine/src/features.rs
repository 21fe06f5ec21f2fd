//! Feature Vector Assembly

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sighting_data::{EventId, RiskLevel};

use crate::season::Season;

/// Number of model features per sighting
pub const FEATURE_DIMENSION: usize = 13;

/// Output columns, in the order the model expects them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureColumn {
    Latitude,
    Longitude,
    Hour,
    Month,
    Temperature,
    Precipitation,
    SnowDepth,
    Elevation,
    SlopeAngle,
    DistanceToSettlement,
    FruitAvailability,
    DistanceToCentroidKm,
    RecentBearReports,
}

impl FeatureColumn {
    pub const ALL: [FeatureColumn; FEATURE_DIMENSION] = [
        FeatureColumn::Latitude,
        FeatureColumn::Longitude,
        FeatureColumn::Hour,
        FeatureColumn::Month,
        FeatureColumn::Temperature,
        FeatureColumn::Precipitation,
        FeatureColumn::SnowDepth,
        FeatureColumn::Elevation,
        FeatureColumn::SlopeAngle,
        FeatureColumn::DistanceToSettlement,
        FeatureColumn::FruitAvailability,
        FeatureColumn::DistanceToCentroidKm,
        FeatureColumn::RecentBearReports,
    ];

    /// Position in the feature vector
    pub fn index(self) -> usize {
        self as usize
    }

    /// Output column name
    pub fn name(self) -> &'static str {
        FEATURE_COLUMNS[self.index()]
    }
}

/// Column header names, aligned with [`FeatureColumn::ALL`]
pub const FEATURE_COLUMNS: [&str; FEATURE_DIMENSION] = [
    "latitude",
    "longitude",
    "hour",
    "month",
    "temperature",
    "precipitation",
    "snow_depth",
    "elevation",
    "slope_angle",
    "distance_to_settlement",
    "fruit_availability",
    "distance_to_centroid_km",
    "recent_bear_reports",
];

/// One sighting with its filled feature vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub event_id: EventId,
    pub timestamp: NaiveDateTime,
    pub species: Option<String>,
    pub risk_level: RiskLevel,
    pub season: Season,
    /// Feature values in [`FEATURE_COLUMNS`] order
    pub values: [f64; FEATURE_DIMENSION],
}

impl FeatureRow {
    /// Value of one column
    pub fn get(&self, column: FeatureColumn) -> f64 {
        self.values[column.index()]
    }

    /// Hour of day (0-23)
    pub fn hour(&self) -> u32 {
        self.get(FeatureColumn::Hour) as u32
    }

    /// Month of year (1-12)
    pub fn month(&self) -> u32 {
        self.get(FeatureColumn::Month) as u32
    }

    /// Sightings in the trailing window
    pub fn recent_bear_reports(&self) -> u32 {
        self.get(FeatureColumn::RecentBearReports) as u32
    }

    /// Geodesic distance to the centroid (km)
    pub fn distance_to_centroid_km(&self) -> f64 {
        self.get(FeatureColumn::DistanceToCentroidKm)
    }
}

/// The feature table and its positionally aligned target vector
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub(crate) rows: Vec<FeatureRow>,
    pub(crate) target: Vec<u8>,
}

impl FeatureSet {
    /// Rows in input order
    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    /// `1` where the sighting was high risk, `0` otherwise
    pub fn target(&self) -> &[u8] {
        &self.target
    }

    /// Column names in output order
    pub fn columns(&self) -> &'static [&'static str] {
        &FEATURE_COLUMNS
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if there are no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of high-risk rows
    pub fn positive_count(&self) -> usize {
        self.target.iter().filter(|&&t| t == 1).count()
    }

    /// Row-major feature matrix
    pub fn matrix(&self) -> Vec<[f64; FEATURE_DIMENSION]> {
        self.rows.iter().map(|r| r.values).collect()
    }
}
