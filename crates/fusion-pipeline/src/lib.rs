//! Bear Sighting Feature Fusion Pipeline
//!
//! Fuses sighting events, hourly weather telemetry and a static terrain grid
//! into one aligned feature table plus a binary high-risk target.
//!
//! The weather aligner, terrain matcher, centroid distance and trailing window
//! stages only read the loaded tables and run side by side; the feature
//! assembler joins their results.

mod config;
mod error;
mod pipeline;

pub use config::{PipelineConfig, ENV_PREFIX, MAX_WINDOW_DAYS};
pub use error::PipelineError;
pub use pipeline::{build_features, FeaturePipeline};

pub use feature_engine::{FeatureColumn, FeatureRow, FeatureSet, Season, FEATURE_COLUMNS};
pub use sighting_data::{
    Event, EventId, InvalidRecordPolicy, RiskLevel, SourceTables, TerrainCell, WeatherObservation,
};
pub use spatial_match::{GeodesicDistance, Wgs84Geodesic};

use tracing_subscriber::EnvFilter;

/// Initialize logging.
///
/// Honours `RUST_LOG`, defaulting to `info`. Calling it again is a no-op.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
