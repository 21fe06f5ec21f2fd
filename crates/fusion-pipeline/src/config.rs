//! Pipeline configuration

use std::path::{Path, PathBuf};

use chrono::TimeDelta;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use sighting_data::InvalidRecordPolicy;

use crate::error::PipelineError;

/// Environment variables override file settings, e.g. `BEAR_FEATURES__WINDOW_DAYS=14`
pub const ENV_PREFIX: &str = "BEAR_FEATURES";

/// Largest accepted `window_days` (about a century)
pub const MAX_WINDOW_DAYS: i64 = 36_500;

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Sighting table (CSV)
    pub events_path: PathBuf,
    /// Weather telemetry table (CSV)
    pub weather_path: PathBuf,
    /// Terrain grid (CSV)
    pub terrain_path: PathBuf,
    /// Look-back of the `recent_bear_reports` feature (days)
    pub window_days: i64,
    /// Skip or reject sighting rows that fail validation
    pub invalid_records: InvalidRecordPolicy,
    /// Run the independent stages on the rayon pool
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            events_path: PathBuf::from("data/bear_reports.csv"),
            weather_path: PathBuf::from("data/weather_observations.csv"),
            terrain_path: PathBuf::from("data/terrain_features.csv"),
            window_days: 7,
            invalid_records: InvalidRecordPolicy::Skip,
            parallel: true,
        }
    }
}

impl PipelineConfig {
    /// Load defaults, then an optional file, then `BEAR_FEATURES__*` variables
    pub fn load(path: Option<&Path>) -> Result<Self, PipelineError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Self::finish(settings)
    }

    /// Parse a TOML document over the defaults
    pub fn from_toml(toml: &str) -> Result<Self, PipelineError> {
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        Self::finish(settings)
    }

    fn finish(settings: Config) -> Result<Self, PipelineError> {
        let config: PipelineConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), PipelineError> {
        if !(1..=MAX_WINDOW_DAYS).contains(&self.window_days) {
            return Err(PipelineError::Config(format!(
                "window_days must be within 1..={}, got {}",
                MAX_WINDOW_DAYS, self.window_days
            )));
        }
        Ok(())
    }

    /// Trailing window as a duration
    pub fn window(&self) -> TimeDelta {
        TimeDelta::try_days(self.window_days).unwrap_or(TimeDelta::MAX)
    }

    /// Create strict config (abort on the first bad sighting)
    pub fn strict() -> Self {
        Self {
            invalid_records: InvalidRecordPolicy::Reject,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.window_days, 7);
        assert_eq!(config.window(), TimeDelta::days(7));
        assert_eq!(config.invalid_records, InvalidRecordPolicy::Skip);
        assert!(config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let config = PipelineConfig::from_toml(
            r#"
            events_path = "/srv/akita/bear_reports.csv"
            window_days = 14
            invalid_records = "reject"
            parallel = false
            "#,
        )
        .unwrap();
        assert_eq!(config.events_path, PathBuf::from("/srv/akita/bear_reports.csv"));
        assert_eq!(config.weather_path, PipelineConfig::default().weather_path);
        assert_eq!(config.window_days, 14);
        assert_eq!(config.invalid_records, InvalidRecordPolicy::Reject);
        assert!(!config.parallel);
    }

    #[test]
    fn test_non_positive_window_rejected() {
        let err = PipelineConfig::from_toml("window_days = 0").unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn test_huge_window_rejected() {
        let err = PipelineConfig::from_toml("window_days = 100000000").unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
        assert!(PipelineConfig::from_toml("window_days = 36500").is_ok());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = PipelineConfig::load(Some(Path::new("/nonexistent/bear-features.toml")));
        assert!(matches!(err, Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_strict() {
        assert_eq!(
            PipelineConfig::strict().invalid_records,
            InvalidRecordPolicy::Reject
        );
    }
}
