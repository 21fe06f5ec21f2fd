//! Pipeline run: load, fan out the independent stages, assemble

use std::collections::BTreeSet;
use std::time::Instant;

use event_window::{RecentCounts, TrailingWindowCounter};
use feature_engine::{AssemblyInputs, FeatureAssembler, FeatureSet};
use sighting_data::{load_events, load_terrain, load_weather, SourceTables, Validator};
use spatial_match::{
    CentroidDistances, GeodesicDistance, TerrainMatcher, TerrainMatches, Wgs84Geodesic,
};
use tracing::{debug, info};
use weather_align::{AlignedWeather, WeatherAligner};

use crate::config::PipelineConfig;
use crate::error::PipelineError;

/// Results of the four stages that only read the loaded tables
struct StageOutputs {
    weather: AlignedWeather,
    matches: TerrainMatches,
    distances: CentroidDistances,
    recent: RecentCounts,
}

/// One configured run of the fusion pipeline
pub struct FeaturePipeline<'g> {
    config: PipelineConfig,
    geodesic: &'g dyn GeodesicDistance,
}

impl<'g> FeaturePipeline<'g> {
    /// Create a pipeline with an injected geodesy service
    pub fn new(config: PipelineConfig, geodesic: &'g dyn GeodesicDistance) -> Self {
        Self { config, geodesic }
    }

    /// Configuration of this run
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Read the three source tables named in the configuration
    pub fn load_sources(&self) -> Result<SourceTables, PipelineError> {
        let validator = Validator::new(self.config.invalid_records);
        Ok(SourceTables {
            events: load_events(&self.config.events_path, &validator)?,
            weather: load_weather(&self.config.weather_path)?,
            terrain: load_terrain(&self.config.terrain_path)?,
        })
    }

    /// Load the configured tables and run
    pub fn run_from_files(&self) -> Result<FeatureSet, PipelineError> {
        let tables = self.load_sources()?;
        self.run(&tables)
    }

    /// Build the feature table from materialized tables
    pub fn run(&self, tables: &SourceTables) -> Result<FeatureSet, PipelineError> {
        let started = Instant::now();

        if tables.events.is_empty() {
            return Err(PipelineError::EmptyDataset);
        }
        let mut seen = BTreeSet::new();
        for event in &tables.events {
            if !event.latitude.is_finite() || !event.longitude.is_finite() {
                return Err(PipelineError::InvalidRecord(format!(
                    "sighting {} has non-finite coordinates",
                    event.id
                )));
            }
            if !seen.insert(event.id) {
                return Err(PipelineError::InvalidRecord(format!(
                    "sighting id {} is not unique",
                    event.id
                )));
            }
        }
        let matcher = TerrainMatcher::new(&tables.terrain)?;

        info!(
            "Fusing {} sightings, {} weather observations, {} terrain cells",
            tables.events.len(),
            tables.weather.len(),
            tables.terrain.len()
        );

        let outputs = if self.config.parallel {
            self.run_stages_parallel(tables, matcher)?
        } else {
            self.run_stages_sequential(tables, matcher)?
        };
        debug!(
            "Stages done: {} weather hours, centroid ({:.5}, {:.5})",
            outputs.weather.len(),
            outputs.distances.centroid().latitude,
            outputs.distances.centroid().longitude
        );

        let feature_set = FeatureAssembler::new().assemble(AssemblyInputs {
            events: &tables.events,
            weather: &outputs.weather,
            terrain: &tables.terrain,
            matches: &outputs.matches,
            distances: &outputs.distances,
            recent: &outputs.recent,
        })?;

        info!(
            "Built {} feature rows in {} ms",
            feature_set.len(),
            started.elapsed().as_millis()
        );
        Ok(feature_set)
    }

    fn run_stages_sequential(
        &self,
        tables: &SourceTables,
        matcher: TerrainMatcher<'_>,
    ) -> Result<StageOutputs, PipelineError> {
        let counter = TrailingWindowCounter::new(self.config.window());
        Ok(StageOutputs {
            weather: WeatherAligner::new().align(&tables.weather)?,
            matches: matcher.match_events(&tables.events),
            distances: CentroidDistances::compute(&tables.events, self.geodesic)?,
            recent: counter.count(&tables.events),
        })
    }

    fn run_stages_parallel(
        &self,
        tables: &SourceTables,
        matcher: TerrainMatcher<'_>,
    ) -> Result<StageOutputs, PipelineError> {
        let events = &tables.events;
        let geodesic = self.geodesic;
        let counter = TrailingWindowCounter::new(self.config.window());

        let ((weather, matches), (distances, recent)) = rayon::join(
            || {
                rayon::join(
                    || WeatherAligner::new().align(&tables.weather),
                    || matcher.match_events(events),
                )
            },
            || {
                rayon::join(
                    || CentroidDistances::compute(events, geodesic),
                    || counter.count(events),
                )
            },
        );

        Ok(StageOutputs {
            weather: weather?,
            matches,
            distances: distances?,
            recent,
        })
    }
}

/// Run with a WGS84 geodesy service scoped to this call
pub fn build_features(config: PipelineConfig) -> Result<FeatureSet, PipelineError> {
    config.validate()?;
    let geodesic = Wgs84Geodesic::new();
    FeaturePipeline::new(config, &geodesic).run_from_files()
}
