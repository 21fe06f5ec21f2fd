//! Pipeline Error Types

use feature_engine::AssemblyError;
use sighting_data::LoadError;
use spatial_match::MatchError;
use thiserror::Error;
use weather_align::AlignError;

/// Fatal errors of a pipeline run; none of them are retried
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Configuration could not be read or is inconsistent
    #[error("configuration error: {0}")]
    Config(String),

    /// A source table could not be loaded
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A sighting handed to the core violates its preconditions
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// Weather telemetry cannot be put on an hourly grid
    #[error(transparent)]
    Weather(#[from] AlignError),

    /// The terrain grid is empty
    #[error("terrain grid is empty")]
    NoTerrainData,

    /// No valid sightings survived loading
    #[error("no valid sightings after filtering")]
    EmptyDataset,

    /// Feature assembly failed
    #[error(transparent)]
    Assembly(AssemblyError),
}

impl From<config::ConfigError> for PipelineError {
    fn from(err: config::ConfigError) -> Self {
        PipelineError::Config(err.to_string())
    }
}

impl From<MatchError> for PipelineError {
    fn from(err: MatchError) -> Self {
        match err {
            MatchError::NoTerrainData => PipelineError::NoTerrainData,
            MatchError::EmptyDataset => PipelineError::EmptyDataset,
        }
    }
}

impl From<AssemblyError> for PipelineError {
    fn from(err: AssemblyError) -> Self {
        match err {
            AssemblyError::EmptyDataset => PipelineError::EmptyDataset,
            other => PipelineError::Assembly(other),
        }
    }
}
