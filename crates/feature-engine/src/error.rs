//! Assembly Error Types

use sighting_data::EventId;
use thiserror::Error;

/// Errors while assembling the feature table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    /// No sightings survived validation
    #[error("no valid sightings to build features from")]
    EmptyDataset,

    /// An upstream stage produced no result for a sighting
    #[error("{stage} has no result for sighting {id}")]
    MissingUpstream { stage: &'static str, id: EventId },
}
