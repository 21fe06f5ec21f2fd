//! Feature Engineering Engine
//!
//! Joins the aligned weather, matched terrain, centroid distances and trailing
//! counts onto each sighting and produces the model-ready feature table with
//! its binary target.

mod assembler;
mod error;
mod export;
mod features;
mod fill;
mod season;

pub use assembler::{AssemblyInputs, FeatureAssembler};
pub use error::AssemblyError;
pub use features::{FeatureColumn, FeatureRow, FeatureSet, FEATURE_COLUMNS, FEATURE_DIMENSION};
pub use fill::forward_fill;
pub use season::Season;
