//! Sighting Data Tables
//!
//! Typed rows for the three source tables (bear sightings, weather telemetry,
//! terrain grid), CSV loading and record validation.

mod error;
mod loader;
mod model;
mod timestamp;
mod validator;

pub use error::{LoadError, ValidationError};
pub use loader::{load_events, load_terrain, load_weather, read_events, read_terrain, read_weather};
pub use model::{Event, EventId, GeoPoint, RiskLevel, SourceTables, TerrainCell, WeatherObservation};
pub use timestamp::{floor_to_hour, hour_index, parse_timestamp};
pub use validator::{InvalidRecordPolicy, RawEvent, Validator};
