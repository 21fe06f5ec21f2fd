//! CSV Table Loading

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::LoadError;
use crate::model::{Event, TerrainCell, WeatherObservation};
use crate::timestamp::parse_timestamp;
use crate::validator::{RawEvent, Validator};

#[derive(Debug, Deserialize)]
struct RawWeather {
    observed_at: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    latitude: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    longitude: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    temperature: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    precipitation: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    snow_depth: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawTerrain {
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    elevation: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    slope_angle: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    distance_to_settlement: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    fruit_availability: Option<f64>,
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader)
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Read sighting rows and validate them into events
pub fn read_events<R: Read>(reader: R, validator: &Validator) -> Result<Vec<Event>, LoadError> {
    let raw = csv_reader(reader)
        .deserialize::<RawEvent>()
        .collect::<Result<Vec<_>, _>>()?;
    let total = raw.len();
    let events = validator.validate_events(raw)?;
    debug!("Read {} sighting rows, {} valid", total, events.len());
    Ok(events)
}

/// Read weather observations; the observation time is the only required cell
pub fn read_weather<R: Read>(reader: R) -> Result<Vec<WeatherObservation>, LoadError> {
    let mut observations = Vec::new();
    for (row, record) in csv_reader(reader).deserialize::<RawWeather>().enumerate() {
        let raw = record?;
        let observed_at = parse_timestamp(&raw.observed_at).ok_or_else(|| LoadError::Malformed {
            table: "weather",
            row,
            reason: format!("unrecognised timestamp {:?}", raw.observed_at),
        })?;
        observations.push(WeatherObservation {
            observed_at,
            latitude: raw.latitude,
            longitude: raw.longitude,
            temperature: raw.temperature,
            precipitation: raw.precipitation,
            snow_depth: raw.snow_depth,
        });
    }
    debug!("Read {} weather observations", observations.len());
    Ok(observations)
}

/// Read the terrain grid; every cell needs both coordinates
pub fn read_terrain<R: Read>(reader: R) -> Result<Vec<TerrainCell>, LoadError> {
    let mut cells = Vec::new();
    for (row, record) in csv_reader(reader).deserialize::<RawTerrain>().enumerate() {
        let raw = record?;
        let (latitude, longitude) = match (raw.latitude, raw.longitude) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => {
                return Err(LoadError::Malformed {
                    table: "terrain",
                    row,
                    reason: "missing coordinates".to_string(),
                })
            }
        };
        cells.push(TerrainCell {
            latitude,
            longitude,
            elevation: raw.elevation,
            slope_angle: raw.slope_angle,
            distance_to_settlement: raw.distance_to_settlement,
            fruit_availability: raw.fruit_availability,
        });
    }
    debug!("Read {} terrain cells", cells.len());
    Ok(cells)
}

/// Load the sighting table from disk
pub fn load_events(path: impl AsRef<Path>, validator: &Validator) -> Result<Vec<Event>, LoadError> {
    let path = path.as_ref();
    let events = read_events(open(path)?, validator)?;
    info!("Loaded {} sightings from {}", events.len(), path.display());
    Ok(events)
}

/// Load the weather table from disk
pub fn load_weather(path: impl AsRef<Path>) -> Result<Vec<WeatherObservation>, LoadError> {
    let path = path.as_ref();
    let observations = read_weather(open(path)?)?;
    info!("Loaded {} weather observations from {}", observations.len(), path.display());
    Ok(observations)
}

/// Load the terrain grid from disk
pub fn load_terrain(path: impl AsRef<Path>) -> Result<Vec<TerrainCell>, LoadError> {
    let path = path.as_ref();
    let cells = read_terrain(open(path)?)?;
    info!("Loaded {} terrain cells from {}", cells.len(), path.display());
    Ok(cells)
}
