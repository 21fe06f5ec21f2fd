//! Sighting Record Validation

use crate::error::ValidationError;
use crate::model::{Event, EventId, RiskLevel};
use crate::timestamp::parse_timestamp;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// What to do with a sighting row that fails validation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidRecordPolicy {
    /// Drop the row and log a warning
    #[default]
    Skip,
    /// Abort loading with the first error
    Reject,
}

/// A sighting row as it appears in the source table, before validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    pub datetime: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub longitude: Option<f64>,
    pub species: Option<String>,
    pub risk_level: Option<String>,
}

/// Validator turning raw sighting rows into immutable events
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    policy: InvalidRecordPolicy,
}

impl Validator {
    /// Create a new validator with the given policy
    pub fn new(policy: InvalidRecordPolicy) -> Self {
        Self { policy }
    }

    /// Policy applied to invalid rows
    pub fn policy(&self) -> InvalidRecordPolicy {
        self.policy
    }

    /// Validate a coordinate against its range
    fn validate_range(
        row: usize,
        field: &'static str,
        value: Option<f64>,
        range: (f64, f64),
    ) -> Result<f64, ValidationError> {
        let value = value
            .filter(|v| !v.is_nan())
            .ok_or(ValidationError::MissingField { row, field })?;
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                row,
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(value)
        }
    }

    /// Validate one raw row; `id` is assigned by the caller
    pub fn validate_event(
        &self,
        row: usize,
        id: EventId,
        raw: RawEvent,
    ) -> Result<Event, ValidationError> {
        let datetime = raw
            .datetime
            .filter(|s| !s.trim().is_empty())
            .ok_or(ValidationError::MissingField { row, field: "datetime" })?;
        let timestamp = parse_timestamp(&datetime)
            .ok_or(ValidationError::InvalidTimestamp { row, value: datetime })?;

        let latitude = Self::validate_range(row, "latitude", raw.latitude, LATITUDE_RANGE)?;
        let longitude = Self::validate_range(row, "longitude", raw.longitude, LONGITUDE_RANGE)?;

        let risk_level = raw
            .risk_level
            .filter(|s| !s.trim().is_empty())
            .ok_or(ValidationError::MissingField { row, field: "risk_level" })?
            .parse::<RiskLevel>()
            .map_err(|value| ValidationError::UnknownRiskLevel { row, value })?;

        Ok(Event {
            id,
            timestamp,
            latitude,
            longitude,
            species: raw.species.filter(|s| !s.trim().is_empty()),
            risk_level,
        })
    }

    /// Validate a whole table.
    ///
    /// Surviving rows receive sequential ids in table order.
    pub fn validate_events<I>(&self, rows: I) -> Result<Vec<Event>, ValidationError>
    where
        I: IntoIterator<Item = RawEvent>,
    {
        let mut events = Vec::new();
        let mut skipped = 0usize;

        for (row, raw) in rows.into_iter().enumerate() {
            match self.validate_event(row, EventId(events.len()), raw) {
                Ok(event) => events.push(event),
                Err(err) => match self.policy {
                    InvalidRecordPolicy::Reject => return Err(err),
                    InvalidRecordPolicy::Skip => {
                        warn!("Skipping sighting: {}", err);
                        skipped += 1;
                    }
                },
            }
        }

        debug!("Validated {} sightings, skipped {}", events.len(), skipped);
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(datetime: &str, lat: f64, lon: f64, risk: &str) -> RawEvent {
        RawEvent {
            datetime: Some(datetime.to_string()),
            latitude: Some(lat),
            longitude: Some(lon),
            species: Some("ツキノワグマ".to_string()),
            risk_level: Some(risk.to_string()),
        }
    }

    #[test]
    fn test_valid_event() {
        let validator = Validator::default();
        let event = validator
            .validate_event(0, EventId(0), raw("2023-06-01T08:00", 39.0, 140.0, "high"))
            .unwrap();
        assert_eq!(event.risk_level, RiskLevel::High);
        assert_eq!(event.latitude, 39.0);
        assert_eq!(event.species.as_deref(), Some("ツキノワグマ"));
    }

    #[test]
    fn test_missing_coordinates() {
        let validator = Validator::default();
        let mut row = raw("2023-06-01T08:00", 39.0, 140.0, "low");
        row.latitude = None;
        assert_eq!(
            validator.validate_event(3, EventId(0), row),
            Err(ValidationError::MissingField { row: 3, field: "latitude" })
        );
    }

    #[test]
    fn test_out_of_range_longitude() {
        let validator = Validator::default();
        let err = validator
            .validate_event(1, EventId(0), raw("2023-06-01", 39.0, 190.0, "low"))
            .unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { field: "longitude", .. }));
        assert_eq!(err.row(), 1);
    }

    #[test]
    fn test_bad_timestamp_and_risk() {
        let validator = Validator::default();
        assert!(matches!(
            validator.validate_event(0, EventId(0), raw("someday", 39.0, 140.0, "low")),
            Err(ValidationError::InvalidTimestamp { .. })
        ));
        assert!(matches!(
            validator.validate_event(0, EventId(0), raw("2023-06-01", 39.0, 140.0, "extreme")),
            Err(ValidationError::UnknownRiskLevel { .. })
        ));
    }

    #[test]
    fn test_skip_policy_assigns_dense_ids() {
        let validator = Validator::new(InvalidRecordPolicy::Skip);
        let rows = vec![
            raw("2023-06-01T08:00", 39.0, 140.0, "high"),
            RawEvent::default(),
            raw("2023-06-02T08:00", 39.1, 140.1, "low"),
        ];
        let events = validator.validate_events(rows).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, EventId(0));
        assert_eq!(events[1].id, EventId(1));
        assert_eq!(events[1].latitude, 39.1);
    }

    #[test]
    fn test_reject_policy_fails_fast() {
        let validator = Validator::new(InvalidRecordPolicy::Reject);
        let rows = vec![raw("2023-06-01T08:00", 39.0, 140.0, "high"), RawEvent::default()];
        assert_eq!(
            validator.validate_events(rows),
            Err(ValidationError::MissingField { row: 1, field: "datetime" })
        );
    }
}
