//! Feature Table Assembler

use chrono::{Datelike, Timelike};
use event_window::RecentCounts;
use sighting_data::{Event, TerrainCell};
use spatial_match::{CentroidDistances, TerrainMatches};
use tracing::{debug, info};
use weather_align::AlignedWeather;

use crate::error::AssemblyError;
use crate::features::{FeatureColumn, FeatureRow, FeatureSet, FEATURE_DIMENSION};
use crate::fill::forward_fill;
use crate::season::Season;

/// Read-only results of the upstream stages for one run
#[derive(Debug, Clone, Copy)]
pub struct AssemblyInputs<'a> {
    pub events: &'a [Event],
    pub weather: &'a AlignedWeather,
    pub terrain: &'a [TerrainCell],
    pub matches: &'a TerrainMatches,
    pub distances: &'a CentroidDistances,
    pub recent: &'a RecentCounts,
}

/// Joins upstream results into the final feature table
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureAssembler;

impl FeatureAssembler {
    /// Create a new assembler
    pub fn new() -> Self {
        Self
    }

    /// Build one feature row and one label per sighting, in sighting order
    pub fn assemble(&self, inputs: AssemblyInputs<'_>) -> Result<FeatureSet, AssemblyError> {
        if inputs.events.is_empty() {
            return Err(AssemblyError::EmptyDataset);
        }

        let mut raw_rows = Vec::with_capacity(inputs.events.len());
        let mut weather_misses = 0usize;

        for event in inputs.events {
            let mut values: [Option<f64>; FEATURE_DIMENSION] = [None; FEATURE_DIMENSION];
            let mut set = |column: FeatureColumn, value: Option<f64>| {
                values[column.index()] = value;
            };

            set(FeatureColumn::Latitude, Some(event.latitude));
            set(FeatureColumn::Longitude, Some(event.longitude));
            set(FeatureColumn::Hour, Some(f64::from(event.timestamp.hour())));
            set(FeatureColumn::Month, Some(f64::from(event.timestamp.month())));

            match inputs.weather.sample_at(event.timestamp) {
                Some(sample) => {
                    set(FeatureColumn::Temperature, sample.temperature);
                    set(FeatureColumn::Precipitation, sample.precipitation);
                    set(FeatureColumn::SnowDepth, sample.snow_depth);
                }
                None => weather_misses += 1,
            }

            let cell = inputs
                .matches
                .get(event.id)
                .and_then(|m| inputs.terrain.get(m.cell_index))
                .ok_or(AssemblyError::MissingUpstream {
                    stage: "terrain matcher",
                    id: event.id,
                })?;
            set(FeatureColumn::Elevation, cell.elevation);
            set(FeatureColumn::SlopeAngle, cell.slope_angle);
            set(FeatureColumn::DistanceToSettlement, cell.distance_to_settlement);
            set(FeatureColumn::FruitAvailability, cell.fruit_availability);

            let distance = inputs
                .distances
                .get(event.id)
                .ok_or(AssemblyError::MissingUpstream {
                    stage: "centroid distance",
                    id: event.id,
                })?;
            set(FeatureColumn::DistanceToCentroidKm, Some(distance));

            let recent = inputs
                .recent
                .get(event.id)
                .ok_or(AssemblyError::MissingUpstream {
                    stage: "trailing window",
                    id: event.id,
                })?;
            set(FeatureColumn::RecentBearReports, Some(f64::from(recent)));

            raw_rows.push(values);
        }

        if weather_misses > 0 {
            debug!("{} sightings fall outside the weather grid", weather_misses);
        }

        let rows: Vec<FeatureRow> = inputs
            .events
            .iter()
            .zip(forward_fill(&raw_rows))
            .map(|(event, values)| FeatureRow {
                event_id: event.id,
                timestamp: event.timestamp,
                species: event.species.clone(),
                risk_level: event.risk_level,
                season: Season::from_month(event.timestamp.month()),
                values,
            })
            .collect();

        let target: Vec<u8> = inputs.events.iter().map(|e| e.risk_level.label()).collect();

        let feature_set = FeatureSet { rows, target };
        info!(
            "Assembled {} feature rows ({} high risk)",
            feature_set.len(),
            feature_set.positive_count()
        );
        Ok(feature_set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use event_window::TrailingWindowCounter;
    use sighting_data::{EventId, RiskLevel, WeatherObservation};
    use spatial_match::{TerrainMatcher, Wgs84Geodesic};
    use weather_align::WeatherAligner;

    fn ts(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 6, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn event(id: usize, timestamp: NaiveDateTime, lat: f64, lon: f64, risk: RiskLevel) -> Event {
        Event {
            id: EventId(id),
            timestamp,
            latitude: lat,
            longitude: lon,
            species: Some("ツキノワグマ".to_string()),
            risk_level: risk,
        }
    }

    fn cell(lat: f64, lon: f64, elevation: Option<f64>) -> TerrainCell {
        TerrainCell {
            latitude: lat,
            longitude: lon,
            elevation,
            slope_angle: Some(10.0),
            distance_to_settlement: Some(1.5),
            fruit_availability: Some(0.3),
        }
    }

    fn weather(at: NaiveDateTime, temp: Option<f64>) -> WeatherObservation {
        WeatherObservation {
            observed_at: at,
            latitude: None,
            longitude: None,
            temperature: temp,
            precipitation: Some(0.0),
            snow_depth: None,
        }
    }

    fn assemble(
        events: &[Event],
        observations: &[WeatherObservation],
        terrain: &[TerrainCell],
    ) -> Result<FeatureSet, AssemblyError> {
        let weather = WeatherAligner::new().align(observations).unwrap();
        let matches = TerrainMatcher::new(terrain).unwrap().match_events(events);
        let distances = CentroidDistances::compute(events, &Wgs84Geodesic::new())
            .map_err(|_| AssemblyError::EmptyDataset)?;
        let recent = TrailingWindowCounter::default().count(events);
        FeatureAssembler::new().assemble(AssemblyInputs {
            events,
            weather: &weather,
            terrain,
            matches: &matches,
            distances: &distances,
            recent: &recent,
        })
    }

    #[test]
    fn test_scenario_rows_and_target() {
        let events = vec![
            event(0, ts(1, 8, 0), 39.00, 140.00, RiskLevel::High),
            event(1, ts(3, 9, 0), 39.01, 140.01, RiskLevel::Medium),
            event(2, ts(10, 10, 0), 39.50, 140.50, RiskLevel::Low),
        ];
        let terrain = vec![cell(39.0, 140.0, Some(200.0)), cell(39.6, 140.6, Some(800.0))];
        let set = assemble(&events, &[weather(ts(1, 8, 10), Some(15.0))], &terrain).unwrap();

        assert_eq!(set.len(), 3);
        assert_eq!(set.target(), &[1, 0, 0]);
        assert_eq!(set.positive_count(), 1);

        let rows = set.rows();
        assert_eq!(rows[0].hour(), 8);
        assert_eq!(rows[2].month(), 6);
        assert_eq!(rows[0].season, Season::Summer);
        assert_eq!(rows[0].get(FeatureColumn::Elevation), 200.0);
        assert_eq!(rows[1].get(FeatureColumn::Elevation), 200.0);
        assert_eq!(rows[2].get(FeatureColumn::Elevation), 800.0);
        let recent: Vec<_> = rows.iter().map(|r| r.recent_bear_reports()).collect();
        assert_eq!(recent, vec![1, 2, 1]);
        assert!(rows.iter().all(|r| r.distance_to_centroid_km() > 0.0));
    }

    #[test]
    fn test_missing_weather_forward_filled_then_zeroed() {
        let events = vec![
            event(0, ts(1, 6, 0), 39.0, 140.0, RiskLevel::Low),
            event(1, ts(1, 8, 30), 39.0, 140.0, RiskLevel::Low),
            event(2, ts(1, 20, 0), 39.0, 140.0, RiskLevel::High),
        ];
        let observations = vec![weather(ts(1, 8, 0), Some(12.0)), weather(ts(1, 10, 0), Some(16.0))];
        let set = assemble(&events, &observations, &[cell(39.0, 140.0, None)]).unwrap();

        let temps: Vec<_> = set
            .rows()
            .iter()
            .map(|r| r.get(FeatureColumn::Temperature))
            .collect();
        // before the grid -> leading zero; inside -> 12; after the grid -> carried 12
        assert_eq!(temps, vec![0.0, 12.0, 12.0]);
        let snow: Vec<_> = set.rows().iter().map(|r| r.get(FeatureColumn::SnowDepth)).collect();
        assert_eq!(snow, vec![0.0, 0.0, 0.0]);
        let elevation: Vec<_> = set.rows().iter().map(|r| r.get(FeatureColumn::Elevation)).collect();
        assert_eq!(elevation, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_empty_dataset() {
        let weather = AlignedWeather::default();
        let terrain = vec![cell(39.0, 140.0, None)];
        let matches = TerrainMatches::default();
        let events = vec![event(0, ts(1, 6, 0), 39.0, 140.0, RiskLevel::Low)];
        let distances = CentroidDistances::compute(&events, &Wgs84Geodesic::new()).unwrap();
        let recent = RecentCounts::default();
        let err = FeatureAssembler::new()
            .assemble(AssemblyInputs {
                events: &[],
                weather: &weather,
                terrain: &terrain,
                matches: &matches,
                distances: &distances,
                recent: &recent,
            })
            .unwrap_err();
        assert_eq!(err, AssemblyError::EmptyDataset);
    }

    #[test]
    fn test_missing_upstream_result() {
        let events = vec![event(0, ts(1, 6, 0), 39.0, 140.0, RiskLevel::Low)];
        let terrain = vec![cell(39.0, 140.0, None)];
        let weather = AlignedWeather::default();
        let matches = TerrainMatcher::new(&terrain).unwrap().match_events(&events);
        let distances = CentroidDistances::compute(&events, &Wgs84Geodesic::new()).unwrap();
        let recent = RecentCounts::default();
        let err = FeatureAssembler::new()
            .assemble(AssemblyInputs {
                events: &events,
                weather: &weather,
                terrain: &terrain,
                matches: &matches,
                distances: &distances,
                recent: &recent,
            })
            .unwrap_err();
        assert_eq!(
            err,
            AssemblyError::MissingUpstream {
                stage: "trailing window",
                id: EventId(0)
            }
        );
    }

    #[test]
    fn test_csv_export() {
        let events = vec![
            event(0, ts(1, 8, 0), 39.0, 140.0, RiskLevel::High),
            event(1, ts(2, 9, 0), 39.0, 140.0, RiskLevel::Low),
        ];
        let set = assemble(&events, &[], &[cell(39.0, 140.0, Some(300.0))]).unwrap();

        let mut features = Vec::new();
        set.write_features_csv(&mut features).unwrap();
        let text = String::from_utf8(features).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), crate::FEATURE_COLUMNS.join(","));
        let first = lines.next().unwrap();
        assert!(first.starts_with("39,140,8,6,0,0,0,300,10,1.5,0.3,"), "{first}");
        assert!(first.ends_with(",1"), "{first}");
        assert!(lines.next().unwrap().starts_with("39,140,9,6,"));

        let mut target = Vec::new();
        set.write_target_csv(&mut target).unwrap();
        assert_eq!(String::from_utf8(target).unwrap(), "target\n1\n0\n");
    }
}
