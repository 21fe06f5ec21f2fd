//! Hourly Weather Aligner

use std::collections::BTreeMap;

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use sighting_data::{floor_to_hour, hour_index, WeatherObservation};
use tracing::{debug, warn};

use crate::error::AlignError;
use crate::series::interpolate_interior;

/// Longest grid the aligner builds (25 years of hours)
pub const DEFAULT_MAX_SPAN_HOURS: i64 = 24 * 366 * 25;

/// Weather on the hourly grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedWeatherSample {
    /// Start of the hour bucket
    pub hour: NaiveDateTime,
    pub temperature: Option<f64>,
    pub precipitation: Option<f64>,
    pub snow_depth: Option<f64>,
}

/// Running mean of one field, ignoring missing readings
#[derive(Debug, Clone, Copy, Default)]
struct Mean {
    sum: f64,
    count: u32,
}

impl Mean {
    fn add(&mut self, value: Option<f64>) {
        if let Some(v) = value.filter(|v| !v.is_nan()) {
            self.sum += v;
            self.count += 1;
        }
    }

    fn value(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct HourBucket {
    temperature: Mean,
    precipitation: Mean,
    snow_depth: Mean,
}

/// The aligned hourly series, indexed by hour
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignedWeather {
    start_hour: i64,
    samples: Vec<AlignedWeatherSample>,
}

impl AlignedWeather {
    /// Samples in hour order
    pub fn samples(&self) -> &[AlignedWeatherSample] {
        &self.samples
    }

    /// Number of hourly samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the grid is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample for the hour containing `ts`, if the grid covers it
    pub fn sample_at(&self, ts: NaiveDateTime) -> Option<&AlignedWeatherSample> {
        let offset = hour_index(ts).checked_sub(self.start_hour)?;
        usize::try_from(offset)
            .ok()
            .and_then(|i| self.samples.get(i))
    }
}

/// Resamples weather observations onto a one-hour grid
#[derive(Debug, Clone, Copy)]
pub struct WeatherAligner {
    max_span_hours: i64,
}

impl Default for WeatherAligner {
    fn default() -> Self {
        Self {
            max_span_hours: DEFAULT_MAX_SPAN_HOURS,
        }
    }
}

impl WeatherAligner {
    /// Create a new aligner with the default span limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an aligner refusing grids longer than `hours`
    pub fn with_max_span(hours: i64) -> Self {
        Self {
            max_span_hours: hours,
        }
    }

    /// Align observations.
    ///
    /// The grid spans `[floor(min(observed_at)), floor(max(observed_at))]`.
    /// A span above the limit (usually a mistyped year) is an error.
    pub fn align(
        &self,
        observations: &[WeatherObservation],
    ) -> Result<AlignedWeather, AlignError> {
        let mut buckets: BTreeMap<i64, (NaiveDateTime, HourBucket)> = BTreeMap::new();

        for obs in observations {
            let (_, bucket) = buckets
                .entry(hour_index(obs.observed_at))
                .or_insert_with(|| (floor_to_hour(obs.observed_at), HourBucket::default()));
            bucket.temperature.add(obs.temperature);
            bucket.precipitation.add(obs.precipitation);
            bucket.snow_depth.add(obs.snow_depth);
        }

        let (Some((&first, &(start, _))), Some((&last, _))) =
            (buckets.first_key_value(), buckets.last_key_value())
        else {
            debug!("No weather observations to align");
            return Ok(AlignedWeather::default());
        };

        let span_hours = last - first + 1;
        if span_hours > self.max_span_hours {
            warn!(
                "Weather span of {} hours exceeds limit of {}",
                span_hours, self.max_span_hours
            );
            return Err(AlignError::SpanTooLong {
                span_hours,
                max_hours: self.max_span_hours,
            });
        }
        let len = span_hours as usize;
        let mut temperature = vec![None; len];
        let mut precipitation = vec![None; len];
        let mut snow_depth = vec![None; len];

        for (&hour, (_, bucket)) in &buckets {
            let i = (hour - first) as usize;
            temperature[i] = bucket.temperature.value();
            precipitation[i] = bucket.precipitation.value();
            snow_depth[i] = bucket.snow_depth.value();
        }

        interpolate_interior(&mut temperature);
        interpolate_interior(&mut precipitation);
        interpolate_interior(&mut snow_depth);

        let samples = (0..len)
            .map(|i| AlignedWeatherSample {
                hour: start + TimeDelta::hours(i as i64),
                temperature: temperature[i],
                precipitation: precipitation[i],
                snow_depth: snow_depth[i],
            })
            .collect();

        debug!(
            "Aligned {} observations into {} hourly samples ({} observed hours)",
            observations.len(),
            len,
            buckets.len()
        );

        Ok(AlignedWeather {
            start_hour: first,
            samples,
        })
    }
}
