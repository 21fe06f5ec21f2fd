//! Weather Alignment
//!
//! Resamples irregular multi-station weather telemetry onto a uniform hourly
//! grid. Readings within an hour are averaged; gaps between known hours are
//! linearly interpolated and the grid edges are never extrapolated.

mod aligner;
mod error;
mod series;

pub use aligner::{AlignedWeather, AlignedWeatherSample, WeatherAligner, DEFAULT_MAX_SPAN_HOURS};
pub use error::AlignError;
pub use series::interpolate_interior;
