use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::DecodeError;

/// Hourly forecast for one location, normalized into zone-aware instants.
///
/// All four sequences have the same length and index `i` refers to the same
/// forecast hour in each of them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyForecast {
    time: Vec<DateTime<Tz>>,
    /// Percent, 0–100.
    precipitation_probability: Vec<f64>,
    /// Degrees Celsius.
    temperature: Vec<f64>,
    /// Percent, 0–100.
    cloud_cover: Vec<f64>,
}

/// One forecast hour, borrowed out of a [`HourlyForecast`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyPoint<'a> {
    pub time: &'a DateTime<Tz>,
    pub precipitation_probability: f64,
    pub temperature: f64,
    pub cloud_cover: f64,
}

impl HourlyForecast {
    /// Assemble a forecast, rejecting sequences that are not index-aligned.
    pub fn new(
        time: Vec<DateTime<Tz>>,
        precipitation_probability: Vec<f64>,
        temperature: Vec<f64>,
        cloud_cover: Vec<f64>,
    ) -> Result<Self, DecodeError> {
        let expected = time.len();
        for (field, actual) in [
            ("precipitation_probability", precipitation_probability.len()),
            ("temperature", temperature.len()),
            ("cloud_cover", cloud_cover.len()),
        ] {
            if actual != expected {
                return Err(DecodeError::LengthMismatch {
                    field,
                    expected,
                    actual,
                });
            }
        }

        Ok(Self {
            time,
            precipitation_probability,
            temperature,
            cloud_cover,
        })
    }

    pub fn time(&self) -> &[DateTime<Tz>] {
        &self.time
    }

    pub fn precipitation_probability(&self) -> &[f64] {
        &self.precipitation_probability
    }

    pub fn temperature(&self) -> &[f64] {
        &self.temperature
    }

    pub fn cloud_cover(&self) -> &[f64] {
        &self.cloud_cover
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn hours(&self) -> impl Iterator<Item = HourlyPoint<'_>> + '_ {
        (0..self.len()).map(move |i| HourlyPoint {
            time: &self.time[i],
            precipitation_probability: self.precipitation_probability[i],
            temperature: self.temperature[i],
            cloud_cover: self.cloud_cover[i],
        })
    }
}
