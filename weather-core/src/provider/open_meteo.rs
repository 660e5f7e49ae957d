//! Open-Meteo hourly forecast client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Deserializer};
use tracing::{debug, instrument, warn};

use crate::{
    error::{DecodeError, ForecastError, TimezoneError},
    model::HourlyForecast,
    timestamp::{parse_local, resolve_timezone},
};

use super::{AUTO_TIMEZONE, ForecastProvider};

pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Hourly variables requested from the upstream, in request order.
pub const HOURLY_VARIABLES: &str = "precipitation_probability,temperature_2m,cloud_cover";

pub const FORECAST_DAYS: u8 = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Fetches hourly forecasts from Open-Meteo.
///
/// The wrapped [`Client`] pools connections, so one instance can serve any
/// number of concurrent calls.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    config: ClientConfig,
    http: Client,
}

impl OpenMeteoClient {
    pub fn new(config: ClientConfig, http: Client) -> Self {
        Self { config, http }
    }

    pub fn with_defaults() -> Self {
        Self::new(ClientConfig::default(), Client::new())
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Full request URL for one forecast. `timezone` is inserted verbatim.
    pub fn forecast_url(&self, latitude: f64, longitude: f64, timezone: &str) -> String {
        format!(
            "{}?latitude={:.6}&longitude={:.6}&hourly={}&forecast_days={}&timezone={}",
            self.config.base_url, latitude, longitude, HOURLY_VARIABLES, FORECAST_DAYS, timezone,
        )
    }
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    /// Zone the upstream used for `hourly.time`; the inferred one when `timezone=auto`.
    #[serde(default)]
    timezone: Option<String>,
    hourly: OmHourly,
}

#[derive(Debug, Deserialize)]
struct OmHourly {
    time: Vec<String>,
    #[serde(deserialize_with = "nullable_numbers")]
    precipitation_probability: Vec<f64>,
    #[serde(deserialize_with = "nullable_numbers")]
    temperature_2m: Vec<f64>,
    #[serde(deserialize_with = "nullable_numbers")]
    cloud_cover: Vec<f64>,
}

impl OmHourly {
    fn check_lengths(&self) -> Result<(), DecodeError> {
        let expected = self.time.len();
        for (field, actual) in [
            ("precipitation_probability", self.precipitation_probability.len()),
            ("temperature_2m", self.temperature_2m.len()),
            ("cloud_cover", self.cloud_cover.len()),
        ] {
            if actual != expected {
                return Err(DecodeError::LengthMismatch {
                    field,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}

/// Open-Meteo sends `null` for hours a variable is not available; keep the slot as NaN
/// so the arrays stay index-aligned (it serializes back out as `null`).
fn nullable_numbers<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<Option<f64>>::deserialize(deserializer)?;
    Ok(values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

#[async_trait]
impl ForecastProvider for OpenMeteoClient {
    #[instrument(skip(self), fields(base_url = %self.config.base_url))]
    async fn hourly_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        timezone: &str,
    ) -> Result<HourlyForecast, ForecastError> {
        let url = self.forecast_url(latitude, longitude, timezone);
        debug!(url = %url, "Fetching hourly forecast");

        let res = self.http.get(&url).send().await.map_err(|e| {
            warn!(error = %e, "Open-Meteo request failed");
            ForecastError::Request(e)
        })?;

        let status = res.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Open-Meteo returned unexpected status");
            return Err(ForecastError::UnexpectedStatus {
                code: status.as_u16(),
            });
        }
        debug!(status = status.as_u16(), "Open-Meteo responded");

        let body = res.bytes().await.map_err(ForecastError::Request)?;
        let parsed: OmForecastResponse =
            serde_json::from_slice(&body).map_err(DecodeError::from)?;
        parsed.hourly.check_lengths()?;

        let zone_id = if timezone == AUTO_TIMEZONE {
            parsed
                .timezone
                .as_deref()
                .ok_or(TimezoneError::MissingInferredZone)?
        } else {
            timezone
        };
        let tz = resolve_timezone(zone_id)?;

        let OmHourly {
            time,
            precipitation_probability,
            temperature_2m,
            cloud_cover,
        } = parsed.hourly;

        let instants = time
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                parse_local(&tz, &value).map_err(|source| ForecastError::TimeParse {
                    index,
                    value,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(hours = instants.len(), zone = tz.name(), "Decoded hourly forecast");

        let forecast =
            HourlyForecast::new(instants, precipitation_probability, temperature_2m, cloud_cover)?;
        Ok(forecast)
    }
}
