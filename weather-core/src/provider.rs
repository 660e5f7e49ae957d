use crate::{Config, ForecastError, HourlyForecast, provider::open_meteo::OpenMeteoClient};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod open_meteo;

/// Timezone value that asks the upstream to infer the zone from the coordinates.
pub const AUTO_TIMEZONE: &str = "auto";

#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    /// Fetch the hourly forecast for a coordinate, normalized into `timezone`.
    ///
    /// `timezone` is an IANA identifier such as `Europe/Berlin`, or
    /// [`AUTO_TIMEZONE`].
    async fn hourly_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        timezone: &str,
    ) -> Result<HourlyForecast, ForecastError>;
}

/// Construct the forecast provider described by `config`.
pub fn provider_from_config(config: &Config) -> Box<dyn ForecastProvider> {
    Box::new(OpenMeteoClient::new(config.client_config(), reqwest::Client::new()))
}
