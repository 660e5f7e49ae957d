//! Core library for the weather forecast server.
//!
//! This crate defines:
//! - The Open-Meteo hourly forecast client and the provider trait it implements
//! - Normalization of local-naive upstream timestamps into zone-aware instants
//! - The typed error taxonomy for a forecast fetch
//! - Configuration handling
//!
//! It is used by `weather-server`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod timestamp;

pub use config::Config;
pub use error::{DecodeError, ForecastError, ForecastErrorKind, TimestampError, TimezoneError};
pub use model::{HourlyForecast, HourlyPoint};
pub use provider::{
    AUTO_TIMEZONE, ForecastProvider,
    open_meteo::{ClientConfig, OpenMeteoClient},
    provider_from_config,
};
