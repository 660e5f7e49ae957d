//! Web front-end for hourly weather forecasts.
//!
//! Serves a static page at `/` and the normalized forecast as JSON at
//! `/forecast`. The forecast itself comes from any
//! [`weather_core::ForecastProvider`].

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
