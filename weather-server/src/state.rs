use std::{sync::Arc, time::Duration};

use weather_core::ForecastProvider;

/// Shared state handed to every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub provider: Arc<dyn ForecastProvider>,
    /// Used when `/forecast` is called without a `timezone`.
    pub default_timezone: Arc<str>,
    /// Deadline for one `/forecast` request, upstream round trip included.
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn ForecastProvider>,
        default_timezone: &str,
        request_timeout: Duration,
    ) -> Self {
        Self {
            provider,
            default_timezone: Arc::from(default_timezone),
            request_timeout,
        }
    }
}
