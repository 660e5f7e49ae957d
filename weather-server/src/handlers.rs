//! Request handlers.

use axum::{
    Json,
    extract::{Form, Query, State},
    response::Html,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, warn};
use weather_core::HourlyForecast;

use crate::{error::ApiError, state::AppState};

const INDEX_HTML: &str = include_str!("../templates/index.html");

/// Landing page with the forecast form.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Raw query or form parameters; validated by the handler so bad input gets a plain 400.
#[derive(Debug, Default, Deserialize)]
pub struct ForecastQuery {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub timezone: Option<String>,
}

fn parse_coordinate(raw: Option<&str>) -> Option<f64> {
    raw?.parse().ok()
}

pub async fn forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<HourlyForecast>, ApiError> {
    respond(&state, query).await
}

/// Same as [`forecast`], with the parameters in a urlencoded POST body.
pub async fn forecast_form(
    State(state): State<AppState>,
    Form(query): Form<ForecastQuery>,
) -> Result<Json<HourlyForecast>, ApiError> {
    respond(&state, query).await
}

#[instrument(skip(state))]
async fn respond(
    state: &AppState,
    query: ForecastQuery,
) -> Result<Json<HourlyForecast>, ApiError> {
    let latitude =
        parse_coordinate(query.latitude.as_deref()).ok_or(ApiError::InvalidLatitude)?;
    let longitude =
        parse_coordinate(query.longitude.as_deref()).ok_or(ApiError::InvalidLongitude)?;

    let timezone = match query.timezone.as_deref() {
        Some(tz) if !tz.is_empty() => tz,
        _ => &*state.default_timezone,
    };

    let call = state.provider.hourly_forecast(latitude, longitude, timezone);
    let forecast = match tokio::time::timeout(state.request_timeout, call).await {
        Ok(Ok(forecast)) => forecast,
        Ok(Err(e)) => {
            error!(error = %e, kind = ?e.kind(), "Forecast fetch failed");
            return Err(ApiError::Forecast(e));
        }
        Err(_) => {
            warn!(timeout = ?state.request_timeout, "Forecast fetch timed out");
            return Err(ApiError::Timeout);
        }
    };

    debug!(hours = forecast.len(), "Serving forecast");
    Ok(Json(forecast))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness check.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
