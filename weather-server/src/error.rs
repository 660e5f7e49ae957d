//! Mapping of handler failures onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use weather_core::ForecastError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid latitude")]
    InvalidLatitude,

    #[error("Invalid longitude")]
    InvalidLongitude,

    #[error("Error fetching weather data: {0}")]
    Forecast(#[from] ForecastError),

    #[error("Timed out fetching weather data")]
    Timeout,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidLatitude | ApiError::InvalidLongitude => StatusCode::BAD_REQUEST,
            ApiError::Forecast(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), format!("{self}\n")).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_input_is_a_client_error() {
        assert_eq!(ApiError::InvalidLatitude.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidLongitude.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_failure_is_a_server_error() {
        let err = ApiError::from(ForecastError::UnexpectedStatus { code: 502 });

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_string(),
            "Error fetching weather data: unexpected status code: 502"
        );
    }

    #[test]
    fn timeout_maps_to_gateway_timeout() {
        assert_eq!(ApiError::Timeout.status_code(), StatusCode::GATEWAY_TIMEOUT);
    }
}
