//! Integration tests for the HTTP front-end with a stubbed forecast provider.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use weather_core::{
    ForecastError, ForecastProvider, HourlyForecast,
    timestamp::{parse_local, resolve_timezone},
};
use weather_server::{AppState, create_router};

#[derive(Debug, Clone, Copy)]
enum Behavior {
    Succeed,
    FailWithStatus(u16),
    Hang,
}

/// Records each call and answers according to `behavior`.
#[derive(Debug)]
struct StubProvider {
    behavior: Behavior,
    calls: Mutex<Vec<(f64, f64, String)>>,
}

impl StubProvider {
    fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<(f64, f64, String)> {
        self.calls.lock().unwrap().clone()
    }
}

fn berlin_forecast() -> HourlyForecast {
    let tz = resolve_timezone("Europe/Berlin").unwrap();
    HourlyForecast::new(
        vec![
            parse_local(&tz, "2023-04-14T00:00").unwrap(),
            parse_local(&tz, "2023-04-14T01:00").unwrap(),
        ],
        vec![30.0, 60.0],
        vec![15.5, 16.2],
        vec![25.0, 30.0],
    )
    .unwrap()
}

#[async_trait]
impl ForecastProvider for StubProvider {
    async fn hourly_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        timezone: &str,
    ) -> Result<HourlyForecast, ForecastError> {
        self.calls
            .lock()
            .unwrap()
            .push((latitude, longitude, timezone.to_string()));

        match self.behavior {
            Behavior::Succeed => Ok(berlin_forecast()),
            Behavior::FailWithStatus(code) => Err(ForecastError::UnexpectedStatus { code }),
            Behavior::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(berlin_forecast())
            }
        }
    }
}

fn server_with(provider: Arc<StubProvider>, timeout: Duration) -> TestServer {
    let state = AppState::new(provider, "auto", timeout);
    TestServer::new(create_router(state)).expect("Failed to create test server")
}

fn server(provider: Arc<StubProvider>) -> TestServer {
    server_with(provider, Duration::from_secs(5))
}

// ============ Page and health ============

#[tokio::test]
async fn index_serves_html_page() {
    let server = server(StubProvider::new(Behavior::Succeed));

    let response = server.get("/").await;

    response.assert_status_ok();
    assert!(response.text().contains("<form id=\"forecast-form\">"));
    assert!(
        response
            .header("content-type")
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );
}

#[tokio::test]
async fn health_reports_ok() {
    let server = server(StubProvider::new(Behavior::Succeed));

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

// ============ /forecast ============

#[tokio::test]
async fn forecast_returns_json_with_zoned_times() {
    let provider = StubProvider::new(Behavior::Succeed);
    let server = server(provider.clone());

    let response = server
        .get("/forecast")
        .add_query_param("latitude", "52.52")
        .add_query_param("longitude", "13.405")
        .add_query_param("timezone", "Europe/Berlin")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["time"][0], "2023-04-14T00:00:00+02:00");
    assert_eq!(body["time"][1], "2023-04-14T01:00:00+02:00");
    assert_eq!(body["precipitation_probability"], serde_json::json!([30.0, 60.0]));
    assert_eq!(body["temperature"], serde_json::json!([15.5, 16.2]));
    assert_eq!(body["cloud_cover"], serde_json::json!([25.0, 30.0]));

    assert_eq!(
        provider.calls(),
        vec![(52.52, 13.405, "Europe/Berlin".to_string())]
    );
}

#[tokio::test]
async fn forecast_accepts_post_form() {
    let provider = StubProvider::new(Behavior::Succeed);
    let server = server(provider.clone());

    let response = server
        .post("/forecast")
        .form(&[
            ("latitude", "52.52"),
            ("longitude", "13.405"),
            ("timezone", "Europe/Berlin"),
        ])
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["time"][0], "2023-04-14T00:00:00+02:00");
    assert_eq!(
        provider.calls(),
        vec![(52.52, 13.405, "Europe/Berlin".to_string())]
    );
}

#[tokio::test]
async fn post_form_with_bad_latitude_is_rejected() {
    let provider = StubProvider::new(Behavior::Succeed);
    let server = server(provider.clone());

    let response = server
        .post("/forecast")
        .form(&[("latitude", "abc"), ("longitude", "13.405")])
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "Invalid latitude\n");
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn missing_timezone_falls_back_to_default() {
    let provider = StubProvider::new(Behavior::Succeed);
    let server = server(provider.clone());

    server
        .get("/forecast")
        .add_query_param("latitude", "1.5")
        .add_query_param("longitude", "-2.25")
        .add_query_param("timezone", "")
        .await
        .assert_status_ok();

    assert_eq!(provider.calls(), vec![(1.5, -2.25, "auto".to_string())]);
}

#[tokio::test]
async fn invalid_latitude_is_rejected_before_fetching() {
    let provider = StubProvider::new(Behavior::Succeed);
    let server = server(provider.clone());

    let response = server
        .get("/forecast")
        .add_query_param("latitude", "north")
        .add_query_param("longitude", "13.405")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "Invalid latitude\n");
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn missing_longitude_is_rejected() {
    let provider = StubProvider::new(Behavior::Succeed);
    let server = server(provider.clone());

    let response = server
        .get("/forecast")
        .add_query_param("latitude", "52.52")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "Invalid longitude\n");
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn provider_failure_is_an_internal_error() {
    let server = server(StubProvider::new(Behavior::FailWithStatus(400)));

    let response = server
        .get("/forecast")
        .add_query_param("latitude", "52.52")
        .add_query_param("longitude", "13.405")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.text(),
        "Error fetching weather data: unexpected status code: 400\n"
    );
}

#[tokio::test]
async fn slow_provider_hits_request_deadline() {
    let server = server_with(StubProvider::new(Behavior::Hang), Duration::from_millis(50));

    let response = server
        .get("/forecast")
        .add_query_param("latitude", "52.52")
        .add_query_param("longitude", "13.405")
        .await;

    response.assert_status(StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(response.text(), "Timed out fetching weather data\n");
}
