//! Route definitions

use axum::{Router, routing::get};

use crate::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/forecast",
            get(handlers::forecast).post(handlers::forecast_form),
        )
        .route("/health", get(handlers::health))
        .with_state(state)
}
