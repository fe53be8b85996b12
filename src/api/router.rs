//! HTTP router. Returns a composable `Router` with all endpoints
//! nested under `/api/`.
//!
//! NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).

use std::sync::{Arc, Mutex};

use axum::routing::{get, post};
use axum::Router;
use rusqlite::Connection;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;

pub fn api_router(db: Arc<Mutex<Connection>>) -> Router {
    let ctx = ApiContext::new(db);

    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/analytics/occupancy/:period", get(endpoints::analytics::occupancy))
        .route("/analytics/inventory-trend", post(endpoints::analytics::inventory_trend))
        .route(
            "/analytics/prescription-trend",
            post(endpoints::analytics::prescription_trend),
        )
        .route(
            "/analytics/rating-distribution",
            get(endpoints::analytics::rating_distribution),
        )
        .route(
            "/analytics/doctor-quadrants",
            post(endpoints::analytics::doctor_quadrant_report),
        )
        .route(
            "/analytics/department-quadrants",
            post(endpoints::analytics::department_quadrant_report),
        )
        .route("/consultations/:id/feedback", post(endpoints::feedback::submit))
        .route("/feedback", get(endpoints::feedback::list))
        .route("/feedback/by-rating/:rating", get(endpoints::feedback::by_rating))
        .route("/facility/statistics", get(endpoints::facility::statistics))
        .with_state(ctx);

    Router::new()
        .nest("/api", routes)
        .layer(CorsLayer::permissive())
}
