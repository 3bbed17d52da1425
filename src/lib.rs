//! Feedback collection service.
//!
//! Third-party sites embed a small widget that posts feedback, authenticated by a
//! per-project API key, to a public ingestion endpoint. Each submission is validated,
//! scored by a rule-based sentiment classifier and stored. Owners manage projects and
//! read, label, filter and export feedback through the dashboard API.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum, with tower-http for tracing and CORS
//! - **Database**: PostgreSQL through sqlx, behind the [`store::Store`] trait
//! - **Authentication**: project API keys for ingestion, hashed owner session tokens for the dashboard
//! - **Widget**: [`widget`] holds the embeddable client as an explicit state machine

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod sentiment;
pub mod services;
pub mod state;
pub mod store;
pub mod widget;

pub use state::AppState;

use axum::{
    Router,
    http::{HeaderName, Method, header},
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// CORS policy for the public ingestion route: any origin may call it.
fn ingestion_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-api-key"),
        ])
}

/// Build the full HTTP router.
///
/// - Public: `GET /health`, `POST|OPTIONS /api/feedback`
/// - Owner session required: everything under `/api/v1`
pub fn build_router(state: AppState) -> Router {
    // The CORS layer wraps the key check, so preflights and 401s carry CORS headers too
    let ingestion_routes = Router::new()
        .route("/api/feedback", post(handlers::ingest::submit_feedback))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::api_key::require_api_key,
        ))
        .layer(ingestion_cors());

    let dashboard_routes = Router::new()
        // Project routes
        .route(
            "/api/v1/projects",
            get(handlers::projects::list_projects).post(handlers::projects::create_project),
        )
        .route(
            "/api/v1/projects/{id}",
            get(handlers::projects::get_project).delete(handlers::projects::delete_project),
        )
        .route(
            "/api/v1/projects/{id}/regenerate-key",
            post(handlers::projects::regenerate_key),
        )
        .route(
            "/api/v1/projects/{id}/embed",
            get(handlers::projects::embed_snippet),
        )
        .route(
            "/api/v1/projects/{id}/feedback",
            get(handlers::projects::list_feedback),
        )
        .route(
            "/api/v1/projects/{id}/feedback/export",
            get(handlers::projects::export_feedback),
        )
        // Feedback routes
        .route(
            "/api/v1/feedback/recent",
            get(handlers::feedback::recent_feedback),
        )
        .route(
            "/api/v1/feedback/{id}/labels",
            put(handlers::feedback::update_labels),
        )
        .route(
            "/api/v1/feedback/{id}",
            delete(handlers::feedback::delete_feedback),
        )
        .route("/api/v1/stats", get(handlers::feedback::dashboard_stats))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::owner_auth,
        ));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .merge(ingestion_routes)
        .merge(dashboard_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
