use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::metrics;
use crate::models::FactSnapshot;
use crate::monitor::SharedSnapshot;

pub fn create_router(snapshot: SharedSnapshot) -> Router {
    Router::new()
        .route("/metrics", get(serve_metrics))
        .route("/context", get(serve_context))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(snapshot)
}

/// Prometheus scrape endpoint, rendered from the latest snapshot.
async fn serve_metrics(State(shared): State<SharedSnapshot>) -> impl IntoResponse {
    let text = metrics::render(&current(&shared));
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        text,
    )
}

/// Human-readable context document for the JSON poller.
async fn serve_context(State(shared): State<SharedSnapshot>) -> Json<FactSnapshot> {
    Json((*current(&shared)).clone())
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

fn current(shared: &SharedSnapshot) -> Arc<FactSnapshot> {
    shared.read().expect("snapshot lock poisoned").clone()
}
