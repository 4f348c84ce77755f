//! Axum router wiring.

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};

use crate::{app_state::AppState, landing, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(landing::home))
        .route("/health", get(ops::health))
        .route("/reset", get(ops::reset))
        .route("/status", get(ops::status))
        .route("/metrics", get(ops::metrics))
        .route_layer(middleware::from_fn_with_state(state.clone(), count_requests))
        .with_state(state)
}

/// Per-route request totals, labelled by status code.
async fn count_requests(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_default();

    let resp = next.run(req).await;
    state
        .metrics()
        .http_requests
        .inc(&[("route", route.as_str()), ("code", resp.status().as_str())]);
    resp
}
