//! Operational HTTP endpoints.
//!
//! - `/health`  : liveness, always 200 (logged)
//! - `/reset`   : force the request counter to zero (logged)
//! - `/status`  : counter snapshot, read-only and not logged
//! - `/metrics` : Prometheus text format, not logged

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;

use rrdemo_core::record::{format_timestamp, LogEvent};

use crate::app_state::AppState;
use crate::context::RequestInfo;

pub const HEALTH_MESSAGE: &str = "Health check endpoint accessed";
pub const RESET_MESSAGE: &str = "Request counter reset";

#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub app: String,
    pub container: u32,
    pub container_id: String,
    pub color: String,
    pub request_counter: u32,
    pub max_requests: u32,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ResetBody {
    pub message: &'static str,
    pub container: u32,
    pub request_counter: u32,
}

#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub app: String,
    pub container: u32,
    pub container_id: String,
    pub requests_handled: u32,
    pub max_requests: u32,
    pub remaining_requests: u32,
    pub status: &'static str,
}

pub async fn health(
    State(state): State<AppState>,
    RequestInfo(meta): RequestInfo,
) -> impl IntoResponse {
    state.log(LogEvent::info(HEALTH_MESSAGE).request(meta));

    let id = state.identity();
    let counter = state.counter();
    let body = HealthBody {
        status: "healthy",
        app: id.app_name.clone(),
        container: id.container_number,
        container_id: id.container_id.clone(),
        color: id.color.clone(),
        request_counter: counter.current(),
        max_requests: counter.max(),
        timestamp: format_timestamp(Utc::now()),
    };
    (StatusCode::OK, Json(body))
}

pub async fn reset(
    State(state): State<AppState>,
    RequestInfo(meta): RequestInfo,
) -> Json<ResetBody> {
    let value = state.counter().reset();
    state.log_with_counter(LogEvent::info(RESET_MESSAGE).request(meta), value);

    Json(ResetBody {
        message: RESET_MESSAGE,
        container: state.identity().container_number,
        request_counter: value,
    })
}

pub async fn status(State(state): State<AppState>) -> Json<StatusBody> {
    let id = state.identity();
    let counter = state.counter();
    let handled = counter.current();
    let max = counter.max();

    Json(StatusBody {
        app: id.app_name.clone(),
        container: id.container_number,
        container_id: id.container_id.clone(),
        requests_handled: handled,
        max_requests: max,
        remaining_requests: max.saturating_sub(handled),
        status: if handled < max { "available" } else { "full" },
    })
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let counter = state.counter();
    let body = state.metrics().render(&[
        ("rrdemo_request_counter", u64::from(counter.current())),
        ("rrdemo_max_requests", u64::from(counter.max())),
    ]);

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response()
}
