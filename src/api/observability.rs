use axum::{
    extract::{MatchedPath, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use super::{AppState, ErrorKind};

pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

/// Outcome label for a finished request. Error responses built from
/// `ApiError` carry their kind; anything else falls back to the status class.
fn outcome(status: StatusCode, kind: Option<ErrorKind>) -> &'static str {
    match kind {
        Some(kind) => kind.as_str(),
        None if status.is_server_error() => "error",
        None if status.is_client_error() => "client_error",
        None => "success",
    }
}

/// Runs each request inside a `request` span tagged with a fresh id, then
/// records `http_requests_total` and `http_request_duration_seconds`
/// labelled by route and outcome.
pub async fn request_observer(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().clone();
    // Matched templates keep label cardinality bounded, e.g. `/api/treasures/{treasure_id}/boxes`.
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or("unmatched", MatchedPath::as_str)
        .to_string();

    let span = info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %method,
        path = %req.uri().path(),
        route = %route,
    );

    let response = next.run(req).instrument(span.clone()).await;

    let status = response.status();
    let outcome = outcome(status, response.extensions().get::<ErrorKind>().copied());
    let elapsed = started.elapsed();

    let labels = [
        ("method", method.to_string()),
        ("path", route),
        ("status", status.as_u16().to_string()),
        ("outcome", outcome.to_string()),
    ];
    metrics::counter!("http_requests_total", &labels).increment(1);
    metrics::histogram!("http_request_duration_seconds", &labels).record(elapsed.as_secs_f64());

    span.in_scope(|| {
        info!(
            status_code = status.as_u16(),
            duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            outcome,
            "Request finished"
        );
    });

    response
}
