//! Prometheus scrape route.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::api::error::{ApiError, ApiResult};
use crate::api::server::AppState;
use crate::metrics::CONTENT_TYPE;

/// Run every collector and render the result.
///
/// Failed collectors show up as `ab_exporter_collector_up 0`. The scrape
/// itself fails only when every collector failed.
pub async fn scrape(State(state): State<AppState>) -> ApiResult<Response> {
    let gathered = state.registry.gather().await;

    if gathered.all_failed() {
        let reasons = gathered
            .scrapes
            .iter()
            .filter_map(|s| s.outcome.as_ref().err().map(|e| format!("{}: {}", s.collector, e)))
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ApiError::service_unavailable(format!(
            "All collectors failed: {}",
            reasons
        )));
    }

    let body = state.exporter.encode(&gathered);
    Ok(([(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response())
}
