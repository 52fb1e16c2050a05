//! Metrics collection.
//!
//! # Metrics
//! - `client_requests_total` (counter): requests by client, method, status
//! - `client_request_duration_seconds` (histogram): latency per client
//! - `client_credential_missing_total` (counter): sends without a bearer token
//! - `navigation_total` (counter): navigations by outcome (matched, no_match)
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; the embedding application
//!   installs whichever recorder/exporter it wants
//! - Transport failures are labelled `status="error"`

use std::time::Instant;

/// Record one completed (or failed) request.
pub fn record_request(client: &str, method: &str, status: Option<u16>, start: Instant) {
    let status = status.map_or_else(|| "error".to_string(), |s| s.to_string());

    ::metrics::counter!(
        "client_requests_total",
        "client" => client.to_string(),
        "method" => method.to_string(),
        "status" => status
    )
    .increment(1);

    ::metrics::histogram!(
        "client_request_duration_seconds",
        "client" => client.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record a send that went out without an `Authorization` header.
pub fn record_credential_missing(client: &str) {
    ::metrics::counter!(
        "client_credential_missing_total",
        "client" => client.to_string()
    )
    .increment(1);
}

/// Record a navigation outcome.
pub fn record_navigation(matched: bool) {
    let outcome = if matched { "matched" } else { "no_match" };
    ::metrics::counter!("navigation_total", "outcome" => outcome).increment(1);
}
