//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): transfers by outcome and status
//! - `gateway_request_duration_seconds` (histogram): time to response start
//! - `gateway_streamed_bytes_total` (counter): object bytes relayed
//! - `gateway_stream_failures_total` (counter): transfers that failed after
//!   streaming began
//!
//! # Design Decisions
//! - Low-overhead updates on the streaming path (atomic increments)
//! - Duration is measured to response start; body streaming of large
//!   objects would otherwise dominate the histogram

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a transfer outcome decided at fetch time.
pub fn record_transfer(outcome: &'static str, status: u16, started: Instant) {
    metrics::counter!(
        "gateway_requests_total",
        "outcome" => outcome,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("gateway_request_duration_seconds")
        .record(started.elapsed().as_secs_f64());
}

/// Record object bytes relayed to a client.
pub fn record_streamed_bytes(count: usize) {
    metrics::counter!("gateway_streamed_bytes_total").increment(count as u64);
}

/// Record a transfer that failed after streaming began.
pub fn record_stream_failure() {
    metrics::counter!("gateway_stream_failures_total").increment(1);
}
