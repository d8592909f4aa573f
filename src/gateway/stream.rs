//! Transfer state machine.
//!
//! # States
//! ```text
//! Start ──fetch──▶ Fetched ──OK──▶ Streaming ──drained──▶ Done
//!    │                │                 │
//!    │ transport      │ non-OK         │ mid-stream error
//!    ▼                ▼                 ▼
//!  Failed ◀──────── Failed           Failed (best effort, §response)
//! ```
//!
//! # Design Decisions
//! - Every failure collapses into one recovery path: plain-text marker,
//!   fixed error literal, stream closed
//! - Failures after bytes were committed cannot change the status line or
//!   content type anymore; the literal is appended and the stream ends

use std::time::Instant;

use axum::response::Response;
use reqwest::StatusCode;

use crate::http::response;
use crate::observability::metrics;
use crate::storage::HttpObjectStore;

/// Fetch the object for `key` and stream it to the client.
///
/// One outbound fetch per call. The returned response either carries the
/// object's bytes with its declared content type, or the fixed error body.
pub async fn transfer(store: &HttpObjectStore, key: &str, request_id: &str) -> Response {
    let started = Instant::now();

    let object = match store.fetch(key).await {
        Ok(object) => object,
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                key = %key,
                error = %e,
                "Object fetch failed"
            );
            metrics::record_transfer("transport_error", 502, started);
            return response::failed();
        }
    };

    if object.status != StatusCode::OK {
        tracing::error!(
            request_id = %request_id,
            key = %key,
            status = object.status.as_u16(),
            "Store returned non-OK status"
        );
        metrics::record_transfer("resolution_miss", 502, started);
        return response::failed();
    }

    tracing::info!(
        request_id = %request_id,
        key = %key,
        content_type = ?object.content_type,
        "Streaming object"
    );
    metrics::record_transfer("success", 200, started);

    response::streaming(object, request_id.to_string())
}
