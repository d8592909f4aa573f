//! Response assembly and streaming.
//!
//! # Responsibilities
//! - Pipe the object byte stream into the response body
//! - Preserve the declared content type exactly as the store reported it
//! - Map every failure onto the single fixed error response
//!
//! # Design Decisions
//! - The relay never buffers the object: chunks are forwarded as the client
//!   accepts them, and the store stream is only pulled when the body is
//! - A mid-stream failure appends the error literal and ends the body; the
//!   already-sent status line and content type are left as they are
//! - Client disconnect drops the body, which drops the store stream and
//!   aborts the outbound fetch

use std::convert::Infallible;
use std::time::Instant;

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use futures_util::stream::{self, Stream, StreamExt};

use crate::observability::metrics;
use crate::storage::{FetchedObject, ObjectStream};

/// Fixed body written on any failed transfer.
pub const ERROR_BODY: &str = "Error!";

/// Content type of the error body.
pub const ERROR_CONTENT_TYPE: &str = "text/plain";

/// The fixed error response for failures caught before streaming began.
pub fn failed() -> Response {
    (
        StatusCode::BAD_GATEWAY,
        [(header::CONTENT_TYPE, ERROR_CONTENT_TYPE)],
        ERROR_BODY,
    )
        .into_response()
}

/// Build the streaming success response for a fetched object.
///
/// The content type is passed through as given; an absent content type stays
/// absent rather than being inferred.
pub fn streaming(object: FetchedObject, request_id: String) -> Response {
    let FetchedObject {
        content_type,
        stream,
        ..
    } = object;

    let body = Body::from_stream(relay(stream, request_id));

    let mut builder = Response::builder().status(StatusCode::OK);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }

    match builder.body(body) {
        Ok(response) => response,
        // Unreachable for header values that came off the wire, but the
        // transfer still has to terminate in the error contract.
        Err(_) => failed(),
    }
}

enum RelayState {
    Streaming {
        stream: ObjectStream,
        request_id: String,
        started: Instant,
    },
    Done,
}

/// Relay the object stream into an infallible body stream.
///
/// Chunks are forwarded in order and byte-exact. When the source errors, the
/// error literal is emitted as a final chunk and the stream ends, so the
/// client connection terminates cleanly instead of hanging; the source
/// stream is dropped at that point, releasing the outbound fetch.
fn relay(
    stream: ObjectStream,
    request_id: String,
) -> impl Stream<Item = Result<Bytes, Infallible>> + Send + 'static {
    let state = RelayState::Streaming {
        stream,
        request_id,
        started: Instant::now(),
    };

    stream::unfold(state, |state| async move {
        match state {
            RelayState::Streaming {
                mut stream,
                request_id,
                started,
            } => match stream.next().await {
                Some(Ok(chunk)) => {
                    metrics::record_streamed_bytes(chunk.len());
                    Some((
                        Ok(chunk),
                        RelayState::Streaming {
                            stream,
                            request_id,
                            started,
                        },
                    ))
                }
                Some(Err(e)) => {
                    tracing::error!(
                        request_id = %request_id,
                        error = %e,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Object stream failed mid-transfer"
                    );
                    metrics::record_stream_failure();
                    Some((Ok(Bytes::from_static(ERROR_BODY.as_bytes())), RelayState::Done))
                }
                None => None,
            },
            RelayState::Done => None,
        }
    })
}
