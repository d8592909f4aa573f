//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, dispatch)
//!     → request.rs (request ID generation and propagation)
//!     → [gateway resolves key and fetches the object]
//!     → response.rs (streamed body relay, error fallback)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{request_id, MakeUuidRequestId, X_REQUEST_ID};
pub use server::HttpServer;
