//! Gateway core subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request path
//!     → key.rs (strip one leading separator → object key)
//!     → stream.rs (fetch from store, inspect status)
//!     → http::response (pipe object bytes into the response)
//! ```

pub mod key;
pub mod stream;

pub use key::resolve_key;
