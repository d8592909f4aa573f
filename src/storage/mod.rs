//! Object store subsystem.
//!
//! # Data Flow
//! ```text
//! resolved key
//!     → client.rs (GET {endpoint}/{bucket}/{key})
//!     → FetchedObject (status, content type, byte stream)
//!     → Hand off to the streaming gateway
//! ```
//!
//! # Design Decisions
//! - One shared, immutable client handle per process (connection reuse);
//!   nothing about the handle mutates per request
//! - Ownership of the byte stream transfers to the caller, which must fully
//!   drain it or drop it; dropping aborts the outbound transfer
//! - No per-call credential negotiation: the store is reached with whatever
//!   ambient identity the deployment provides

pub mod client;

use bytes::Bytes;
use futures_util::stream::BoxStream;
use reqwest::StatusCode;
use thiserror::Error;

pub use client::HttpObjectStore;

/// Byte stream of a fetched object.
pub type ObjectStream = BoxStream<'static, Result<Bytes, StorageError>>;

/// Error type for storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The resolved key was empty; rejected before any network call.
    #[error("object key is empty")]
    EmptyKey,

    /// The configured endpoint cannot address objects.
    #[error("invalid storage endpoint: {0}")]
    Endpoint(String),

    /// The fetch call or a mid-stream read failed.
    #[error("storage request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// An object as returned by the store.
///
/// The stream is open and exclusively owned by the holder until fully
/// consumed or dropped.
pub struct FetchedObject {
    /// HTTP status reported by the store for this key.
    pub status: StatusCode,

    /// Content type from the object's metadata, passed through as given.
    pub content_type: Option<String>,

    /// The object's bytes.
    pub stream: ObjectStream,
}

impl std::fmt::Debug for FetchedObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchedObject")
            .field("status", &self.status)
            .field("content_type", &self.content_type)
            .field("stream", &"<stream>")
            .finish()
    }
}
