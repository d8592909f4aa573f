//! Request-path to object-key resolution.
//!
//! # Design Decisions
//! - Exactly one leading separator is removed; the remainder is the key,
//!   verbatim, further separators included
//! - No normalization and no traversal sanitization: the mapping is a direct
//!   mirror of the storage namespace, and path safety sits with the store
//!   and the front-door layer

/// Derive the object key from a request path.
///
/// Pure function: removes a single leading `/` and nothing else. A path of
/// just `/` yields the empty key, which the store rejects downstream.
pub fn resolve_key(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}
