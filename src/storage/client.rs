//! HTTP client for the backing object store.
//!
//! # Responsibilities
//! - Build the process-wide store handle from configuration
//! - Map keys to object URLs under the configured bucket
//! - Issue fetches and expose the response as a byte stream
//!
//! # Design Decisions
//! - Keys are NOT sanitized here: the path-to-key mapping is a direct mirror
//!   of the storage namespace, and traversal concerns sit with the store and
//!   the front-door access-control layer
//! - Key segments are percent-encoded for the wire, separators preserved

use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header;
use url::Url;

use crate::config::StorageConfig;
use crate::storage::{FetchedObject, StorageError};

/// Shared handle to the backing object store.
///
/// Cheap to clone; all clones reuse the same connection pool.
#[derive(Debug, Clone)]
pub struct HttpObjectStore {
    client: reqwest::Client,
    endpoint: Url,
    bucket: String,
}

impl HttpObjectStore {
    /// Build a store handle from configuration.
    pub fn new(config: &StorageConfig, connect_timeout: Duration) -> Result<Self, StorageError> {
        let endpoint =
            Url::parse(&config.endpoint).map_err(|e| StorageError::Endpoint(e.to_string()))?;
        if endpoint.cannot_be_a_base() {
            return Err(StorageError::Endpoint(format!(
                "cannot address objects under {:?}",
                config.endpoint
            )));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            bucket: config.bucket.clone(),
        })
    }

    /// The bucket this store reads from.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Fetch an object by key.
    ///
    /// Issues one GET against the store and returns its status, content type
    /// and body stream without reading any body bytes up front. An empty key
    /// is rejected before any network call.
    pub async fn fetch(&self, key: &str) -> Result<FetchedObject, StorageError> {
        if key.is_empty() {
            return Err(StorageError::EmptyKey);
        }

        let url = self.object_url(key)?;

        tracing::debug!(
            bucket = %self.bucket,
            key = %key,
            url = %url,
            "Fetching object from store"
        );

        let response = self.client.get(url).send().await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        tracing::debug!(
            bucket = %self.bucket,
            key = %key,
            status = status.as_u16(),
            content_type = ?content_type,
            "Store responded"
        );

        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(StorageError::from))
            .boxed();

        Ok(FetchedObject {
            status,
            content_type,
            stream,
        })
    }

    /// Compute the object URL for a key.
    ///
    /// Each `/`-separated segment of the key is pushed individually so the
    /// separators survive and everything else is percent-encoded.
    fn object_url(&self, key: &str) -> Result<Url, StorageError> {
        let mut url = self.endpoint.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| StorageError::Endpoint("endpoint has no path".into()))?;
            segments.pop_if_empty();
            segments.push(&self.bucket);
            segments.extend(key.split('/'));
        }
        Ok(url)
    }
}
