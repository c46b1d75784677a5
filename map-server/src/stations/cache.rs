//! Caching layer for the stations upstream payload.
//!
//! The proxy endpoint tells browsers `cache-control: public, max-age=60`;
//! the server-side pipeline mirrors the same 60-second freshness window
//! here so repeated marker requests don't hammer the upstream.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use serde_json::Value;

use super::client::StationsClient;
use super::error::StationsError;

/// Configuration for the payload cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached payloads.
    pub ttl: Duration,

    /// Maximum number of cached payloads (one per upstream URL).
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 4,
        }
    }
}

/// Stations client with a payload cache in front of `fetch_json`.
pub struct CachedStationsClient {
    client: StationsClient,
    payloads: MokaCache<String, Arc<Value>>,
}

impl CachedStationsClient {
    /// Create a new cached client.
    pub fn new(client: StationsClient, config: &CacheConfig) -> Self {
        let payloads = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { client, payloads }
    }

    /// Fetch the upstream payload, serving from cache when fresh.
    ///
    /// Failed fetches are never cached; the next caller retries.
    pub async fn fetch(&self) -> Result<Arc<Value>, StationsError> {
        let key = self.client.upstream_url().to_string();

        if let Some(hit) = self.payloads.get(&key).await {
            return Ok(hit);
        }

        let payload = Arc::new(self.client.fetch_json().await?);
        self.payloads.insert(key, Arc::clone(&payload)).await;
        Ok(payload)
    }

    /// Number of cached payloads (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.payloads.entry_count()
    }

    /// Drop all cached payloads.
    pub fn invalidate_all(&self) {
        self.payloads.invalidate_all();
    }
}
