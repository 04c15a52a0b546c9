//! Time-bounded geocoding cache.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::Coordinates;
use crate::time::Clock;

use super::{Geocoder, address_key};

#[derive(Debug, Clone, Copy)]
struct CachedCoordinates {
    coordinates: Coordinates,
    expires_at: NaiveDateTime,
}

/// Wraps a [`Geocoder`] and remembers successful lookups for a fixed TTL.
///
/// Failures are never cached. Expired entries are dropped whenever a new
/// entry is stored. Expiry is measured with the injected [`Clock`], so tests
/// can step past the TTL without sleeping.
pub struct CachedGeocoder<G> {
    inner: G,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    entries: Mutex<HashMap<String, CachedCoordinates>>,
}

impl<G: Geocoder> CachedGeocoder<G> {
    /// Creates a cache in front of `inner`.
    pub fn new(inner: G, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            inner,
            clock,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Drops entries whose TTL has passed.
    pub async fn purge_expired(&self) {
        let now = self.clock.now();
        self.entries.lock().await.retain(|_, e| e.expires_at > now);
    }

    /// Number of entries currently held, expired or not.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Returns true if nothing is cached.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// The wrapped geocoder.
    pub fn inner(&self) -> &G {
        &self.inner
    }
}

#[async_trait]
impl<G: Geocoder> Geocoder for CachedGeocoder<G> {
    async fn geocode(&self, address: &str) -> EngineResult<Coordinates> {
        let key = address_key(address);
        let now = self.clock.now();

        if let Some(entry) = self.entries.lock().await.get(&key)
            && entry.expires_at > now
        {
            debug!(address = %key, "Geocode cache hit");
            return Ok(entry.coordinates);
        }

        let coordinates = self.inner.geocode(address).await?;
        let mut entries = self.entries.lock().await;
        entries.retain(|_, e| e.expires_at > now);
        match now.checked_add_signed(self.ttl) {
            Some(expires_at) => {
                entries.insert(
                    key,
                    CachedCoordinates {
                        coordinates,
                        expires_at,
                    },
                );
            }
            None => debug!(address = %key, "Cache expiry out of range; not caching"),
        }
        Ok(coordinates)
    }
}
