use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::clock::Clock;

use super::{StateStore, StoreError, Ttl};

struct Entry {
    value: String,
    expires_at_ms: Option<u64>,
}

impl Entry {
    fn is_expired(&self, now_ms: u64) -> bool {
        matches!(self.expires_at_ms, Some(deadline) if now_ms >= deadline)
    }
}

/// Single-process [`StateStore`] backed by a [`DashMap`].
///
/// This is a legitimate backend for a single-replica deployment (no network
/// hop, no extra moving part), and it is what the controller's own test
/// suite and the `failover-demo` binary use. Expiry is lazy: entries are only
/// evicted when touched by `get`/`exists`/`scan_prefix`/`set`, the same
/// trade-off Redis's own `TTL` sampling makes — there is no background sweep.
///
/// Time comes from an injected [`Clock`] rather than `Instant::now()` so that
/// tests pairing this store with a `ManualClock` see TTL expiry advance in
/// lockstep with simulated time.
pub struct InMemoryStore {
    clock: Arc<dyn Clock>,
    entries: DashMap<String, Entry>,
}

impl InMemoryStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            entries: DashMap::new(),
        }
    }
}

#[async_trait]
impl StateStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let now = self.clock.now_ms();
        let hit = self.entries.get(key).and_then(|entry| {
            if entry.is_expired(now) {
                None
            } else {
                Some(entry.value.clone())
            }
        });
        if hit.is_none() {
            self.entries.remove_if(key, |_, entry| entry.is_expired(now));
        }
        Ok(hit)
    }

    async fn set(&self, key: &str, value: &str, ttl: Ttl) -> Result<(), StoreError> {
        let expires_at_ms = match ttl {
            Ttl::Millis(ms) => Some(self.clock.now_ms() + ms),
            Ttl::None => None,
        };
        self.entries.insert(
            key.to_owned(),
            Entry {
                value: value.to_owned(),
                expires_at_ms,
            },
        );
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get(key).await?.is_some())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }

    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let now = self.clock.now_ms();
        let matches: Vec<String> = self
            .entries
            .iter()
            .filter(|kv| kv.key().starts_with(prefix) && !kv.value().is_expired(now))
            .map(|kv| kv.key().clone())
            .collect();
        Ok(matches)
    }
}
