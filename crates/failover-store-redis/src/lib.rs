//! [`StateStore`] implementation over Redis, the backend `original_source/`
//! always pairs with the controller (`github.com/redis/go-redis/v9`).
//!
//! The only behavioral deviation from the source is `scan_prefix`: the Go
//! implementation lists `FailureMark`s with a blocking `KEYS pattern*` call,
//! which is fine at the scale that implementation runs at but is a known
//! anti-pattern against a shared Redis instance under load. This crate uses
//! `SCAN` with a cursor loop instead (via [`redis::AsyncCommands::scan_match`]),
//! which returns the same set of currently-matching keys without blocking the
//! server for the duration of the scan. See `DESIGN.md` for the full
//! rationale; the controller only ever observes "all keys matching a prefix",
//! so the two are interchangeable from its point of view.

use async_trait::async_trait;
use futures_util::StreamExt;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use failover_core::store::{StateStore, StoreError, Ttl};

/// A [`StateStore`] backed by a Redis (or Redis-compatible) server.
///
/// Built on [`ConnectionManager`] rather than a bare `MultiplexedConnection`
/// so that transient disconnects (a Redis failover, a network blip) are
/// retried transparently instead of surfacing as a `StoreError` on every call
/// until a caller reconnects by hand — the same reconnection behavior
/// `original_source/` gets for free from `go-redis`'s `UniversalClient`.
#[derive(Clone)]
pub struct RedisStateStore {
    conn: ConnectionManager,
}

impl RedisStateStore {
    /// Connects to `redis_url` (e.g. `redis://127.0.0.1:6379/0`) and wraps the
    /// resulting connection manager.
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| StoreError::from_source("failed to parse redis url", e))?;
        Self::from_client(client).await
    }

    /// Wraps an already-constructed [`redis::Client`], for callers that build
    /// the client themselves (TLS config, cluster discovery, ...).
    pub async fn from_client(client: redis::Client) -> Result<Self, StoreError> {
        let conn = client
            .get_connection_manager()
            .await
            .map_err(|e| StoreError::from_source("failed to establish redis connection", e))?;
        tracing::info!("connected to redis state store");
        Ok(Self { conn })
    }
}

#[async_trait]
impl StateStore for RedisStateStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();
        conn.get(key)
            .await
            .map_err(|e| StoreError::from_source(format!("GET {key} failed"), e))
    }

    async fn set(&self, key: &str, value: &str, ttl: Ttl) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        match ttl {
            Ttl::Millis(ms) => conn
                .pset_ex::<_, _, ()>(key, value, ms)
                .await
                .map_err(|e| StoreError::from_source(format!("PSETEX {key} failed"), e)),
            Ttl::None => conn
                .set::<_, _, ()>(key, value)
                .await
                .map_err(|e| StoreError::from_source(format!("SET {key} failed"), e)),
        }
    }

    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();
        conn.exists(key)
            .await
            .map_err(|e| StoreError::from_source(format!("EXISTS {key} failed"), e))
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key)
            .await
            .map_err(|e| StoreError::from_source(format!("DEL {key} failed"), e))
    }

    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let mut conn = self.conn.clone();
        let pattern = format!("{prefix}*");
        let mut iter: redis::AsyncIter<'_, String> = conn
            .scan_match(&pattern)
            .await
            .map_err(|e| StoreError::from_source(format!("SCAN {pattern} failed"), e))?;

        let mut keys = Vec::new();
        while let Some(key) = iter.next().await {
            keys.push(key);
        }
        tracing::debug!(pattern, matches = keys.len(), "scan_prefix complete");
        Ok(keys)
    }
}
