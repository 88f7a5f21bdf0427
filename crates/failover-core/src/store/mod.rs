//! Shared state store contract.
//!
//! The controller coordinates multiple replicas purely through this trait: it
//! assumes single-key atomicity (a single `set`/`exists`/`delete` call is
//! atomic from the store's point of view) but never assumes multi-key
//! atomicity. Every protocol in [`crate::controller`] is written so a crash
//! between two store calls leaves the system in a state some later call can
//! still make sense of — see `DESIGN.md` for the write-ordering argument per
//! protocol.

pub mod memory;

use async_trait::async_trait;
use std::fmt;

/// Time-to-live for a `set` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ttl {
    /// Expires after the given number of milliseconds.
    Millis(u64),
    /// Never expires (used for `RoutingState`, which is held with no TTL).
    None,
}

/// Opaque error from a store backend. Store implementations wrap their own
/// error type (a `redis::RedisError`, an I/O error, ...) behind this so
/// `failover-core` stays backend-agnostic.
#[derive(Debug, thiserror::Error)]
#[error("state store error: {message}")]
pub struct StoreError {
    pub message: String,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn from_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// External strongly-consistent key-value store with TTL support.
///
/// Every method is `async` because every real backend (Redis, etcd, ...) is
/// reached over the network. Implementations must not reorder operations
/// relative to how the caller issued them on a single connection, but are
/// free to serve concurrent callers however their backend allows.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Reads a string value. `Ok(None)` means the key does not exist (or has
    /// expired) — this is a normal outcome, not an error.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes a string value with the given TTL, replacing any prior value
    /// and TTL for that key.
    async fn set(&self, key: &str, value: &str, ttl: Ttl) -> Result<(), StoreError>;

    /// Whether the key is currently present (and not expired).
    async fn exists(&self, key: &str) -> Result<bool, StoreError>;

    /// Deletes a key. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Lists every key currently matching the given prefix (already expired
    /// keys must not be returned). Order is unspecified; callers only use
    /// this for counting and bulk deletion.
    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError>;
}

impl fmt::Debug for dyn StateStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("dyn StateStore")
    }
}
