//! Backing store abstraction for the cache layer.

use async_trait::async_trait;
use std::time::Duration;

use crate::CacheResult;

/// Key/value store with per-entry TTL.
///
/// Implementations own entry lifetime exclusively: entries are immutable once
/// written and overwritten wholesale on refresh, so last-writer-wins is
/// acceptable and no locking discipline is required of callers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
  /// Get a value by key. Expired entries read as absent.
  async fn get(&self, key: &str) -> CacheResult<Option<String>>;

  /// Store a value under `key` for `ttl`.
  async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;
}
