/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Coincard contributors
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! In-process cache store.
//!
//! Entries expire lazily on read; there is no background sweep. Deadlines use
//! `tokio::time::Instant` so TTL behavior is testable under paused time.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::store::CacheStore;
use crate::CacheResult;

struct Entry {
  value: String,
  expires_at: Instant,
}

/// Default store when no hosted cache is configured.
#[derive(Default)]
pub struct MemoryStore {
  entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl CacheStore for MemoryStore {
  async fn get(&self, key: &str) -> CacheResult<Option<String>> {
    {
      let entries = self.entries.read().await;
      match entries.get(key) {
        Some(entry) if entry.expires_at > Instant::now() => {
          return Ok(Some(entry.value.clone()));
        }
        Some(_) => {}
        None => return Ok(None),
      }
    }

    // Entry exists but has expired; evict it before reporting a miss.
    self.entries.write().await.remove(key);
    Ok(None)
  }

  async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
    let entry = Entry { value: value.to_string(), expires_at: Instant::now() + ttl };
    self.entries.write().await.insert(key.to_string(), entry);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_set_then_get_within_ttl() {
    let store = MemoryStore::new();
    store.set("btc", "cached", Duration::from_secs(60)).await.unwrap();
    assert_eq!(store.get("btc").await.unwrap(), Some("cached".to_string()));
  }

  #[tokio::test]
  async fn test_missing_key_reads_as_none() {
    let store = MemoryStore::new();
    assert_eq!(store.get("nope").await.unwrap(), None);
  }

  #[tokio::test(start_paused = true)]
  async fn test_entry_expires_after_ttl() {
    let store = MemoryStore::new();
    store.set("btc", "cached", Duration::from_secs(60)).await.unwrap();

    tokio::time::advance(Duration::from_secs(59)).await;
    assert!(store.get("btc").await.unwrap().is_some());

    tokio::time::advance(Duration::from_secs(2)).await;
    assert_eq!(store.get("btc").await.unwrap(), None);
  }

  #[tokio::test(start_paused = true)]
  async fn test_overwrite_refreshes_deadline() {
    let store = MemoryStore::new();
    store.set("btc", "old", Duration::from_secs(10)).await.unwrap();
    tokio::time::advance(Duration::from_secs(8)).await;
    store.set("btc", "new", Duration::from_secs(10)).await.unwrap();

    tokio::time::advance(Duration::from_secs(8)).await;
    assert_eq!(store.get("btc").await.unwrap(), Some("new".to_string()));
  }
}
