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

//! Request-facing composition of cache, fallback chain and fan-out.

use crate::fallback::{FallbackChain, FetchError};
use cards_cache::{CardCache, MemoryStore, UpstashStore};
use cards_core::{Config, Error, MAX_LIMIT};
use cards_models::{CoinMetric, MetricQuery, ProviderResult};
use futures::future::join_all;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// The one entry point request handlers talk to.
///
/// Owns the shared HTTP client (bounded timeout, so one unresponsive
/// provider cannot stall a response), the provider chain and the cache
/// handle. Callers pick their own TTL per data kind.
#[derive(Clone)]
pub struct MetricService {
  client: Client,
  chain: FallbackChain,
  cache: CardCache,
}

impl MetricService {
  pub fn new(client: Client, chain: FallbackChain, cache: CardCache) -> Self {
    Self { client, chain, cache }
  }

  /// Build the standard service from configuration: the full provider chain
  /// and an Upstash-backed cache when credentials are present, an in-process
  /// one otherwise.
  pub fn from_config(config: &Config) -> Result<Self, Error> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .user_agent("coincard/0.1.0")
      .build()
      .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

    let chain = FallbackChain::from_config(config);

    let cache = match (&config.upstash_rest_url, &config.upstash_rest_token) {
      (Some(url), Some(token)) => {
        let store = UpstashStore::new(client.clone(), url, token)
          .map_err(|e| Error::Config(e.to_string()))?;
        info!("Using Upstash cache store at {}", url);
        CardCache::new(Arc::new(store))
      }
      _ => {
        info!("No Upstash credentials configured, using in-process cache");
        CardCache::new(Arc::new(MemoryStore::new()))
      }
    };

    Ok(Self::new(client, chain, cache))
  }

  /// Fetch one coin by id, memoized under the request signature.
  pub async fn coin(&self, id: &str, ttl: Duration) -> Result<ProviderResult, FetchError> {
    self.run(MetricQuery::Coin(id.to_string()), 1, ttl).await
  }

  /// Fetch a category listing, memoized under the request signature.
  pub async fn category(
    &self,
    id: &str,
    limit: usize,
    ttl: Duration,
  ) -> Result<ProviderResult, FetchError> {
    self.run(MetricQuery::Category(id.to_string()), limit, ttl).await
  }

  /// Fan out over independent coin ids and join the results.
  ///
  /// A failed or empty slot degrades to `None` for that row only; the rest
  /// of the response is unaffected.
  pub async fn coins(&self, ids: &[String], ttl: Duration) -> Vec<Option<CoinMetric>> {
    let fetches = ids.iter().map(|id| async move {
      match self.coin(id, ttl).await {
        Ok(result) => result.metrics.into_iter().next(),
        Err(e) => {
          warn!("Dropping row for {}: {}", id, e);
          None
        }
      }
    });
    join_all(fetches).await
  }

  async fn run(
    &self,
    query: MetricQuery,
    limit: usize,
    ttl: Duration,
  ) -> Result<ProviderResult, FetchError> {
    if query.id().trim().is_empty() {
      return Err(FetchError::EmptyIdentifier);
    }
    let limit = limit.clamp(1, MAX_LIMIT);

    let key = query.cache_key(limit);
    self
      .cache
      .get_or_fetch(&key, ttl, || self.chain.fetch(&self.client, &query, limit))
      .await
  }
}
