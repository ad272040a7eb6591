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

//! Ordered fallback across market data providers.
//!
//! Providers are tried in fixed priority order, reflecting decreasing data
//! richness and decreasing rate-limit friendliness. Each is attempted exactly
//! once per request; there is no retry-with-backoff within a provider.

use crate::sources::{BinanceProvider, CoinGeckoProvider, CoinMarketCapProvider};
use crate::{MarketDataProvider, ProviderError};
use cards_core::Config;
use cards_models::{MetricQuery, ProviderResult};
use reqwest::Client;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// One provider's failure, kept for the aggregate error and the logs.
#[derive(Debug)]
pub struct ProviderFailure {
  pub source: &'static str,
  pub error: ProviderError,
}

impl std::fmt::Display for ProviderFailure {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}: {}", self.source, self.error)
  }
}

/// Fatal outcome of a fetch request.
#[derive(Error, Debug)]
pub enum FetchError {
  /// Every provider in the chain failed for this request. Handlers map this
  /// to a degraded but well-formed response, never a raw 500.
  #[error("All providers exhausted: [{}]",
    .failures.iter().map(|f| f.to_string()).collect::<Vec<_>>().join("; "))]
  AllProvidersExhausted { failures: Vec<ProviderFailure> },

  /// The request identifier was empty; rejected before any provider call.
  #[error("Empty identifier in request")]
  EmptyIdentifier,
}

/// Ordered list of providers tried until one succeeds.
#[derive(Clone)]
pub struct FallbackChain {
  providers: Vec<Arc<dyn MarketDataProvider>>,
}

impl FallbackChain {
  pub fn new(providers: Vec<Arc<dyn MarketDataProvider>>) -> Self {
    Self { providers }
  }

  /// Standard chain: CoinGecko, then CoinMarketCap (when a key is
  /// configured), then Binance.
  pub fn from_config(config: &Config) -> Self {
    let mut providers: Vec<Arc<dyn MarketDataProvider>> =
      vec![Arc::new(CoinGeckoProvider::new(config.coingecko_api_key.clone()))];
    if let Some(key) = &config.coinmarketcap_api_key {
      providers.push(Arc::new(CoinMarketCapProvider::new(key.clone())));
    }
    providers.push(Arc::new(BinanceProvider::new()));
    Self::new(providers)
  }

  /// Try each provider in order and return the first success, tagged with
  /// the provider that produced it.
  pub async fn fetch(
    &self,
    client: &Client,
    query: &MetricQuery,
    limit: usize,
  ) -> Result<ProviderResult, FetchError> {
    let mut failures = Vec::new();

    for provider in &self.providers {
      let source = provider.source_name();
      match provider.fetch(client, query, limit).await {
        Ok(metrics) => {
          info!("{} served {} ({} rows)", source, query, metrics.len());
          return Ok(ProviderResult::new(source, metrics));
        }
        Err(error) => {
          warn!("{} failed for {}: {}", source, query, error);
          failures.push(ProviderFailure { source, error });
        }
      }
    }

    Err(FetchError::AllProvidersExhausted { failures })
  }
}
