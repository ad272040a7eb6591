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

//! # cards-providers
//!
//! Upstream market data adapters and the fallback orchestration around them.
//!
//! Each adapter translates one provider's response into the normalized
//! [`cards_models::CoinMetric`] shape. The [`fallback::FallbackChain`] tries
//! adapters in fixed priority order until one succeeds, and
//! [`service::MetricService`] composes the chain with the TTL cache and
//! multi-coin fan-out.

pub mod fallback;
pub mod service;
pub mod sources;

pub use fallback::{FallbackChain, FetchError, ProviderFailure};
pub use service::MetricService;
pub use sources::MarketDataProvider;

use thiserror::Error;

/// Failure modes of a single provider attempt.
///
/// Both variants are non-fatal to a request: the orchestrator logs them and
/// moves on to the next provider. `NotFound` is distinct from unavailability
/// because another provider's catalog may contain the requested id under a
/// different scheme.
#[derive(Error, Debug)]
pub enum ProviderError {
  /// Network failure, timeout, non-success status or a structurally
  /// unexpected response.
  #[error("{provider} unavailable: {message}")]
  Unavailable { provider: &'static str, message: String },

  /// The identifier has no match in this provider's catalog.
  #[error("{provider} has no match for: {id}")]
  NotFound { provider: &'static str, id: String },
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_provider_error_messages_name_the_provider() {
    let err = ProviderError::Unavailable {
      provider: "CoinGecko",
      message: "connection refused".to_string(),
    };
    assert_eq!(err.to_string(), "CoinGecko unavailable: connection refused");

    let err = ProviderError::NotFound { provider: "Binance", id: "obscure-token".to_string() };
    assert_eq!(err.to_string(), "Binance has no match for: obscure-token");
  }
}
