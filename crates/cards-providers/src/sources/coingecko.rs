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

use super::MarketDataProvider;
use crate::ProviderError;
use async_trait::async_trait;
use cards_models::{CoinMetric, MetricQuery};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const SOURCE: &str = "CoinGecko";

/// First provider in the chain: richest data (names, sparklines, categories).
pub struct CoinGeckoProvider {
  pub api_key: Option<String>,
}

impl CoinGeckoProvider {
  pub fn new(api_key: Option<String>) -> Self {
    Self { api_key }
  }

  /// Pro keys (prefix `CG-`) use the pro host; everything else hits the
  /// public host, with the demo auth param when a key is present.
  fn base_and_auth(&self) -> (&'static str, Option<(&'static str, &str)>) {
    match self.api_key.as_deref() {
      Some(key) if key.starts_with("CG-") => {
        (cards_core::COINGECKO_PRO_BASE_URL, Some(("x_cg_pro_api_key", key)))
      }
      Some(key) => (cards_core::COINGECKO_BASE_URL, Some(("x_cg_demo_api_key", key))),
      None => (cards_core::COINGECKO_BASE_URL, None),
    }
  }
}

// Struct for /coins/markets response rows
#[derive(Debug, Deserialize, Serialize)]
struct MarketCoin {
  id: String,
  symbol: String,
  name: String,
  current_price: Option<f64>,
  total_volume: Option<f64>,
  price_change_percentage_24h: Option<f64>,
  sparkline_in_7d: Option<SparklineIn7d>,
}

#[derive(Debug, Deserialize, Serialize)]
struct SparklineIn7d {
  price: Vec<f64>,
}

fn normalize(coins: Vec<MarketCoin>) -> Vec<CoinMetric> {
  coins
    .into_iter()
    .map(|coin| {
      CoinMetric::from_raw(
        &coin.symbol,
        &coin.name,
        coin.current_price.unwrap_or(0.0),
        coin.total_volume.unwrap_or(0.0),
        coin.price_change_percentage_24h,
        coin.sparkline_in_7d.map(|s| s.price).unwrap_or_default(),
      )
    })
    .collect()
}

#[async_trait]
impl MarketDataProvider for CoinGeckoProvider {
  async fn fetch(
    &self,
    client: &Client,
    query: &MetricQuery,
    limit: usize,
  ) -> Result<Vec<CoinMetric>, ProviderError> {
    let (base_url, auth) = self.base_and_auth();
    let url = format!("{}/coins/markets", base_url);

    let limit = limit.to_string();
    let mut params: Vec<(&str, &str)> = vec![
      ("vs_currency", "usd"),
      ("order", "market_cap_desc"),
      ("per_page", &limit),
      ("page", "1"),
      ("sparkline", "true"),
      ("price_change_percentage", "24h"),
    ];
    match query {
      MetricQuery::Coin(id) => params.push(("ids", id)),
      MetricQuery::Category(id) => params.push(("category", id)),
    }
    if let Some((param, key)) = auth {
      params.push((param, key));
    }

    debug!("Fetching {} from CoinGecko /coins/markets", query);

    let response = client
      .get(&url)
      .query(&params)
      .header("accept", "application/json")
      .send()
      .await
      .map_err(|e| ProviderError::Unavailable { provider: SOURCE, message: e.to_string() })?;

    if !response.status().is_success() {
      return Err(ProviderError::Unavailable {
        provider: SOURCE,
        message: format!("HTTP {}", response.status()),
      });
    }

    let coins: Vec<MarketCoin> = response
      .json()
      .await
      .map_err(|e| ProviderError::Unavailable { provider: SOURCE, message: e.to_string() })?;

    if coins.is_empty() {
      return Err(ProviderError::NotFound { provider: SOURCE, id: query.id().to_string() });
    }

    let metrics = normalize(coins);
    info!("CoinGecko returned {} rows for {}", metrics.len(), query);
    Ok(metrics)
  }

  fn source_name(&self) -> &'static str {
    SOURCE
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use cards_models::TrendDirection;

  #[test]
  fn test_markets_response_parsing_and_normalization() {
    let json_response = r#"[
            {
                "id": "bitcoin",
                "symbol": "btc",
                "name": "Bitcoin",
                "current_price": 65000.42,
                "total_volume": 32450000000,
                "price_change_percentage_24h": 2.5,
                "sparkline_in_7d": { "price": [64000.0, 64500.0, 65000.42] }
            }
        ]"#;

    let coins: Vec<MarketCoin> = serde_json::from_str(json_response).unwrap();
    let metrics = normalize(coins);

    assert_eq!(metrics.len(), 1);
    let btc = &metrics[0];
    assert_eq!(btc.symbol, "BTC");
    assert_eq!(btc.name, "Bitcoin");
    assert_eq!(btc.price, "65000.42");
    assert_eq!(btc.volume, "$32.5B");
    assert_eq!(btc.trend, 2.5);
    assert_eq!(btc.direction, TrendDirection::Up);
    assert_eq!(btc.sparkline.len(), 3);
  }

  #[test]
  fn test_missing_market_fields_degrade_to_zero() {
    let json_response = r#"[
            {
                "id": "ghost-coin",
                "symbol": "ghst",
                "name": "Ghost Coin",
                "current_price": null,
                "total_volume": null,
                "price_change_percentage_24h": null,
                "sparkline_in_7d": null
            }
        ]"#;

    let coins: Vec<MarketCoin> = serde_json::from_str(json_response).unwrap();
    let metrics = normalize(coins);

    assert_eq!(metrics[0].price, "0.00");
    assert_eq!(metrics[0].volume, "$0");
    assert_eq!(metrics[0].direction, TrendDirection::Flat);
    assert!(metrics[0].sparkline.is_empty());
  }

  #[test]
  fn test_pro_key_selects_pro_host() {
    let provider = CoinGeckoProvider::new(Some("CG-abc123".to_string()));
    let (base, auth) = provider.base_and_auth();
    assert_eq!(base, cards_core::COINGECKO_PRO_BASE_URL);
    assert_eq!(auth.unwrap().0, "x_cg_pro_api_key");

    let provider = CoinGeckoProvider::new(None);
    let (base, auth) = provider.base_and_auth();
    assert_eq!(base, cards_core::COINGECKO_BASE_URL);
    assert!(auth.is_none());
  }
}
