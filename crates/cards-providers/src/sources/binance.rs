use super::MarketDataProvider;
use crate::ProviderError;
use async_trait::async_trait;
use cards_models::{CoinMetric, MetricQuery};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const SOURCE: &str = "Binance";

/// Quote asset appended to coin ids to form a Binance trading pair.
const QUOTE_ASSET: &str = "USDT";

/// Last provider in the chain: exchange data only. Coin ids are mapped onto
/// `<SYMBOL>USDT` pairs; there is no category catalog, so category queries
/// report `NotFound` and let the chain result stand on the earlier providers.
pub struct BinanceProvider;

impl BinanceProvider {
  pub fn new() -> Self {
    Self
  }

  /// Map a coin id onto a Binance trading pair, e.g. "btc" -> "BTCUSDT".
  ///
  /// Hyphenated ids keep only the leading segment ("obscure-token" ->
  /// "OBSCUREUSDT"); Binance symbols carry the base asset alone.
  fn trading_pair(id: &str) -> String {
    let base: String = id
      .split('-')
      .next()
      .unwrap_or(id)
      .chars()
      .filter(|c| c.is_ascii_alphanumeric())
      .collect();
    format!("{}{}", base.to_uppercase(), QUOTE_ASSET)
  }

  /// Fetch seven daily closes for the pair; chart data is best-effort and
  /// never fails the quote fetch.
  async fn fetch_sparkline(&self, client: &Client, pair: &str) -> Vec<f64> {
    let url = format!("{}/api/v3/klines", cards_core::BINANCE_BASE_URL);
    let result = async {
      let response = client
        .get(&url)
        .query(&[("symbol", pair), ("interval", "1d"), ("limit", "7")])
        .send()
        .await
        .ok()?;
      if !response.status().is_success() {
        return None;
      }
      let rows: Vec<Vec<serde_json::Value>> = response.json().await.ok()?;
      // Kline row index 4 is the close price, encoded as a string.
      let closes: Vec<f64> =
        rows.iter().filter_map(|row| row.get(4)?.as_str()?.parse().ok()).collect();
      Some(closes)
    }
    .await;

    match result {
      Some(closes) => closes,
      None => {
        debug!("No kline data for {}, rendering without sparkline", pair);
        Vec::new()
      }
    }
  }
}

impl Default for BinanceProvider {
  fn default() -> Self {
    Self::new()
  }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Ticker24hr {
  symbol: String,
  last_price: String,
  quote_volume: String,
  price_change_percent: String,
}

fn normalize(ticker: &Ticker24hr, id: &str, sparkline: Vec<f64>) -> Result<CoinMetric, ProviderError> {
  let price: f64 = ticker.last_price.parse().map_err(|_| ProviderError::Unavailable {
    provider: SOURCE,
    message: format!("unparseable lastPrice: {}", ticker.last_price),
  })?;
  let volume: f64 = ticker.quote_volume.parse().map_err(|_| ProviderError::Unavailable {
    provider: SOURCE,
    message: format!("unparseable quoteVolume: {}", ticker.quote_volume),
  })?;
  let trend: Option<f64> = ticker.price_change_percent.parse().ok();

  let base = ticker.symbol.strip_suffix(QUOTE_ASSET).unwrap_or(&ticker.symbol);
  Ok(CoinMetric::from_raw(base, id, price, volume, trend, sparkline))
}

#[async_trait]
impl MarketDataProvider for BinanceProvider {
  async fn fetch(
    &self,
    client: &Client,
    query: &MetricQuery,
    _limit: usize,
  ) -> Result<Vec<CoinMetric>, ProviderError> {
    let id = match query {
      MetricQuery::Coin(id) => id,
      MetricQuery::Category(id) => {
        return Err(ProviderError::NotFound { provider: SOURCE, id: id.clone() });
      }
    };

    let pair = Self::trading_pair(id);
    let url = format!("{}/api/v3/ticker/24hr", cards_core::BINANCE_BASE_URL);

    debug!("Fetching {} from Binance ticker/24hr", pair);

    let response = client
      .get(&url)
      .query(&[("symbol", pair.as_str())])
      .send()
      .await
      .map_err(|e| ProviderError::Unavailable { provider: SOURCE, message: e.to_string() })?;

    // Unknown symbols come back as 400 {"code":-1121,"msg":"Invalid symbol."}
    if response.status().as_u16() == 400 {
      return Err(ProviderError::NotFound { provider: SOURCE, id: id.clone() });
    }

    if !response.status().is_success() {
      return Err(ProviderError::Unavailable {
        provider: SOURCE,
        message: format!("HTTP {}", response.status()),
      });
    }

    let ticker: Ticker24hr = response
      .json()
      .await
      .map_err(|e| ProviderError::Unavailable { provider: SOURCE, message: e.to_string() })?;

    let sparkline = self.fetch_sparkline(client, &pair).await;
    let metric = normalize(&ticker, id, sparkline)?;

    info!("Binance returned {} at {} for {}", metric.symbol, metric.price, query);
    Ok(vec![metric])
  }

  fn source_name(&self) -> &'static str {
    SOURCE
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_trading_pair_mapping() {
    assert_eq!(BinanceProvider::trading_pair("btc"), "BTCUSDT");
    assert_eq!(BinanceProvider::trading_pair("BNB"), "BNBUSDT");
  }

  #[test]
  fn test_trading_pair_keeps_leading_segment_of_hyphenated_ids() {
    assert_eq!(BinanceProvider::trading_pair("obscure-token"), "OBSCUREUSDT");
    assert_eq!(BinanceProvider::trading_pair("usd-coin"), "USDUSDT");
  }

  #[test]
  fn test_ticker_parsing_and_sub_cent_normalization() {
    let json_response = r#"{
            "symbol": "OBSCUREUSDT",
            "lastPrice": "0.0000032",
            "quoteVolume": "4500.12",
            "priceChangePercent": "-1.250"
        }"#;

    let ticker: Ticker24hr = serde_json::from_str(json_response).unwrap();
    let metric = normalize(&ticker, "obscure-token", vec![]).unwrap();

    assert_eq!(metric.symbol, "OBSCURE");
    assert_eq!(metric.price, "0.00000320");
    assert_eq!(metric.volume, "$4.5K");
    assert_eq!(metric.trend, -1.25);
  }

  #[test]
  fn test_unparseable_price_is_structural_failure() {
    let ticker = Ticker24hr {
      symbol: "BTCUSDT".to_string(),
      last_price: "n/a".to_string(),
      quote_volume: "1.0".to_string(),
      price_change_percent: "0.0".to_string(),
    };

    let err = normalize(&ticker, "btc", vec![]).unwrap_err();
    assert!(matches!(err, ProviderError::Unavailable { .. }));
  }

  #[tokio::test]
  async fn test_category_queries_are_not_found() {
    let provider = BinanceProvider::new();
    let client = Client::new();
    let query = MetricQuery::Category("defi".to_string());

    let err = provider.fetch(&client, &query, 10).await.unwrap_err();
    assert!(matches!(err, ProviderError::NotFound { .. }));
  }
}
