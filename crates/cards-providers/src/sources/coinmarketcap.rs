use super::MarketDataProvider;
use crate::ProviderError;
use async_trait::async_trait;
use cards_models::{CoinMetric, MetricQuery};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

const SOURCE: &str = "CoinMarketCap";

/// Second provider in the chain. Requires an API key; supplies no sparkline
/// data, so rows from this source render without a chart.
pub struct CoinMarketCapProvider {
  pub api_key: String,
}

impl CoinMarketCapProvider {
  pub fn new(api_key: String) -> Self {
    Self { api_key }
  }
}

#[derive(Debug, Serialize, Deserialize)]
struct CmcStatus {
  error_code: i32,
  error_message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CmcQuotesResponse {
  status: CmcStatus,
  #[serde(default)]
  data: HashMap<String, CmcCoin>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CmcCategoryResponse {
  status: CmcStatus,
  data: Option<CmcCategoryData>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CmcCategoryData {
  coins: Vec<CmcCoin>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CmcCoin {
  name: String,
  symbol: String,
  quote: HashMap<String, CmcQuote>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CmcQuote {
  price: Option<f64>,
  volume_24h: Option<f64>,
  percent_change_24h: Option<f64>,
}

fn normalize(coins: impl IntoIterator<Item = CmcCoin>) -> Vec<CoinMetric> {
  coins
    .into_iter()
    .map(|coin| {
      let usd = coin.quote.get("USD");
      CoinMetric::from_raw(
        &coin.symbol,
        &coin.name,
        usd.and_then(|q| q.price).unwrap_or(0.0),
        usd.and_then(|q| q.volume_24h).unwrap_or(0.0),
        usd.and_then(|q| q.percent_change_24h),
        Vec::new(), // CMC has no sparkline endpoint on this tier
      )
    })
    .collect()
}

impl CoinMarketCapProvider {
  fn check_status(&self, status: &CmcStatus, id: &str) -> Result<(), ProviderError> {
    if status.error_code != 0 {
      let message = status.error_message.clone().unwrap_or_else(|| "Unknown CMC error".to_string());
      // CMC reports unknown slugs/ids through the 400 error envelope.
      if message.contains("Invalid value") {
        return Err(ProviderError::NotFound { provider: SOURCE, id: id.to_string() });
      }
      return Err(ProviderError::Unavailable { provider: SOURCE, message });
    }
    Ok(())
  }

  async fn request(
    &self,
    client: &Client,
    path: &str,
    params: &[(&str, &str)],
  ) -> Result<reqwest::Response, ProviderError> {
    let url = format!("{}{}", cards_core::COINMARKETCAP_BASE_URL, path);

    let response = client
      .get(&url)
      .header("X-CMC_PRO_API_KEY", &self.api_key)
      .header("Accept", "application/json")
      .query(params)
      .send()
      .await
      .map_err(|e| ProviderError::Unavailable { provider: SOURCE, message: e.to_string() })?;

    let status = response.status();
    // 400 carries the error envelope (bad slug etc.); let the caller inspect it.
    if !status.is_success() && status.as_u16() != 400 {
      return Err(ProviderError::Unavailable {
        provider: SOURCE,
        message: format!("HTTP {}", status),
      });
    }
    Ok(response)
  }
}

#[async_trait]
impl MarketDataProvider for CoinMarketCapProvider {
  async fn fetch(
    &self,
    client: &Client,
    query: &MetricQuery,
    limit: usize,
  ) -> Result<Vec<CoinMetric>, ProviderError> {
    let limit_str = limit.to_string();
    let metrics = match query {
      MetricQuery::Coin(id) => {
        debug!("Fetching coin {} from CoinMarketCap quotes/latest", id);
        let response = self
          .request(
            client,
            "/v2/cryptocurrency/quotes/latest",
            &[("slug", id.as_str()), ("convert", "USD")],
          )
          .await?;

        let body: CmcQuotesResponse = response
          .json()
          .await
          .map_err(|e| ProviderError::Unavailable { provider: SOURCE, message: e.to_string() })?;
        self.check_status(&body.status, id)?;

        if body.data.is_empty() {
          return Err(ProviderError::NotFound { provider: SOURCE, id: id.clone() });
        }
        normalize(body.data.into_values())
      }
      MetricQuery::Category(id) => {
        debug!("Fetching category {} from CoinMarketCap category endpoint", id);
        let response = self
          .request(
            client,
            "/v1/cryptocurrency/category",
            &[("id", id.as_str()), ("limit", &limit_str), ("convert", "USD")],
          )
          .await?;

        let body: CmcCategoryResponse = response
          .json()
          .await
          .map_err(|e| ProviderError::Unavailable { provider: SOURCE, message: e.to_string() })?;
        self.check_status(&body.status, id)?;

        let coins = body
          .data
          .map(|d| d.coins)
          .filter(|c| !c.is_empty())
          .ok_or_else(|| ProviderError::NotFound { provider: SOURCE, id: id.clone() })?;
        normalize(coins)
      }
    };

    let metrics: Vec<CoinMetric> = metrics.into_iter().take(limit).collect();
    info!("CoinMarketCap returned {} rows for {}", metrics.len(), query);
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
  fn test_quotes_response_parsing_and_normalization() {
    let json_response = r#"{
            "status": {
                "error_code": 0,
                "error_message": null
            },
            "data": {
                "1": {
                    "name": "Bitcoin",
                    "symbol": "BTC",
                    "quote": {
                        "USD": {
                            "price": 45000.0,
                            "volume_24h": 20000000000,
                            "percent_change_24h": -2.5
                        }
                    }
                }
            }
        }"#;

    let response: CmcQuotesResponse = serde_json::from_str(json_response).unwrap();
    assert_eq!(response.status.error_code, 0);

    let metrics = normalize(response.data.into_values());
    assert_eq!(metrics.len(), 1);
    assert_eq!(metrics[0].symbol, "BTC");
    assert_eq!(metrics[0].price, "45000.00");
    assert_eq!(metrics[0].volume, "$20.0B");
    assert_eq!(metrics[0].direction, TrendDirection::Down);
    assert!(metrics[0].sparkline.is_empty());
  }

  #[test]
  fn test_invalid_slug_maps_to_not_found() {
    let provider = CoinMarketCapProvider::new("test_key".to_string());
    let status = CmcStatus {
      error_code: 400,
      error_message: Some(r#"Invalid value for "slug": "obscure-token""#.to_string()),
    };

    let err = provider.check_status(&status, "obscure-token").unwrap_err();
    assert!(matches!(err, ProviderError::NotFound { .. }));
  }

  #[test]
  fn test_other_envelope_errors_map_to_unavailable() {
    let provider = CoinMarketCapProvider::new("test_key".to_string());
    let status =
      CmcStatus { error_code: 1008, error_message: Some("Rate limit reached".to_string()) };

    let err = provider.check_status(&status, "bitcoin").unwrap_err();
    assert!(matches!(err, ProviderError::Unavailable { .. }));
  }

  #[test]
  fn test_category_response_parsing() {
    let json_response = r#"{
            "status": { "error_code": 0, "error_message": null },
            "data": {
                "coins": [
                    {
                        "name": "Ethereum",
                        "symbol": "ETH",
                        "quote": { "USD": { "price": 3000.0, "volume_24h": 12300000, "percent_change_24h": 0.0 } }
                    }
                ]
            }
        }"#;

    let response: CmcCategoryResponse = serde_json::from_str(json_response).unwrap();
    let metrics = normalize(response.data.unwrap().coins);
    assert_eq!(metrics[0].symbol, "ETH");
    assert_eq!(metrics[0].volume, "$12.3M");
    assert_eq!(metrics[0].direction, TrendDirection::Flat);
  }
}
