//! Configuration management for the coincard service

use crate::error::{Error, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;

/// Main configuration struct for the coincard service
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
  /// CoinGecko API key (demo or pro); providers work without one at lower limits
  pub coingecko_api_key: Option<String>,

  /// CoinMarketCap API key; the CoinMarketCap adapter is skipped without one
  pub coinmarketcap_api_key: Option<String>,

  /// Upstash REST endpoint for the shared cache store
  pub upstash_rest_url: Option<String>,

  /// Upstash REST bearer token
  pub upstash_rest_token: Option<String>,

  /// Outbound request timeout in seconds
  pub timeout_secs: u64,

  /// Address the HTTP server binds to
  pub bind_addr: String,
}

impl Config {
  /// Load configuration from environment variables
  pub fn from_env() -> Result<Self> {
    dotenv().ok();

    let coingecko_api_key = env::var("COINGECKO_API_KEY").ok().filter(|k| !k.is_empty());
    let coinmarketcap_api_key = env::var("COINMARKETCAP_API_KEY").ok().filter(|k| !k.is_empty());

    let upstash_rest_url = env::var("UPSTASH_REDIS_REST_URL").ok().filter(|u| !u.is_empty());
    let upstash_rest_token = env::var("UPSTASH_REDIS_REST_TOKEN").ok().filter(|t| !t.is_empty());

    if upstash_rest_url.is_some() != upstash_rest_token.is_some() {
      return Err(Error::Config(
        "UPSTASH_REDIS_REST_URL and UPSTASH_REDIS_REST_TOKEN must be set together".to_string(),
      ));
    }

    let timeout_secs = env::var("CARDS_TIMEOUT_SECS")
      .unwrap_or_else(|_| crate::DEFAULT_TIMEOUT_SECS.to_string())
      .parse()
      .map_err(|_| Error::Config("Invalid CARDS_TIMEOUT_SECS".to_string()))?;

    let bind_addr = env::var("CARDS_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    Ok(Config {
      coingecko_api_key,
      coinmarketcap_api_key,
      upstash_rest_url,
      upstash_rest_token,
      timeout_secs,
      bind_addr,
    })
  }

  /// Create a config with default values (for testing)
  pub fn default_for_tests() -> Self {
    Config {
      coingecko_api_key: None,
      coinmarketcap_api_key: None,
      upstash_rest_url: None,
      upstash_rest_token: None,
      timeout_secs: crate::DEFAULT_TIMEOUT_SECS,
      bind_addr: "127.0.0.1:0".to_string(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_config_defaults() {
    let config = Config::default_for_tests();
    assert_eq!(config.timeout_secs, crate::DEFAULT_TIMEOUT_SECS);
    assert!(config.coingecko_api_key.is_none());
    assert!(config.upstash_rest_url.is_none());
  }

  #[test]
  fn test_config_from_env_rejects_half_configured_upstash() {
    env::remove_var("UPSTASH_REDIS_REST_TOKEN");
    env::set_var("UPSTASH_REDIS_REST_URL", "https://example.upstash.io");
    let result = Config::from_env();
    assert!(matches!(result, Err(Error::Config(_))));
    env::remove_var("UPSTASH_REDIS_REST_URL");
  }
}
