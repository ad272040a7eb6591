pub mod binance;
pub mod coingecko;
pub mod coinmarketcap;

pub use binance::BinanceProvider;
pub use coingecko::CoinGeckoProvider;
pub use coinmarketcap::CoinMarketCapProvider;

use crate::ProviderError;
use async_trait::async_trait;
use cards_models::{CoinMetric, MetricQuery};
use reqwest::Client;

/// Trait implemented by every upstream market data source.
///
/// Contract: one fetch performs one outbound call (plus at most one auxiliary
/// call for chart data) with no internal retries; a failure surfaces
/// immediately so the orchestrator can move to the next source. The caller
/// clamps `limit` before invocation.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
  /// Fetch normalized metrics for a coin or category query.
  async fn fetch(
    &self,
    client: &Client,
    query: &MetricQuery,
    limit: usize,
  ) -> Result<Vec<CoinMetric>, ProviderError>;

  /// Name of this data source, used for tagging results and logging.
  fn source_name(&self) -> &'static str;
}
