pub mod config;
pub mod error;

pub use config::Config;
pub use error::{Error, Result};

/// Base URL for the CoinGecko public API.
pub const COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Base URL for the CoinGecko pro API (used when the key starts with `CG-`).
pub const COINGECKO_PRO_BASE_URL: &str = "https://pro-api.coingecko.com/api/v3";

/// Base URL for the CoinMarketCap pro API.
pub const COINMARKETCAP_BASE_URL: &str = "https://pro-api.coinmarketcap.com";

/// Base URL for the Binance public REST API.
pub const BINANCE_BASE_URL: &str = "https://api.binance.com";

/// Default number of rows returned for listing queries.
pub const DEFAULT_LIMIT: usize = 10;

/// Upper bound on the `limit` parameter accepted from callers.
pub const MAX_LIMIT: usize = 20;

/// Cache TTL for badge-sized data (price/trend/volume for one coin).
pub const TTL_BADGE_SECS: u64 = 60;

/// Cache TTL for full cards and category listings.
pub const TTL_CARD_SECS: u64 = 300;

/// Default outbound request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
