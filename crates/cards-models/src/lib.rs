//! # cards-models
//!
//! Normalized market data models shared by every coincard crate.
//!
//! Provider adapters map heterogeneous upstream payloads into [`CoinMetric`];
//! everything downstream (SVG cards, badges, text tables) consumes that one
//! shape and never re-derives formatting or trend sign.

pub mod format;
pub mod metric;
pub mod sparkline;

pub use format::{format_price, format_volume};
pub use metric::{CoinMetric, MetricQuery, ProviderResult, TrendDirection};
