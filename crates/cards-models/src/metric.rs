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

//! Core record types shared by providers, cache and renderers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::format::{format_price, format_volume};

/// One row of normalized market data for a symbol at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoinMetric {
  /// Short uppercase ticker, e.g. "BTC".
  pub symbol: String,
  /// Human-readable coin name, e.g. "Bitcoin".
  pub name: String,
  /// Price in USD, pre-formatted (2 decimals, or 8 below one cent).
  pub price: String,
  /// 24h traded volume, human-abbreviated, e.g. "$12.3M".
  pub volume: String,
  /// Signed percentage change over the last 24h.
  pub trend: f64,
  /// Trend classification, computed once here and consumed by renderers.
  pub direction: TrendDirection,
  /// Chronological recent price samples; empty when the provider has none.
  pub sparkline: Vec<f64>,
}

impl CoinMetric {
  /// Build a normalized metric from raw provider fields.
  ///
  /// Applies the shared price/volume formatting rules and classifies the
  /// trend so no renderer re-derives them. Sparklines with fewer than two
  /// points cannot produce a line and are dropped.
  pub fn from_raw(
    symbol: &str,
    name: &str,
    price: f64,
    volume: f64,
    trend: Option<f64>,
    sparkline: Vec<f64>,
  ) -> Self {
    let sparkline = if sparkline.len() < 2 { Vec::new() } else { sparkline };
    Self {
      symbol: symbol.to_uppercase(),
      name: name.to_string(),
      price: format_price(price),
      volume: format_volume(volume),
      trend: trend.unwrap_or(0.0),
      direction: TrendDirection::from_change(trend),
      sparkline,
    }
  }
}

/// Trend classification used by presentation layers for color and arrow
/// selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
  Up,
  Down,
  Flat,
}

impl TrendDirection {
  /// Classify a 24h percent change. Zero, absent and non-finite values are
  /// all neutral.
  pub fn from_change(change: Option<f64>) -> Self {
    match change {
      Some(c) if c.is_finite() && c > 0.0 => TrendDirection::Up,
      Some(c) if c.is_finite() && c < 0.0 => TrendDirection::Down,
      _ => TrendDirection::Flat,
    }
  }
}

impl std::fmt::Display for TrendDirection {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      TrendDirection::Up => write!(f, "up"),
      TrendDirection::Down => write!(f, "down"),
      TrendDirection::Flat => write!(f, "flat"),
    }
  }
}

/// A successful fetch, tagged with the provider that produced it.
///
/// The tag exists for logging and diagnostics only; it is cached alongside
/// the metrics but never persisted anywhere else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResult {
  pub provider: String,
  pub metrics: Vec<CoinMetric>,
  pub fetched_at: DateTime<Utc>,
}

impl ProviderResult {
  pub fn new(provider: &str, metrics: Vec<CoinMetric>) -> Self {
    Self { provider: provider.to_string(), metrics, fetched_at: Utc::now() }
  }
}

/// A request descriptor for one logical fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MetricQuery {
  /// A single coin by its provider-agnostic id, e.g. "bitcoin".
  Coin(String),
  /// A category listing by category id, e.g. "decentralized-finance-defi".
  Category(String),
}

impl MetricQuery {
  /// Composite cache key for this request signature.
  ///
  /// The limit is part of the key so a wide listing never serves a narrow
  /// cached one.
  pub fn cache_key(&self, limit: usize) -> String {
    match self {
      MetricQuery::Coin(id) => format!("coin:{}:{}", id.to_lowercase(), limit),
      MetricQuery::Category(id) => format!("category:{}:{}", id.to_lowercase(), limit),
    }
  }

  /// The raw identifier inside the query.
  pub fn id(&self) -> &str {
    match self {
      MetricQuery::Coin(id) | MetricQuery::Category(id) => id,
    }
  }
}

impl std::fmt::Display for MetricQuery {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      MetricQuery::Coin(id) => write!(f, "coin {}", id),
      MetricQuery::Category(id) => write!(f, "category {}", id),
    }
  }
}
