//! # cards-render
//!
//! Thin presentation layer over the normalized metric shape.
//!
//! Everything here consumes [`cards_models::CoinMetric`] as an opaque data
//! object: prices and volumes arrive pre-formatted and the trend class is
//! read from [`cards_models::TrendDirection`], never re-derived from sign.

pub mod card;
pub mod table;

pub use card::{badge, card, unavailable};
pub use table::text_table;

use cards_models::TrendDirection;

/// Fill color for a trend class.
pub(crate) fn trend_color(direction: TrendDirection) -> &'static str {
  match direction {
    TrendDirection::Up => "#3fb950",
    TrendDirection::Down => "#f85149",
    TrendDirection::Flat => "#8b949e",
  }
}

/// Arrow glyph for a trend class.
pub(crate) fn trend_arrow(direction: TrendDirection) -> &'static str {
  match direction {
    TrendDirection::Up => "▲",
    TrendDirection::Down => "▼",
    TrendDirection::Flat => "●",
  }
}

/// Escape text interpolated into SVG markup.
pub(crate) fn escape(text: &str) -> String {
  text
    .replace('&', "&amp;")
    .replace('<', "&lt;")
    .replace('>', "&gt;")
    .replace('"', "&quot;")
}
