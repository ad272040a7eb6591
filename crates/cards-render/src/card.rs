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

//! SVG card and badge builders.
//!
//! Layout is intentionally simple: dark panel, system font stack, one row per
//! metric. Pixel-exact fidelity is a non-goal.

use cards_models::{sparkline, CoinMetric};

use crate::{escape, trend_arrow, trend_color};

const FONT: &str = "font-family=\"'Segoe UI',Ubuntu,Helvetica,Arial,sans-serif\"";
const PANEL: &str = "fill=\"#0d1117\" stroke=\"#30363d\" rx=\"6\"";

const BADGE_WIDTH: u32 = 320;
const BADGE_HEIGHT: u32 = 80;

const CARD_WIDTH: u32 = 400;
const CARD_HEADER: u32 = 44;
const CARD_ROW: u32 = 32;

/// Compact single-coin badge: symbol, price, trend and a small sparkline.
pub fn badge(metric: &CoinMetric) -> String {
  let color = trend_color(metric.direction);
  let arrow = trend_arrow(metric.direction);
  let chart = match sparkline::svg_path(&metric.sparkline, 120.0, 36.0) {
    path if path.is_empty() => String::new(),
    path => format!(
      "<g transform=\"translate(188 22)\"><path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2\"/></g>",
      path, color
    ),
  };

  format!(
    concat!(
      "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
      "<rect width=\"{w}\" height=\"{h}\" {panel}/>",
      "<text x=\"16\" y=\"30\" {font} font-size=\"16\" font-weight=\"600\" fill=\"#c9d1d9\">{symbol}</text>",
      "<text x=\"16\" y=\"56\" {font} font-size=\"18\" fill=\"#e6edf3\">${price}</text>",
      "<text x=\"120\" y=\"56\" {font} font-size=\"13\" fill=\"{color}\">{arrow} {trend:.2}%</text>",
      "{chart}",
      "</svg>"
    ),
    w = BADGE_WIDTH,
    h = BADGE_HEIGHT,
    panel = PANEL,
    font = FONT,
    symbol = escape(&metric.symbol),
    price = escape(&metric.price),
    color = color,
    arrow = arrow,
    trend = metric.trend,
    chart = chart,
  )
}

/// List card with a title row and one row per metric.
pub fn card(title: &str, metrics: &[CoinMetric]) -> String {
  let height = CARD_HEADER + CARD_ROW * metrics.len() as u32 + 12;
  let mut body = format!(
    concat!(
      "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
      "<rect width=\"{w}\" height=\"{h}\" {panel}/>",
      "<text x=\"16\" y=\"28\" {font} font-size=\"15\" font-weight=\"600\" fill=\"#58a6ff\">{title}</text>"
    ),
    w = CARD_WIDTH,
    h = height,
    panel = PANEL,
    font = FONT,
    title = escape(title),
  );

  for (i, metric) in metrics.iter().enumerate() {
    let y = CARD_HEADER + CARD_ROW * i as u32 + 20;
    let color = trend_color(metric.direction);
    body.push_str(&format!(
      concat!(
        "<text x=\"16\" y=\"{y}\" {font} font-size=\"13\" font-weight=\"600\" fill=\"#c9d1d9\">{symbol}</text>",
        "<text x=\"90\" y=\"{y}\" {font} font-size=\"13\" fill=\"#e6edf3\">${price}</text>",
        "<text x=\"220\" y=\"{y}\" {font} font-size=\"13\" fill=\"#8b949e\">{volume}</text>",
        "<text x=\"320\" y=\"{y}\" {font} font-size=\"13\" fill=\"{color}\">{arrow} {trend:.2}%</text>"
      ),
      y = y,
      font = FONT,
      symbol = escape(&metric.symbol),
      price = escape(&metric.price),
      volume = escape(&metric.volume),
      color = color,
      arrow = trend_arrow(metric.direction),
      trend = metric.trend,
    ));
  }

  body.push_str("</svg>");
  body
}

/// Well-formed placeholder shown when every provider is exhausted.
pub fn unavailable(subject: &str) -> String {
  format!(
    concat!(
      "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
      "<rect width=\"{w}\" height=\"{h}\" {panel}/>",
      "<text x=\"16\" y=\"34\" {font} font-size=\"14\" fill=\"#8b949e\">data unavailable</text>",
      "<text x=\"16\" y=\"56\" {font} font-size=\"12\" fill=\"#484f58\">{subject}</text>",
      "</svg>"
    ),
    w = BADGE_WIDTH,
    h = BADGE_HEIGHT,
    panel = PANEL,
    font = FONT,
    subject = escape(subject),
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample_metric(sparkline: Vec<f64>) -> CoinMetric {
    CoinMetric::from_raw("btc", "Bitcoin", 65000.42, 32_450_000_000.0, Some(2.5), sparkline)
  }

  #[test]
  fn test_badge_contains_symbol_price_and_trend() {
    let svg = badge(&sample_metric(vec![1.0, 2.0, 3.0]));
    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
    assert!(svg.contains("BTC"));
    assert!(svg.contains("$65000.42"));
    assert!(svg.contains("2.50%"));
    assert!(svg.contains("<path d=\"M"));
  }

  #[test]
  fn test_badge_without_sparkline_omits_the_path() {
    let svg = badge(&sample_metric(vec![]));
    assert!(!svg.contains("<path"));
  }

  #[test]
  fn test_card_renders_one_row_per_metric() {
    let metrics = vec![sample_metric(vec![]), sample_metric(vec![])];
    let svg = card("Top Coins", &metrics);
    assert!(svg.contains("Top Coins"));
    assert_eq!(svg.matches("$65000.42").count(), 2);
  }

  #[test]
  fn test_unavailable_placeholder_is_well_formed_and_escaped() {
    let svg = unavailable("coin <bitcoin>");
    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
    assert!(svg.contains("data unavailable"));
    assert!(svg.contains("&lt;bitcoin&gt;"));
  }
}
