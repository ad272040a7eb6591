//! Plain-text table formatting for chat-style consumers.

use cards_models::CoinMetric;

use crate::trend_arrow;

/// Render metrics as a fixed-width text table.
///
/// Used by the `fetch` CLI command and by bot front-ends that want the same
/// rows as the cards without any markup.
pub fn text_table(metrics: &[CoinMetric]) -> String {
  if metrics.is_empty() {
    return "no data\n".to_string();
  }

  let mut out = format!("{:<10} {:>14} {:>10} {:>10}\n", "SYMBOL", "PRICE", "VOLUME", "24H");
  for metric in metrics {
    out.push_str(&format!(
      "{:<10} {:>14} {:>10} {:>9.2}% {}\n",
      metric.symbol,
      format!("${}", metric.price),
      metric.volume,
      metric.trend,
      trend_arrow(metric.direction),
    ));
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_table_has_header_and_one_line_per_metric() {
    let metrics = vec![
      CoinMetric::from_raw("btc", "Bitcoin", 65000.42, 32_450_000_000.0, Some(2.5), vec![]),
      CoinMetric::from_raw("eth", "Ethereum", 3000.0, 12_300_000.0, Some(-1.2), vec![]),
    ];

    let table = text_table(&metrics);
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("SYMBOL"));
    assert!(lines[1].contains("BTC"));
    assert!(lines[1].contains("$65000.42"));
    assert!(lines[1].contains("$32.5B"));
    assert!(lines[2].contains("-1.20%"));
  }

  #[test]
  fn test_empty_metrics_render_a_stub() {
    assert_eq!(text_table(&[]), "no data\n");
  }
}
