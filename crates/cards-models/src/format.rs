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

//! Shared price and volume formatting.
//!
//! Applied identically regardless of source provider so downstream rendering
//! stays visually consistent.

/// Format a USD price.
///
/// Prices below one cent keep 8 fractional digits so sub-cent tokens stay
/// legible; everything else gets the usual 2. Exactly zero is not sub-cent.
pub fn format_price(price: f64) -> String {
  let price = if price.is_finite() && price > 0.0 { price } else { 0.0 };
  if price > 0.0 && price < 0.01 {
    format!("{:.8}", price)
  } else {
    format!("{:.2}", price)
  }
}

/// Format a 24h traded volume with the largest applicable suffix.
///
/// `>= 1e9 -> B`, `>= 1e6 -> M`, `>= 1e3 -> K`, else the bare integer. The
/// mantissa carries one decimal place, e.g. `32_450_000_000 -> "$32.5B"`.
pub fn format_volume(volume: f64) -> String {
  let volume = if volume.is_finite() && volume > 0.0 { volume } else { 0.0 };
  if volume >= 1e9 {
    format!("${:.1}B", volume / 1e9)
  } else if volume >= 1e6 {
    format!("${:.1}M", volume / 1e6)
  } else if volume >= 1e3 {
    format!("${:.1}K", volume / 1e3)
  } else {
    format!("${:.0}", volume)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_price_two_decimals_at_or_above_one_cent() {
    assert_eq!(format_price(65000.42), "65000.42");
    assert_eq!(format_price(0.01), "0.01");
    assert_eq!(format_price(1.005), "1.00"); // banker-ish f64 rounding, still 2 digits
  }

  #[test]
  fn test_price_eight_decimals_below_one_cent() {
    assert_eq!(format_price(0.0000032), "0.00000320");
    assert_eq!(format_price(0.00999999), "0.00999999");
    assert_eq!(format_price(0.009), "0.00900000");
  }

  #[test]
  fn test_price_zero_and_invalid_inputs() {
    assert_eq!(format_price(0.0), "0.00");
    assert_eq!(format_price(-5.0), "0.00");
    assert_eq!(format_price(f64::NAN), "0.00");
  }

  #[test]
  fn test_volume_suffix_ladder() {
    assert_eq!(format_volume(32_450_000_000.0), "$32.5B");
    assert_eq!(format_volume(12_300_000.0), "$12.3M");
    assert_eq!(format_volume(4_500.0), "$4.5K");
    assert_eq!(format_volume(950.0), "$950");
  }

  #[test]
  fn test_volume_suffix_boundaries() {
    // Largest applicable suffix wins and the mantissa stays in [1, 1000).
    assert_eq!(format_volume(1e9), "$1.0B");
    assert_eq!(format_volume(999_000_000.0), "$999.0M");
    assert_eq!(format_volume(1e6), "$1.0M");
    assert_eq!(format_volume(1e3), "$1.0K");
    assert_eq!(format_volume(999.0), "$999");
  }

  #[test]
  fn test_volume_zero_and_negative() {
    assert_eq!(format_volume(0.0), "$0");
    assert_eq!(format_volume(-100.0), "$0");
  }
}
