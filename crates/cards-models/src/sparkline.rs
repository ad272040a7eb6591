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

//! Sparkline path derivation.
//!
//! One shared routine turns an ordered price series into a smoothed SVG path,
//! so every renderer draws the same curve for the same data.

/// Default sparkline box width in SVG user units.
pub const DEFAULT_WIDTH: f64 = 140.0;

/// Default sparkline box height in SVG user units.
pub const DEFAULT_HEIGHT: f64 = 40.0;

/// Vertical padding inside the box so line caps are not clipped.
const PAD: f64 = 2.0;

/// Derive a smoothed SVG path for an ordered sample series.
///
/// Samples are spread evenly across `width` and scaled vertically into
/// `height`. Consecutive samples are joined by Catmull-Rom style cubic
/// segments whose control points average the neighboring samples. A constant
/// series yields a flat horizontal line at mid-height; fewer than two samples
/// cannot produce a line and yield an empty path.
pub fn svg_path(samples: &[f64], width: f64, height: f64) -> String {
  if samples.len() < 2 {
    return String::new();
  }

  let points = scale(samples, width, height);

  let mut path = format!("M{:.2} {:.2}", points[0].0, points[0].1);
  for i in 0..points.len() - 1 {
    let p0 = points[i.saturating_sub(1)];
    let p1 = points[i];
    let p2 = points[i + 1];
    let p3 = points[(i + 2).min(points.len() - 1)];

    // Catmull-Rom to cubic Bezier control points.
    let c1 = (p1.0 + (p2.0 - p0.0) / 6.0, p1.1 + (p2.1 - p0.1) / 6.0);
    let c2 = (p2.0 - (p3.0 - p1.0) / 6.0, p2.1 - (p3.1 - p1.1) / 6.0);

    path.push_str(&format!(
      " C{:.2} {:.2}, {:.2} {:.2}, {:.2} {:.2}",
      c1.0, c1.1, c2.0, c2.1, p2.0, p2.1
    ));
  }
  path
}

/// Map samples onto evenly spaced (x, y) points inside the box, y inverted.
fn scale(samples: &[f64], width: f64, height: f64) -> Vec<(f64, f64)> {
  let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
  let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
  let span = max - min;

  let step = width / (samples.len() - 1) as f64;
  samples
    .iter()
    .enumerate()
    .map(|(i, &v)| {
      let x = step * i as f64;
      let y = if span > 0.0 {
        // Higher price sits higher in the box, hence the inversion.
        height - PAD - (v - min) / span * (height - 2.0 * PAD)
      } else {
        height / 2.0
      };
      (x, y)
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  /// Pull all "x y" coordinate pairs out of a path string.
  fn coords(path: &str) -> Vec<(f64, f64)> {
    let cleaned = path.replace(['M', 'C', ','], " ");
    let nums: Vec<f64> = cleaned.split_whitespace().map(|t| t.parse().unwrap()).collect();
    nums.chunks(2).map(|c| (c[0], c[1])).collect()
  }

  #[test]
  fn test_fewer_than_two_samples_yields_empty_path() {
    assert_eq!(svg_path(&[], 140.0, 40.0), "");
    assert_eq!(svg_path(&[5.0], 140.0, 40.0), "");
  }

  #[test]
  fn test_constant_series_is_flat_at_mid_height() {
    let path = svg_path(&[1.0, 1.0], 100.0, 40.0);
    assert!(path.starts_with('M'));
    for (_, y) in coords(&path) {
      assert!((y - 20.0).abs() < 1e-9, "expected flat line at y=20, got y={}", y);
    }
  }

  #[test]
  fn test_endpoints_span_the_box_width() {
    let path = svg_path(&[1.0, 3.0, 2.0, 4.0], 140.0, 40.0);
    let pts = coords(&path);
    assert_eq!(pts.first().unwrap().0, 0.0);
    assert!((pts.last().unwrap().0 - 140.0).abs() < 0.01);
  }

  #[test]
  fn test_higher_sample_maps_to_smaller_y() {
    let path = svg_path(&[1.0, 2.0], 100.0, 40.0);
    let pts = coords(&path);
    let first_y = pts.first().unwrap().1;
    let last_y = pts.last().unwrap().1;
    assert!(last_y < first_y);
    // Extremes land on the padded edges.
    assert!((first_y - 38.0).abs() < 1e-9);
    assert!((last_y - 2.0).abs() < 1e-9);
  }

  #[test]
  fn test_segment_count_matches_samples() {
    let path = svg_path(&[1.0, 2.0, 3.0, 2.0, 1.0], 140.0, 40.0);
    assert_eq!(path.matches('C').count(), 4);
  }
}
