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

//! HTTP route handlers.
//!
//! Every image endpoint answers 200 with `image/svg+xml`, even when no
//! provider could serve the request: embedders (README badges, chat cards)
//! render whatever bytes come back, so a broken-image icon is strictly worse
//! than a placeholder. `Cache-Control` mirrors the cache TTL of the data.

use actix_web::{get, web, HttpResponse, Responder};
use serde::Deserialize;
use std::time::Duration;
use tracing::error;

use cards_core::{DEFAULT_LIMIT, TTL_BADGE_SECS, TTL_CARD_SECS};
use cards_providers::MetricService;
use cards_render::{badge, card, text_table, unavailable};

pub fn configure(cfg: &mut web::ServiceConfig) {
  cfg
    .service(health)
    .service(badge_svg)
    .service(card_svg)
    .service(category_svg)
    .service(table_text);
}

#[derive(Debug, Deserialize)]
struct CategoryParams {
  limit: Option<usize>,
}

fn svg_response(ttl_secs: u64, body: String) -> HttpResponse {
  HttpResponse::Ok()
    .content_type("image/svg+xml")
    .insert_header(("Cache-Control", format!("public, max-age={}", ttl_secs)))
    .body(body)
}

#[get("/health")]
async fn health() -> impl Responder {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Compact single-coin badge.
#[get("/badge/{coin}.svg")]
async fn badge_svg(service: web::Data<MetricService>, path: web::Path<String>) -> HttpResponse {
  let coin = path.into_inner();
  match service.coin(&coin, Duration::from_secs(TTL_BADGE_SECS)).await {
    Ok(result) => match result.metrics.first() {
      Some(metric) => svg_response(TTL_BADGE_SECS, badge(metric)),
      None => svg_response(TTL_BADGE_SECS, unavailable(&coin)),
    },
    Err(e) => {
      error!("Badge for {} degraded to placeholder: {}", coin, e);
      svg_response(TTL_BADGE_SECS, unavailable(&coin))
    }
  }
}

/// Single-coin card, titled with the coin's display name.
#[get("/card/{coin}.svg")]
async fn card_svg(service: web::Data<MetricService>, path: web::Path<String>) -> HttpResponse {
  let coin = path.into_inner();
  match service.coin(&coin, Duration::from_secs(TTL_CARD_SECS)).await {
    Ok(result) => {
      let title = result.metrics.first().map(|m| m.name.clone()).unwrap_or_else(|| coin.clone());
      svg_response(TTL_CARD_SECS, card(&title, &result.metrics))
    }
    Err(e) => {
      error!("Card for {} degraded to placeholder: {}", coin, e);
      svg_response(TTL_CARD_SECS, unavailable(&coin))
    }
  }
}

/// Category listing card, row count bounded by `?limit=`.
#[get("/category/{category}.svg")]
async fn category_svg(
  service: web::Data<MetricService>,
  path: web::Path<String>,
  params: web::Query<CategoryParams>,
) -> HttpResponse {
  let category = path.into_inner();
  let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
  match service.category(&category, limit, Duration::from_secs(TTL_CARD_SECS)).await {
    Ok(result) => svg_response(TTL_CARD_SECS, card(&category, &result.metrics)),
    Err(e) => {
      error!("Category card for {} degraded to placeholder: {}", category, e);
      svg_response(TTL_CARD_SECS, unavailable(&category))
    }
  }
}

/// Plain-text rendition of a coin row, for terminals and bots.
#[get("/table/{coin}")]
async fn table_text(service: web::Data<MetricService>, path: web::Path<String>) -> HttpResponse {
  let coin = path.into_inner();
  let body = match service.coin(&coin, Duration::from_secs(TTL_BADGE_SECS)).await {
    Ok(result) => text_table(&result.metrics),
    Err(e) => {
      error!("Table for {} degraded to stub: {}", coin, e);
      "no data\n".to_string()
    }
  };
  HttpResponse::Ok()
    .content_type("text/plain; charset=utf-8")
    .insert_header(("Cache-Control", format!("public, max-age={}", TTL_BADGE_SECS)))
    .body(body)
}
