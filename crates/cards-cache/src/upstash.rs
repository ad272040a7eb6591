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

//! Hosted key/value store over the Upstash REST interface.
//!
//! `GET {base}/get/{key}` and `POST {base}/set/{key}?EX={secs}` with a bearer
//! token; responses wrap the payload in a `result` field.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::store::CacheStore;
use crate::{CacheError, CacheResult};

pub struct UpstashStore {
  client: Client,
  base_url: Url,
  token: String,
}

#[derive(Debug, Deserialize)]
struct RestResponse {
  result: Option<String>,
}

impl UpstashStore {
  /// Create a store against an Upstash REST endpoint.
  pub fn new(client: Client, base_url: &str, token: &str) -> CacheResult<Self> {
    let base_url = Url::parse(base_url)
      .map_err(|e| CacheError::Unavailable(format!("Invalid Upstash URL: {}", e)))?;
    Ok(Self { client, base_url, token: token.to_string() })
  }

  fn command_url(&self, segments: &[&str]) -> CacheResult<Url> {
    let mut url = self.base_url.clone();
    {
      let mut path = url
        .path_segments_mut()
        .map_err(|_| CacheError::Unavailable("Upstash URL cannot be a base".to_string()))?;
      for segment in segments {
        path.push(segment);
      }
    }
    Ok(url)
  }
}

#[async_trait]
impl CacheStore for UpstashStore {
  async fn get(&self, key: &str) -> CacheResult<Option<String>> {
    let url = self.command_url(&["get", key])?;

    let response = self
      .client
      .get(url)
      .bearer_auth(&self.token)
      .send()
      .await
      .map_err(|e| CacheError::Unavailable(e.to_string()))?;

    if !response.status().is_success() {
      return Err(CacheError::Unavailable(format!("GET returned HTTP {}", response.status())));
    }

    let body: RestResponse =
      response.json().await.map_err(|e| CacheError::Unavailable(e.to_string()))?;

    debug!(key, hit = body.result.is_some(), "upstash get");
    Ok(body.result)
  }

  async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
    let mut url = self.command_url(&["set", key])?;
    url.query_pairs_mut().append_pair("EX", &ttl.as_secs().to_string());

    let response = self
      .client
      .post(url)
      .bearer_auth(&self.token)
      .body(value.to_string())
      .send()
      .await
      .map_err(|e| CacheError::Unavailable(e.to_string()))?;

    if !response.status().is_success() {
      return Err(CacheError::Unavailable(format!("SET returned HTTP {}", response.status())));
    }

    debug!(key, ttl_secs = ttl.as_secs(), "upstash set");
    Ok(())
  }
}
