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

//! # cards-cache
//!
//! TTL cache layer shielding upstream providers from repeated requests.
//!
//! Caching here is an optimization, never a dependency for correctness: when
//! the backing store is unreachable the layer degrades to a pure pass-through
//! and the caller's fetch still runs.

pub mod cache;
pub mod memory;
pub mod store;
pub mod upstash;

pub use cache::CardCache;
pub use memory::MemoryStore;
pub use store::CacheStore;
pub use upstash::UpstashStore;

use thiserror::Error;

/// Errors from the cache layer. These are logged at the point of occurrence
/// and never surfaced to request handlers.
#[derive(Error, Debug)]
pub enum CacheError {
  #[error("Cache store unavailable: {0}")]
  Unavailable(String),

  #[error("Cache serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type CacheResult<T> = Result<T, CacheError>;
