/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
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

//! Base traits and types for data loaders

use crate::cache::{CacheConfig, FileCache};
use crate::error::{LoaderError, LoaderResult};
use crate::statements::StatementFetcher;
use async_trait::async_trait;
use ib_client::AlphaVantageClient;
use std::sync::Arc;

/// Shared context for the AlphaVantage-backed loaders
pub struct LoaderContext {
  pub client: Arc<AlphaVantageClient>,
  pub cache: FileCache,
}

impl LoaderContext {
  pub fn new(client: Arc<AlphaVantageClient>, cache_config: CacheConfig) -> Self {
    Self { client, cache: FileCache::new(cache_config) }
  }

  /// Cache-aware access to the fundamentals endpoints
  pub fn fetcher(&self) -> StatementFetcher<'_> {
    StatementFetcher::new(&self.client, &self.cache)
  }
}

/// Base trait for all data loaders
#[async_trait]
pub trait DataLoader: Send + Sync {
  /// The type of data this loader processes
  type Input;

  /// The result type after loading
  type Output;

  /// Load data from the given input
  async fn load(&self, context: &LoaderContext, input: Self::Input) -> LoaderResult<Self::Output>;

  /// Validate input before loading
  async fn validate_input(&self, _input: &Self::Input) -> LoaderResult<()> {
    Ok(())
  }

  /// Get loader name for logging/tracking
  fn name(&self) -> &'static str;
}

/// Upper-case a ticker and reject values that cannot name a cache file.
pub fn normalize_ticker(ticker: &str) -> LoaderResult<String> {
  let symbol = ticker.trim().to_uppercase();
  if symbol.is_empty() {
    return Err(LoaderError::InvalidData("ticker is empty".to_string()));
  }
  if symbol.contains(['/', '\\']) || symbol.contains("..") || symbol.chars().any(char::is_whitespace) {
    return Err(LoaderError::InvalidData(format!("invalid ticker '{}'", ticker.trim())));
  }
  Ok(symbol)
}

#[cfg(test)]
mod tests {
  use super::*;
  use ib_core::Config;

  #[test]
  fn test_loader_context_new() {
    let client = Arc::new(AlphaVantageClient::new(Config::default_with_key("test_key".to_string())).unwrap());
    let context = LoaderContext::new(client, CacheConfig::default().with_force_refresh(true));
    assert!(!context.cache.is_read_enabled());
    assert!(context.cache.is_write_enabled());
  }

  #[test]
  fn test_normalize_ticker() {
    assert_eq!(normalize_ticker(" crox ").unwrap(), "CROX");
    assert_eq!(normalize_ticker("brk.b").unwrap(), "BRK.B");
    assert!(normalize_ticker("  ").is_err());
    assert!(normalize_ticker("../etc").is_err());
    assert!(normalize_ticker("A B").is_err());
  }
}
