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

use crate::endpoints::{DirectRateLimiter, fundamentals::FundamentalsEndpoints};
use crate::transport::Transport;
use governor::Quota;
use ib_core::{Config, Result};
use std::num::NonZeroU32;
use std::sync::Arc;

/// AlphaVantage API client
///
/// Owns the HTTP transport and a per-minute rate limiter shared by all endpoint
/// groups handed out by the accessor methods.
///
/// # Examples
///
/// ```ignore
/// use ib_client::AlphaVantageClient;
/// use ib_core::Config;
///
/// let client = AlphaVantageClient::new(Config::from_env()?)?;
/// let income = client.fundamentals().income_statement("CROX").await?;
/// ```
pub struct AlphaVantageClient {
  rate_limiter: Arc<DirectRateLimiter>,
  transport: Arc<Transport>,
}

impl AlphaVantageClient {
  /// Create a new AlphaVantage API client
  ///
  /// # Errors
  ///
  /// Returns an error if the HTTP client cannot be created.
  pub fn new(config: Config) -> Result<Self> {
    // A zero limit falls back to the default tier
    let rate_limit_value = NonZeroU32::new(config.rate_limit)
      .or_else(|| NonZeroU32::new(ib_core::DEFAULT_RATE_LIMIT))
      .unwrap_or(NonZeroU32::MIN);
    let quota = Quota::per_minute(rate_limit_value);
    let rate_limiter = Arc::new(DirectRateLimiter::direct(quota));

    Self::with_rate_limiter(config, rate_limiter)
  }

  /// Create a new client with custom rate limiting
  pub fn with_rate_limiter(config: Config, rate_limiter: Arc<DirectRateLimiter>) -> Result<Self> {
    Ok(Self { transport: Arc::new(Transport::new(&config)?), rate_limiter })
  }

  /// Get access to the overview and financial statement endpoints
  pub fn fundamentals(&self) -> FundamentalsEndpoints {
    FundamentalsEndpoints::new(self.transport.clone(), self.rate_limiter.clone())
  }

  /// Base URL the transport sends requests to
  pub fn base_url(&self) -> &str {
    self.transport.base_url()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_client_creation() {
    let config = Config::default_with_key("test_key".to_string()).with_base_url("http://localhost:1234/");
    let client = AlphaVantageClient::new(config).unwrap();
    assert_eq!(client.base_url(), "http://localhost:1234");
  }

  #[test]
  fn test_zero_rate_limit_falls_back() {
    let mut config = Config::default_with_key("test_key".to_string());
    config.rate_limit = 0;
    assert!(AlphaVantageClient::new(config).is_ok());
  }
}
