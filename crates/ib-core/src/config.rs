//! Configuration management for the AlphaVantage client

use crate::error::{Error, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use url::Url;

/// Environment variables searched, in order, for the API key
pub const API_KEY_VARS: [&str; 2] = ["AV_KEY", "ALPHA_VANTAGE_API_KEY"];

/// Main configuration struct for AlphaVantage client
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
  /// AlphaVantage API key
  pub api_key: String,

  /// API rate limit (requests per minute)
  pub rate_limit: u32,

  /// Request timeout in seconds
  pub timeout_secs: u64,

  /// Base URL for AlphaVantage API
  pub base_url: String,
}

impl Config {
  /// Load configuration from environment variables
  pub fn from_env() -> Result<Self> {
    dotenv().ok();
    Self::from_lookup(None, |name| env::var(name).ok())
  }

  /// Load configuration from the environment, preferring an explicitly supplied key.
  ///
  /// A missing key fails here, before any network I/O is attempted.
  pub fn from_env_with_key(api_key: Option<String>) -> Result<Self> {
    dotenv().ok();
    Self::from_lookup(api_key, |name| env::var(name).ok())
  }

  /// Build a configuration from an arbitrary variable source.
  pub fn from_lookup<F>(api_key: Option<String>, lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let api_key = api_key
      .filter(|k| !k.trim().is_empty())
      .or_else(|| API_KEY_VARS.iter().find_map(|name| lookup(*name).filter(|k| !k.trim().is_empty())))
      .ok_or_else(|| {
        Error::ApiKey("AlphaVantage API key not provided and AV_KEY not set in environment".to_string())
      })?;

    let rate_limit = lookup("AV_RATE_LIMIT")
      .unwrap_or_else(|| crate::DEFAULT_RATE_LIMIT.to_string())
      .parse()
      .map_err(|_| Error::Config("Invalid AV_RATE_LIMIT".to_string()))?;

    let timeout_secs = lookup("AV_TIMEOUT_SECS")
      .unwrap_or_else(|| crate::DEFAULT_TIMEOUT_SECS.to_string())
      .parse()
      .map_err(|_| Error::Config("Invalid AV_TIMEOUT_SECS".to_string()))?;

    let base_url = lookup("AV_BASE_URL").unwrap_or_else(|| crate::ALPHA_VANTAGE_BASE_URL.to_string());
    Url::parse(&base_url).map_err(|e| Error::Config(format!("Invalid AV_BASE_URL: {}", e)))?;

    Ok(Config { api_key, rate_limit, timeout_secs, base_url })
  }

  /// Create a config with default values (for testing)
  pub fn default_with_key(api_key: String) -> Self {
    Config {
      api_key,
      rate_limit: crate::DEFAULT_RATE_LIMIT,
      timeout_secs: crate::DEFAULT_TIMEOUT_SECS,
      base_url: crate::ALPHA_VANTAGE_BASE_URL.to_string(),
    }
  }

  /// Builder: replace the API key
  pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
    self.api_key = api_key.into();
    self
  }

  /// Builder: point the client at another host (mock servers, proxies)
  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into();
    self
  }

  /// Builder: set the request timeout
  pub fn with_timeout_secs(mut self, secs: u64) -> Self {
    self.timeout_secs = secs;
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> =
      vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |name: &str| map.get(name).cloned()
  }

  #[test]
  fn test_config_from_lookup_defaults() {
    let config = Config::from_lookup(None, lookup_from(&[("AV_KEY", "test_key")])).unwrap();
    assert_eq!(config.api_key, "test_key");
    assert_eq!(config.rate_limit, 75);
    assert_eq!(config.timeout_secs, 30);
    assert_eq!(config.base_url, crate::ALPHA_VANTAGE_BASE_URL);
  }

  #[test]
  fn test_explicit_key_wins() {
    let config =
      Config::from_lookup(Some("explicit".to_string()), lookup_from(&[("AV_KEY", "env")])).unwrap();
    assert_eq!(config.api_key, "explicit");
  }

  #[test]
  fn test_fallback_key_variable() {
    let config =
      Config::from_lookup(None, lookup_from(&[("ALPHA_VANTAGE_API_KEY", "legacy")])).unwrap();
    assert_eq!(config.api_key, "legacy");
  }

  #[test]
  fn test_blank_primary_key_falls_back() {
    let config = Config::from_lookup(
      None,
      lookup_from(&[("AV_KEY", "   "), ("ALPHA_VANTAGE_API_KEY", "legacy")]),
    )
    .unwrap();
    assert_eq!(config.api_key, "legacy");
  }

  #[test]
  fn test_missing_key_is_configuration_error() {
    let err = Config::from_lookup(None, lookup_from(&[])).unwrap_err();
    assert!(matches!(err, Error::ApiKey(_)));
    assert!(err.is_configuration());

    let err = Config::from_lookup(Some("  ".to_string()), lookup_from(&[])).unwrap_err();
    assert!(matches!(err, Error::ApiKey(_)));
  }

  #[test]
  fn test_invalid_numeric_settings() {
    let err =
      Config::from_lookup(None, lookup_from(&[("AV_KEY", "k"), ("AV_TIMEOUT_SECS", "soon")]))
        .unwrap_err();
    assert!(matches!(err, Error::Config(_)));

    let err = Config::from_lookup(None, lookup_from(&[("AV_KEY", "k"), ("AV_BASE_URL", "not a url")]))
      .unwrap_err();
    assert!(matches!(err, Error::Config(_)));
  }

  #[test]
  fn test_builders() {
    let config = Config::default_with_key("k".to_string())
      .with_base_url("http://127.0.0.1:9999")
      .with_timeout_secs(5);
    assert_eq!(config.base_url, "http://127.0.0.1:9999");
    assert_eq!(config.timeout_secs, 5);
  }
}
