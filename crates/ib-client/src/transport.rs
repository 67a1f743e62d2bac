//! HTTP transport layer for AlphaVantage API requests

use ib_core::{Config, Error, FuncType, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// Top-level keys AlphaVantage uses for error and throttling messages
const API_MESSAGE_KEYS: [&str; 3] = ["Error Message", "Note", "Information"];

/// HTTP transport layer for making requests to the AlphaVantage API
pub struct Transport {
  client: Client,
  base_url: String,
  api_key: String,
  timeout: Duration,
}

impl Transport {
  /// Create a new transport instance. Every request carries `config.timeout_secs`.
  pub fn new(config: &Config) -> Result<Self> {
    let timeout = Duration::from_secs(config.timeout_secs);
    let client = Client::builder()
      .timeout(timeout)
      .user_agent("ib-client/0.1.0")
      .build()
      .map_err(|e| Error::Http(format!("Failed to create HTTP client: {}", e)))?;

    Ok(Self {
      client,
      base_url: config.base_url.trim_end_matches('/').to_string(),
      api_key: config.api_key.clone(),
      timeout,
    })
  }

  /// Create a mock transport for testing
  #[cfg(test)]
  pub fn new_mock() -> Self {
    Self {
      client: Client::new(),
      base_url: "https://mock.alphavantage.co".to_string(),
      api_key: "test_key".to_string(),
      timeout: Duration::from_secs(30),
    }
  }

  /// GET `<base_url>/query` for a function and return the parsed body.
  ///
  /// The HTTP status is not checked; API error payloads are returned unchanged
  /// after a warning is logged.
  #[instrument(skip(self, params), fields(function = %function))]
  pub async fn get_json(&self, function: FuncType, params: Vec<(String, String)>) -> Result<Value> {
    let url = self.build_url(function, params)?;
    debug!("Making request to: {}", self.redact(&url));

    let response = self
      .client
      .get(url)
      .send()
      .await
      .map_err(|e| Error::Http(format!("Request failed: {}", e)))?;
    debug!("Response status: {}", response.status());

    let text = response
      .text()
      .await
      .map_err(|e| Error::Http(format!("Failed to read response body: {}", e)))?;
    debug!("Response body length: {} bytes", text.len());

    let value: Value = serde_json::from_str(&text).map_err(|e| {
      error!("Response text (first 500 chars): {}", &text[..floor_char_boundary(&text, 500)]);
      Error::Parse(format!("Failed to parse response for {}: {}", function, e))
    })?;

    if let Some(message) = api_message(&value) {
      warn!("AlphaVantage returned a message for {}: {}", function, message);
    } else {
      info!("Successfully fetched {}", function);
    }
    Ok(value)
  }

  /// Build the full URL for an API request
  fn build_url(&self, function: FuncType, params: Vec<(String, String)>) -> Result<Url> {
    let mut url = Url::parse(&format!("{}/query", self.base_url))
      .map_err(|e| Error::Http(format!("Invalid base URL: {}", e)))?;

    {
      let mut query_pairs = url.query_pairs_mut();
      query_pairs.append_pair("function", &function.to_string());
      for (key, value) in &params {
        query_pairs.append_pair(key, value);
      }
      query_pairs.append_pair("apikey", &self.api_key);
    }

    Ok(url)
  }

  fn redact(&self, url: &Url) -> String {
    url.as_str().replace(&self.api_key, "***")
  }

  /// Get the base URL being used
  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Get request timeout duration
  pub fn timeout(&self) -> Duration {
    self.timeout
  }
}

/// The error or throttling message of a payload, if it carries one.
pub fn api_message(value: &Value) -> Option<&str> {
  let obj = value.as_object()?;
  API_MESSAGE_KEYS.iter().find_map(|key| obj.get(*key).and_then(Value::as_str))
}

fn floor_char_boundary(text: &str, max: usize) -> usize {
  if text.len() <= max {
    return text.len();
  }
  (0..=max).rev().find(|i| text.is_char_boundary(*i)).unwrap_or(0)
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;
  use wiremock::matchers::{method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  #[test]
  fn test_build_url() {
    let transport = Transport::new_mock();
    let params = vec![("symbol".to_string(), "AAPL".to_string())];

    let url = transport.build_url(FuncType::BalanceSheet, params).unwrap().to_string();

    assert!(url.contains("function=BALANCE_SHEET"));
    assert!(url.contains("symbol=AAPL"));
    assert!(url.contains("apikey=test_key"));
    assert!(url.starts_with("https://mock.alphavantage.co/query"));
    assert!(!transport.redact(&Url::parse(&url).unwrap()).contains("test_key"));
  }

  #[test]
  fn test_api_message() {
    let note = json!({"Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute."});
    assert!(api_message(&note).unwrap().starts_with("Thank you"));

    let error = json!({"Error Message": "Invalid API call."});
    assert_eq!(api_message(&error), Some("Invalid API call."));

    assert_eq!(api_message(&json!({"Symbol": "IBM"})), None);
    assert_eq!(api_message(&json!([])), None);
  }

  #[tokio::test]
  async fn test_non_success_status_still_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/query"))
      .respond_with(ResponseTemplate::new(503).set_body_json(json!({"Information": "busy"})))
      .mount(&server)
      .await;

    let config = Config::default_with_key("k".to_string()).with_base_url(server.uri());
    let transport = Transport::new(&config).unwrap();
    let value = transport.get_json(FuncType::Overview, vec![]).await.unwrap();
    assert_eq!(value["Information"], "busy");
  }

  #[tokio::test]
  async fn test_invalid_json_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/query"))
      .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
      .mount(&server)
      .await;

    let config = Config::default_with_key("k".to_string()).with_base_url(server.uri());
    let transport = Transport::new(&config).unwrap();
    let err = transport.get_json(FuncType::Overview, vec![]).await.unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
  }

  #[test]
  fn test_floor_char_boundary() {
    assert_eq!(floor_char_boundary("abc", 500), 3);
    assert_eq!(floor_char_boundary("ééé", 3), 2);
  }
}
