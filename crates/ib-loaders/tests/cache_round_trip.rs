//! File cache behaviour against a mock AlphaVantage server

use ib_core::{Config, FuncType};
use ib_client::AlphaVantageClient;
use ib_loaders::{CacheConfig, LoaderContext};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn context(server: &MockServer, cache: CacheConfig) -> LoaderContext {
  let config = Config::default_with_key("test_key".to_string()).with_base_url(server.uri());
  let client = Arc::new(AlphaVantageClient::new(config).unwrap());
  LoaderContext::new(client, cache)
}

async fn mount_balance_sheet(server: &MockServer, times: u64) {
  Mock::given(method("GET"))
    .and(path("/query"))
    .and(query_param("function", "BALANCE_SHEET"))
    .and(query_param("symbol", "CROX"))
    .and(query_param("apikey", "test_key"))
    .respond_with(ResponseTemplate::new(200).set_body_json(balance_sheet()))
    .expect(times)
    .mount(server)
    .await;
}

fn balance_sheet() -> Value {
  json!({
    "symbol": "CROX",
    "quarterlyReports": [{"fiscalDateEnding": "2024-09-30", "inventory": "385000000"}]
  })
}

#[tokio::test]
async fn test_second_context_reads_persisted_envelope() {
  let server = MockServer::start().await;
  let dir = TempDir::new().unwrap();
  mount_balance_sheet(&server, 1).await;

  let cache = CacheConfig::default().with_cache_dir(dir.path());
  let first = context(&server, cache.clone()).fetcher().fetch("crox", FuncType::BalanceSheet).await.unwrap();
  let second = context(&server, cache).fetcher().fetch("CROX", FuncType::BalanceSheet).await.unwrap();
  assert_eq!(first, second);

  let text = std::fs::read_to_string(dir.path().join("CROX_balance_sheet.json")).unwrap();
  assert!(text.contains("\n  \"data\""));
  let stored: Value = serde_json::from_str(&text).unwrap();
  assert_eq!(stored["data"], balance_sheet());
  assert!(stored["fetched_at"].is_string());
}

#[tokio::test]
async fn test_legacy_raw_file_is_served() {
  let server = MockServer::start().await;
  let dir = TempDir::new().unwrap();
  mount_balance_sheet(&server, 0).await;

  let raw = json!({"symbol": "CROX", "quarterlyReports": []});
  std::fs::write(dir.path().join("CROX_balance_sheet.json"), serde_json::to_string_pretty(&raw).unwrap())
    .unwrap();

  let cache = CacheConfig::default().with_cache_dir(dir.path());
  let data = context(&server, cache).fetcher().fetch("CROX", FuncType::BalanceSheet).await.unwrap();
  assert_eq!(data, raw);
}

#[tokio::test]
async fn test_stale_entry_is_refetched_and_rewritten() {
  let server = MockServer::start().await;
  let dir = TempDir::new().unwrap();
  mount_balance_sheet(&server, 1).await;

  let old = json!({"fetched_at": "2000-01-01T00:00:00Z", "data": {"symbol": "CROX", "quarterlyReports": []}});
  let file = dir.path().join("CROX_balance_sheet.json");
  std::fs::write(&file, serde_json::to_string_pretty(&old).unwrap()).unwrap();

  let cache = CacheConfig::default()
    .with_cache_dir(dir.path())
    .with_max_age(Some(Duration::from_secs(3600)));
  let data = context(&server, cache).fetcher().fetch("CROX", FuncType::BalanceSheet).await.unwrap();
  assert_eq!(data, balance_sheet());

  let stored: Value = serde_json::from_str(&std::fs::read_to_string(&file).unwrap()).unwrap();
  assert_ne!(stored["fetched_at"], json!("2000-01-01T00:00:00Z"));
}

#[tokio::test]
async fn test_untimed_cache_trusts_old_entries() {
  let server = MockServer::start().await;
  let dir = TempDir::new().unwrap();
  mount_balance_sheet(&server, 0).await;

  let old = json!({"fetched_at": "2000-01-01T00:00:00Z", "data": {"symbol": "CROX"}});
  std::fs::write(dir.path().join("CROX_balance_sheet.json"), old.to_string()).unwrap();

  let cache = CacheConfig::default().with_cache_dir(dir.path());
  let data = context(&server, cache).fetcher().fetch("CROX", FuncType::BalanceSheet).await.unwrap();
  assert_eq!(data, json!({"symbol": "CROX"}));
}

#[tokio::test]
async fn test_force_refresh_fetches_but_still_writes() {
  let server = MockServer::start().await;
  let dir = TempDir::new().unwrap();
  mount_balance_sheet(&server, 2).await;

  let cache = CacheConfig::default().with_cache_dir(dir.path()).with_force_refresh(true);
  let ctx = context(&server, cache);
  ctx.fetcher().fetch("CROX", FuncType::BalanceSheet).await.unwrap();
  ctx.fetcher().fetch("CROX", FuncType::BalanceSheet).await.unwrap();
  assert!(dir.path().join("CROX_balance_sheet.json").exists());
}

#[tokio::test]
async fn test_disabled_cache_never_touches_disk() {
  let server = MockServer::start().await;
  let dir = TempDir::new().unwrap();
  mount_balance_sheet(&server, 2).await;

  let cache = CacheConfig::default().with_cache_dir(dir.path()).with_enabled(false);
  let ctx = context(&server, cache);
  ctx.fetcher().fetch("CROX", FuncType::BalanceSheet).await.unwrap();
  ctx.fetcher().fetch("CROX", FuncType::BalanceSheet).await.unwrap();
  assert!(!dir.path().join("CROX_balance_sheet.json").exists());
}

#[tokio::test]
async fn test_error_payload_is_cached_as_is() {
  let server = MockServer::start().await;
  let dir = TempDir::new().unwrap();
  let note = json!({"Note": "Thank you for using Alpha Vantage! Our standard API rate limit is 25 requests per day."});
  Mock::given(method("GET"))
    .and(path("/query"))
    .respond_with(ResponseTemplate::new(200).set_body_json(note.clone()))
    .expect(1)
    .mount(&server)
    .await;

  let cache = CacheConfig::default().with_cache_dir(dir.path());
  let ctx = context(&server, cache);
  assert_eq!(ctx.fetcher().fetch("CROX", FuncType::CashFlow).await.unwrap(), note);
  assert_eq!(ctx.fetcher().fetch("CROX", FuncType::CashFlow).await.unwrap(), note);
}

#[tokio::test]
async fn test_unwritable_cache_dir_is_not_fatal() {
  let server = MockServer::start().await;
  let dir = TempDir::new().unwrap();
  mount_balance_sheet(&server, 1).await;

  let blocker = dir.path().join("not_a_dir");
  std::fs::write(&blocker, b"file").unwrap();
  let cache = CacheConfig::default().with_cache_dir(blocker.join("cache"));
  let data = context(&server, cache).fetcher().fetch("CROX", FuncType::BalanceSheet).await.unwrap();
  assert_eq!(data, balance_sheet());
}
