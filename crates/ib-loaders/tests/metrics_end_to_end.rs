//! Company metrics computed from mocked AlphaVantage payloads

use ib_client::AlphaVantageClient;
use ib_core::test_utils::assert_some_approx;
use ib_core::Config;
use ib_loaders::{compute_financial_metrics, CacheConfig, LoaderContext, LoaderError};
use ib_models::Numeric;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn quarters(fields: &[(&str, &str)]) -> Value {
  let dates = ["2024-09-30", "2024-06-30", "2024-03-31", "2023-12-31", "2023-09-30"];
  let reports: Vec<Value> = dates
    .iter()
    .map(|date| {
      let mut report = json!({"fiscalDateEnding": date, "reportedCurrency": "USD"});
      for (field, value) in fields {
        report[*field] = json!(value);
      }
      report
    })
    .collect();
  Value::Array(reports)
}

fn income_statement() -> Value {
  let annual: Vec<Value> =
    ["121", "110", "105", "103", "101", "100"].iter().map(|v| json!({"totalRevenue": v})).collect();
  json!({
    "symbol": "CROX",
    "annualReports": annual,
    "quarterlyReports": quarters(&[
      ("totalRevenue", "250"),
      ("grossProfit", "100"),
      ("operatingIncome", "50"),
      ("netIncome", "25"),
      ("costOfRevenue", "150"),
    ]),
  })
}

fn balance_sheet() -> Value {
  json!({
    "symbol": "CROX",
    "quarterlyReports": quarters(&[
      ("currentNetReceivables", "25"),
      ("inventory", "30"),
      ("currentAccountsPayable", "15"),
      ("shortLongTermDebtTotal", "50"),
      ("totalShareholderEquity", "100"),
    ]),
  })
}

fn overview() -> Value {
  json!({
    "Symbol": "CROX",
    "Name": "Crocs Inc",
    "Beta": "1.456",
    "ReturnOnAssetsTTM": "0.081",
    "ReturnOnEquityTTM": "0.25",
    "LatestQuarter": "2024-09-30",
  })
}

async fn mount(server: &MockServer, function: &str, body: Value) {
  Mock::given(method("GET"))
    .and(path("/query"))
    .and(query_param("function", function))
    .respond_with(ResponseTemplate::new(200).set_body_json(body))
    .expect(1)
    .mount(server)
    .await;
}

fn context(server: &MockServer, dir: &TempDir) -> LoaderContext {
  let config = Config::default_with_key("test_key".to_string()).with_base_url(server.uri());
  let client = Arc::new(AlphaVantageClient::new(config).unwrap());
  LoaderContext::new(client, CacheConfig::default().with_cache_dir(dir.path()))
}

#[tokio::test]
async fn test_metrics_from_four_quarters() {
  let server = MockServer::start().await;
  let dir = TempDir::new().unwrap();
  mount(&server, "INCOME_STATEMENT", income_statement()).await;
  mount(&server, "BALANCE_SHEET", balance_sheet()).await;
  mount(&server, "CASH_FLOW", json!({"symbol": "CROX", "quarterlyReports": []})).await;
  mount(&server, "OVERVIEW", overview()).await;

  let ctx = context(&server, &dir);
  let metrics = compute_financial_metrics(&ctx, "crox").await.unwrap();

  assert_eq!(metrics.revenue, Some(Numeric::Int(1000)));
  assert_some_approx(metrics.gross_margin, 0.4);
  assert_some_approx(metrics.ebit_margin, 0.2);
  assert_some_approx(metrics.net_margin, 0.1);
  assert_eq!(metrics.receivable_days, Some(36));
  assert_eq!(metrics.inventory_days, Some(73));
  assert_eq!(metrics.payable_days, Some(36));
  assert_some_approx(metrics.debt_to_equity, 0.5);
  assert_some_approx(metrics.return_on_capital, 0.081);
  assert_some_approx(metrics.return_on_equity, 0.25);
  assert_some_approx(metrics.beta, 1.46);
  assert_some_approx(metrics.revenue_cagr_5y, 0.04);

  // Every payload is now cached; a second run makes no requests
  let again = compute_financial_metrics(&ctx, "CROX").await.unwrap();
  assert_eq!(again, metrics);
}

#[tokio::test]
async fn test_error_payloads_give_empty_metrics() {
  let server = MockServer::start().await;
  let dir = TempDir::new().unwrap();
  let limited = json!({"Information": "rate limit reached"});
  for function in ["INCOME_STATEMENT", "BALANCE_SHEET", "CASH_FLOW", "OVERVIEW"] {
    mount(&server, function, limited.clone()).await;
  }

  let metrics = compute_financial_metrics(&context(&server, &dir), "CROX").await.unwrap();
  assert!(metrics.is_empty());
}

#[tokio::test]
async fn test_missing_api_key_fails_before_any_request() {
  let err = Config::from_lookup(None, |_| None).unwrap_err();
  assert!(err.is_configuration());
  assert!(LoaderError::from(err).is_configuration());
}
