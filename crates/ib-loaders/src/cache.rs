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

//! File cache for AlphaVantage payloads.
//!
//! One JSON file per `(symbol, data type)` pair, `<dir>/<SYMBOL>_<type>.json`.
//! Files hold a [`CacheEntry`] envelope with the fetch time; files written by
//! older tools hold only the raw payload and are dated by their modification
//! time.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ib_loaders::cache::{CacheConfig, FileCache};
//!
//! let cache = FileCache::new(CacheConfig::default().with_max_age_hours(24));
//! if let Some(data) = cache.get("CROX", FuncType::Overview).await.into_option() {
//!     // no network call needed
//! }
//! cache.set("CROX", FuncType::Overview, &payload).await;
//! ```

use chrono::{DateTime, Utc};
use ib_core::FuncType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{LoaderError, LoaderResult};

/// Default cache directory, relative to the working directory
pub const DEFAULT_CACHE_DIR: &str = "./av_cache";

/// How old a cached artefact may be before it is fetched again.
///
/// Shared by the API cache and the spreadsheet dataset store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Staleness {
  /// `None` trusts an artefact forever
  pub max_age: Option<Duration>,
}

impl Staleness {
  pub fn forever() -> Self {
    Self { max_age: None }
  }

  pub fn max_age(age: Duration) -> Self {
    Self { max_age: Some(age) }
  }

  pub fn is_stale(&self, fetched_at: DateTime<Utc>) -> bool {
    self.is_stale_at(fetched_at, Utc::now())
  }

  pub fn is_stale_at(&self, fetched_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    let Some(max_age) = self.max_age else {
      return false;
    };
    match chrono::Duration::from_std(max_age) {
      Ok(max_age) => now - fetched_at > max_age,
      // Out of chrono's range, effectively forever
      Err(_) => false,
    }
  }
}

/// Cache configuration for the fundamentals loaders.
#[derive(Debug, Clone)]
pub struct CacheConfig {
  /// Enable caching
  pub enable_cache: bool,
  /// Force refresh (bypass cache reads, but still write)
  pub force_refresh: bool,
  /// Directory holding the cache files, created on demand
  pub cache_dir: PathBuf,
  /// Entries older than this are treated as a miss; `None` trusts entries forever
  pub max_age: Option<Duration>,
}

impl Default for CacheConfig {
  fn default() -> Self {
    Self {
      enable_cache: true,
      force_refresh: false,
      cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
      max_age: None,
    }
  }
}

impl CacheConfig {
  /// Builder: set enable_cache
  pub fn with_enabled(mut self, enabled: bool) -> Self {
    self.enable_cache = enabled;
    self
  }

  /// Builder: set force_refresh
  pub fn with_force_refresh(mut self, force: bool) -> Self {
    self.force_refresh = force;
    self
  }

  /// Builder: set cache_dir
  pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.cache_dir = dir.into();
    self
  }

  /// Builder: set max_age
  pub fn with_max_age(mut self, max_age: Option<Duration>) -> Self {
    self.max_age = max_age;
    self
  }

  /// Builder: set max_age in hours
  pub fn with_max_age_hours(self, hours: u64) -> Self {
    self.with_max_age(Some(Duration::from_secs(hours * 3600)))
  }

  pub fn staleness(&self) -> Staleness {
    Staleness { max_age: self.max_age }
  }
}

/// On-disk envelope of a cached payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
  pub fetched_at: DateTime<Utc>,
  pub data: Value,
}

impl CacheEntry {
  pub fn new(data: Value) -> Self {
    Self { fetched_at: Utc::now(), data }
  }

  /// Read an envelope, or wrap a legacy raw payload dated `fallback_time`.
  pub fn from_file_value(value: Value, fallback_time: DateTime<Utc>) -> Self {
    if let Value::Object(map) = &value {
      if map.len() == 2 && map.contains_key("data") {
        if let Some(fetched_at) = map
          .get("fetched_at")
          .and_then(Value::as_str)
          .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        {
          let data = map.get("data").cloned().unwrap_or(Value::Null);
          return Self { fetched_at: fetched_at.with_timezone(&Utc), data };
        }
      }
    }
    Self { fetched_at: fallback_time, data: value }
  }
}

/// Result of a cache get operation
#[derive(Debug)]
pub enum CacheResult<T> {
  /// Cache hit with data
  Hit(T),
  /// No cache file
  Miss,
  /// Cache file older than the configured max age
  Stale(DateTime<Utc>),
  /// Cache disabled or force refresh
  Skipped,
  /// Cache error (logged, treated as miss)
  Error(String),
}

impl<T> CacheResult<T> {
  /// Returns true if this is a cache hit
  pub fn is_hit(&self) -> bool {
    matches!(self, CacheResult::Hit(_))
  }

  /// Returns true if cache was actually checked (not skipped)
  pub fn was_checked(&self) -> bool {
    !matches!(self, CacheResult::Skipped)
  }

  /// Convert to Option, returning None for non-hits
  pub fn into_option(self) -> Option<T> {
    match self {
      CacheResult::Hit(data) => Some(data),
      _ => None,
    }
  }
}

/// File-backed cache keyed by symbol and API function.
#[derive(Debug, Clone)]
pub struct FileCache {
  config: CacheConfig,
}

impl FileCache {
  pub fn new(config: CacheConfig) -> Self {
    Self { config }
  }

  /// Get the cache configuration
  pub fn config(&self) -> &CacheConfig {
    &self.config
  }

  /// Check if caching is effectively enabled (enabled and not force refresh for reads)
  pub fn is_read_enabled(&self) -> bool {
    self.config.enable_cache && !self.config.force_refresh
  }

  /// Check if caching is enabled for writes
  pub fn is_write_enabled(&self) -> bool {
    self.config.enable_cache
  }

  /// `<dir>/<SYMBOL>_<type>.json`
  pub fn path_for(&self, symbol: &str, function: FuncType) -> PathBuf {
    self
      .config
      .cache_dir
      .join(format!("{}_{}.json", symbol.trim().to_uppercase(), function.cache_name()))
  }

  /// Look up a payload, honouring the enable, force-refresh and max-age settings.
  pub async fn get(&self, symbol: &str, function: FuncType) -> CacheResult<Value> {
    if !self.is_read_enabled() {
      return CacheResult::Skipped;
    }

    let path = self.path_for(symbol, function);
    match read_entry(&path).await {
      Ok(Some(entry)) => {
        if self.config.staleness().is_stale(entry.fetched_at) {
          debug!("Cache entry {} is stale (fetched {})", path.display(), entry.fetched_at);
          CacheResult::Stale(entry.fetched_at)
        } else {
          info!("Cache hit for {} {}", symbol, function);
          CacheResult::Hit(entry.data)
        }
      }
      Ok(None) => {
        debug!("Cache miss for {} {}", symbol, function);
        CacheResult::Miss
      }
      Err(e) => {
        warn!("Cache read error for {}: {}", path.display(), e);
        CacheResult::Error(e.to_string())
      }
    }
  }

  /// Read a payload regardless of age. Used to prefer a cached statement over a new fetch.
  pub async fn peek(&self, symbol: &str, function: FuncType) -> Option<Value> {
    if !self.is_read_enabled() {
      return None;
    }
    read_entry(&self.path_for(symbol, function)).await.ok().flatten().map(|entry| entry.data)
  }

  /// Store a payload. Failures are logged and reported as `false`, never raised.
  pub async fn set(&self, symbol: &str, function: FuncType, data: &Value) -> bool {
    if !self.is_write_enabled() {
      return false;
    }

    let path = self.path_for(symbol, function);
    match write_entry(&path, &CacheEntry::new(data.clone())).await {
      Ok(()) => {
        debug!("Cached {} {} at {}", symbol, function, path.display());
        true
      }
      Err(e) => {
        warn!("Failed to cache {}: {}", path.display(), e);
        false
      }
    }
  }
}

/// Read a cache file. `Ok(None)` when the file does not exist.
pub async fn read_entry(path: &Path) -> LoaderResult<Option<CacheEntry>> {
  let bytes = match tokio::fs::read(path).await {
    Ok(bytes) => bytes,
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
    Err(e) => return Err(e.into()),
  };
  let value: Value = serde_json::from_slice(&bytes)?;
  let modified = modified_time(path).await?;
  Ok(Some(CacheEntry::from_file_value(value, modified)))
}

/// Write an envelope with 2-space indentation, creating the directory on demand.
pub async fn write_entry(path: &Path, entry: &CacheEntry) -> LoaderResult<()> {
  if let Some(parent) = path.parent() {
    tokio::fs::create_dir_all(parent).await?;
  }
  let text = serde_json::to_string_pretty(entry)?;
  tokio::fs::write(path, text).await?;
  Ok(())
}

/// Modification time of a file, as UTC
pub async fn modified_time(path: &Path) -> LoaderResult<DateTime<Utc>> {
  let metadata = tokio::fs::metadata(path).await?;
  let modified = metadata
    .modified()
    .map_err(|e| LoaderError::IoError(format!("{}: {}", path.display(), e)))?;
  Ok(DateTime::<Utc>::from(modified))
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;
  use tempfile::TempDir;

  fn cache_in(dir: &TempDir) -> FileCache {
    FileCache::new(CacheConfig::default().with_cache_dir(dir.path()))
  }

  #[test]
  fn test_cache_config_defaults() {
    let config = CacheConfig::default();
    assert!(config.enable_cache);
    assert!(!config.force_refresh);
    assert_eq!(config.cache_dir, PathBuf::from("./av_cache"));
    assert_eq!(config.max_age, None);
  }

  #[test]
  fn test_cache_read_write_enabled() {
    let cache = FileCache::new(CacheConfig::default());
    assert!(cache.is_read_enabled());

    let disabled = FileCache::new(CacheConfig::default().with_enabled(false));
    assert!(!disabled.is_read_enabled());
    assert!(!disabled.is_write_enabled());

    let force = FileCache::new(CacheConfig::default().with_force_refresh(true));
    assert!(!force.is_read_enabled());
    assert!(force.is_write_enabled());
  }

  #[test]
  fn test_path_for() {
    let cache = FileCache::new(CacheConfig::default().with_cache_dir("/tmp/c"));
    assert_eq!(
      cache.path_for("crox", FuncType::IncomeStatement),
      PathBuf::from("/tmp/c/CROX_income_statement.json")
    );
  }

  #[test]
  fn test_staleness() {
    let now = Utc::now();
    let day_old = now - chrono::Duration::hours(25);
    assert!(!Staleness::forever().is_stale_at(day_old, now));
    assert!(Staleness::max_age(Duration::from_secs(24 * 3600)).is_stale_at(day_old, now));
    assert!(!Staleness::max_age(Duration::from_secs(48 * 3600)).is_stale_at(day_old, now));
  }

  #[test]
  fn test_entry_from_legacy_payload() {
    let fallback = Utc::now();
    let legacy = json!({"Symbol": "IBM", "data": 1});
    let entry = CacheEntry::from_file_value(legacy.clone(), fallback);
    assert_eq!(entry.data, legacy);
    assert_eq!(entry.fetched_at, fallback);
  }

  #[tokio::test]
  async fn test_set_then_get_round_trip() {
    let dir = TempDir::new().unwrap();
    let cache = cache_in(&dir);
    let payload = json!({"Symbol": "CROX", "Beta": "2.01"});

    assert!(matches!(cache.get("CROX", FuncType::Overview).await, CacheResult::Miss));
    assert!(cache.set("crox", FuncType::Overview, &payload).await);

    let text = std::fs::read_to_string(dir.path().join("CROX_overview.json")).unwrap();
    assert!(text.contains("\n  \"data\""));

    let hit = cache.get("CROX", FuncType::Overview).await;
    assert_eq!(hit.into_option(), Some(payload));
  }

  #[tokio::test]
  async fn test_legacy_file_is_read() {
    let dir = TempDir::new().unwrap();
    let payload = json!({"symbol": "IBM", "annualReports": []});
    std::fs::write(dir.path().join("IBM_income_statement.json"), payload.to_string()).unwrap();

    let cache = cache_in(&dir);
    let hit = cache.get("IBM", FuncType::IncomeStatement).await;
    assert_eq!(hit.into_option(), Some(payload));
  }

  #[tokio::test]
  async fn test_stale_entry_is_not_a_hit() {
    let dir = TempDir::new().unwrap();
    let cache = FileCache::new(
      CacheConfig::default().with_cache_dir(dir.path()).with_max_age_hours(1),
    );
    let entry = CacheEntry { fetched_at: Utc::now() - chrono::Duration::hours(2), data: json!({}) };
    write_entry(&cache.path_for("IBM", FuncType::Overview), &entry).await.unwrap();

    assert!(matches!(cache.get("IBM", FuncType::Overview).await, CacheResult::Stale(_)));
    assert_eq!(cache.peek("IBM", FuncType::Overview).await, Some(json!({})));
  }

  #[tokio::test]
  async fn test_force_refresh_skips_reads() {
    let dir = TempDir::new().unwrap();
    let cache = FileCache::new(
      CacheConfig::default().with_cache_dir(dir.path()).with_force_refresh(true),
    );
    assert!(cache.set("IBM", FuncType::CashFlow, &json!({"a": 1})).await);
    let result = cache.get("IBM", FuncType::CashFlow).await;
    assert!(!result.was_checked());
  }

  #[tokio::test]
  async fn test_corrupt_file_is_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("IBM_overview.json"), "{not json").unwrap();
    let cache = cache_in(&dir);
    assert!(matches!(cache.get("IBM", FuncType::Overview).await, CacheResult::Error(_)));
  }

  #[tokio::test]
  async fn test_write_failure_is_swallowed() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not_a_dir");
    std::fs::write(&blocker, "file").unwrap();
    let cache = FileCache::new(CacheConfig::default().with_cache_dir(&blocker));
    assert!(!cache.set("IBM", FuncType::Overview, &json!({})).await);
  }
}
