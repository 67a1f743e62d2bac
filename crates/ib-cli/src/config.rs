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

//! Command-line settings shared by the subcommands. Every flag can also come
//! from the environment (or `.env`).

use anyhow::Result;
use clap::Args;
use ib_client::AlphaVantageClient;
use ib_core::{Config as CoreConfig, DAMODARAN_DATASETS_URL};
use ib_loaders::cache::DEFAULT_CACHE_DIR;
use ib_loaders::resolver::DEFAULT_COUNTRY;
use ib_loaders::{CacheConfig, CountryScope, DatasetConfig, DatasetStore, LoaderContext};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

const SECS_PER_HOUR: u64 = 3600;

/// AlphaVantage access and response caching
#[derive(Args, Debug, Clone)]
pub struct ApiArgs {
  /// AlphaVantage API key (defaults to AV_KEY or ALPHA_VANTAGE_API_KEY)
  #[arg(long)]
  pub apikey: Option<String>,

  /// Fetch fresh data instead of reading cached responses
  #[arg(long)]
  pub no_cache: bool,

  /// Directory for cached API responses
  #[arg(long, env = "AV_CACHE_DIR", default_value = DEFAULT_CACHE_DIR)]
  pub cache_dir: PathBuf,

  /// Refetch cached responses older than this many hours
  #[arg(long)]
  pub max_age_hours: Option<u64>,
}

impl ApiArgs {
  /// Client settings; fails before any request when no key is available.
  pub fn core_config(&self) -> Result<CoreConfig> {
    Ok(CoreConfig::from_env_with_key(self.apikey.clone())?)
  }

  pub fn cache_config(&self) -> CacheConfig {
    let config = CacheConfig::default()
      .with_cache_dir(&self.cache_dir)
      .with_force_refresh(self.no_cache);
    match self.max_age_hours {
      Some(hours) => config.with_max_age_hours(hours),
      None => config,
    }
  }

  pub fn loader_context(&self) -> Result<LoaderContext> {
    let client = Arc::new(AlphaVantageClient::new(self.core_config()?)?);
    Ok(LoaderContext::new(client, self.cache_config()))
  }
}

/// Location and refresh policy of the Damodaran workbooks
#[derive(Args, Debug, Clone)]
pub struct DatasetArgs {
  /// Directory holding the dataset workbooks and indname.xlsx
  #[arg(long, env = "IB_DATA_DIR", default_value = ".")]
  pub data_dir: PathBuf,

  /// Download missing or stale workbooks
  #[arg(long, env = "IB_DOWNLOAD")]
  pub download: bool,

  /// Where workbooks are downloaded from
  #[arg(long, env = "IB_DATASETS_URL", default_value = DAMODARAN_DATASETS_URL)]
  pub datasets_url: String,

  /// Download workbooks again once older than this many hours
  #[arg(long, env = "IB_DATASETS_MAX_AGE_HOURS")]
  pub datasets_max_age_hours: Option<u64>,

  /// Countries considered when resolving tickers: a comma separated list or "All"
  #[arg(long, env = "IB_COUNTRY", default_value = DEFAULT_COUNTRY)]
  pub country: String,
}

impl DatasetArgs {
  pub fn dataset_config(&self) -> DatasetConfig {
    DatasetConfig::default()
      .with_data_dir(&self.data_dir)
      .with_datasets_url(&self.datasets_url)
      .with_download(self.download)
      .with_max_age(self.datasets_max_age_hours.map(|h| Duration::from_secs(h * SECS_PER_HOUR)))
      .with_country_scope(CountryScope::parse(&self.country))
  }

  pub fn store(&self) -> Result<DatasetStore> {
    Ok(DatasetStore::open(self.dataset_config())?)
  }
}
