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

//! Local store of Damodaran dataset workbooks.
//!
//! Datasets live in a data directory as `<id>.xls` (or `.xlsx`). When downloads
//! are enabled a missing or stale file is fetched from the datasets site first,
//! using the same [`Staleness`] rule as the API cache.

use crate::cache::{modified_time, Staleness};
use crate::error::{LoaderError, LoaderResult};
use crate::resolver::{CompanyDirectory, CountryScope, COMPANY_SHEET, COMPANY_WORKBOOK};
use crate::spreadsheet::{load_table, DatasetSpecs, Grid, Table, SPECIFICS_WORKBOOK};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Timeout for dataset downloads
const DOWNLOAD_TIMEOUT_SECS: u64 = 60;

/// Where datasets are read from and how they are refreshed.
#[derive(Debug, Clone)]
pub struct DatasetConfig {
  /// Directory holding the workbooks
  pub data_dir: PathBuf,
  /// Base URL of the datasets site
  pub datasets_url: String,
  /// Fetch missing or stale workbooks
  pub download: bool,
  /// Age after which a local workbook is fetched again; `None` keeps it forever
  pub max_age: Option<Duration>,
  /// Countries considered by ticker lookups
  pub country_scope: CountryScope,
}

impl Default for DatasetConfig {
  fn default() -> Self {
    Self {
      data_dir: PathBuf::from("."),
      datasets_url: ib_core::DAMODARAN_DATASETS_URL.to_string(),
      download: false,
      max_age: None,
      country_scope: CountryScope::default(),
    }
  }
}

impl DatasetConfig {
  pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.data_dir = dir.into();
    self
  }

  pub fn with_datasets_url(mut self, url: impl Into<String>) -> Self {
    self.datasets_url = url.into();
    self
  }

  pub fn with_download(mut self, download: bool) -> Self {
    self.download = download;
    self
  }

  pub fn with_max_age(mut self, max_age: Option<Duration>) -> Self {
    self.max_age = max_age;
    self
  }

  pub fn with_country_scope(mut self, scope: CountryScope) -> Self {
    self.country_scope = scope;
    self
  }

  pub fn staleness(&self) -> Staleness {
    Staleness { max_age: self.max_age }
  }
}

/// Source of dataset tables for the industry aggregator
#[async_trait]
pub trait TableSource: Send + Sync {
  async fn table(&self, dataset: &str) -> LoaderResult<Table>;
}

pub struct DatasetStore {
  config: DatasetConfig,
  specs: DatasetSpecs,
}

impl DatasetStore {
  /// Open a store, reading dataset layouts from `adamodar_specifics.xlsx` in the
  /// data directory when present and the built-in table otherwise.
  pub fn open(config: DatasetConfig) -> LoaderResult<Self> {
    let specifics = config.data_dir.join(SPECIFICS_WORKBOOK);
    let specs = if specifics.exists() {
      debug!("Reading dataset layouts from {}", specifics.display());
      DatasetSpecs::from_workbook(&specifics)?
    } else {
      DatasetSpecs::builtin()
    };
    Ok(Self { config, specs })
  }

  pub fn with_specs(config: DatasetConfig, specs: DatasetSpecs) -> Self {
    Self { config, specs }
  }

  pub fn config(&self) -> &DatasetConfig {
    &self.config
  }

  pub fn specs(&self) -> &DatasetSpecs {
    &self.specs
  }

  /// `<data_dir>/<id>.xls`, or the `.xlsx` file when only that exists
  pub fn path_for(&self, dataset: &str) -> PathBuf {
    let xls = self.config.data_dir.join(format!("{}.xls", dataset));
    let xlsx = self.config.data_dir.join(format!("{}.xlsx", dataset));
    if !xls.exists() && xlsx.exists() {
      xlsx
    } else {
      xls
    }
  }

  /// Make sure a file is present and fresh, downloading it when allowed.
  pub async fn ensure_file(&self, file_name: &str) -> LoaderResult<PathBuf> {
    let path = self.config.data_dir.join(file_name);
    if !self.config.download {
      return Ok(path);
    }

    let needs_fetch = if path.exists() {
      let modified = modified_time(&path).await?;
      self.config.staleness().is_stale(modified)
    } else {
      true
    };
    if needs_fetch {
      self.download(file_name, &path).await?;
    }
    Ok(path)
  }

  async fn download(&self, file_name: &str, path: &Path) -> LoaderResult<()> {
    let base = format!("{}/", self.config.datasets_url.trim_end_matches('/'));
    let url = Url::parse(&base)
      .and_then(|base| base.join(file_name))
      .map_err(|e| LoaderError::ConfigurationError(format!("Invalid datasets URL: {}", e)))?;
    info!("Downloading {}", url);

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
      .build()?;
    let response = client.get(url.clone()).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;

    tokio::fs::create_dir_all(&self.config.data_dir).await?;
    tokio::fs::write(path, &bytes).await?;
    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
  }

  /// Load a dataset as a table indexed by industry.
  ///
  /// The layout is checked before any file is touched.
  pub async fn load(&self, dataset: &str) -> LoaderResult<Table> {
    let spec = self.specs.get(dataset)?;
    let path = if self.config.download {
      self.ensure_file(&format!("{}.xls", dataset)).await?
    } else {
      self.path_for(dataset)
    };
    if !path.exists() {
      warn!("Dataset {} missing at {}", dataset, path.display());
      return Err(LoaderError::DatasetNotFound(path.display().to_string()));
    }
    let dataset = dataset.to_string();
    read_blocking(move || load_table(&dataset, &path, spec)).await
  }

  /// The company master table, scoped to the configured countries.
  pub async fn company_directory(&self) -> LoaderResult<CompanyDirectory> {
    let path = self.ensure_file(COMPANY_WORKBOOK).await?;
    let scope = self.config.country_scope.clone();
    read_blocking(move || {
      let grid = Grid::from_workbook(&path, Some(COMPANY_SHEET))?;
      CompanyDirectory::from_grid(&grid, scope)
    })
    .await
  }
}

/// Workbook parsing is CPU and file bound; keep it off the async workers.
async fn read_blocking<T, F>(read: F) -> LoaderResult<T>
where
  F: FnOnce() -> LoaderResult<T> + Send + 'static,
  T: Send + 'static,
{
  tokio::task::spawn_blocking(read).await?
}

#[async_trait]
impl TableSource for DatasetStore {
  async fn table(&self, dataset: &str) -> LoaderResult<Table> {
    self.load(dataset).await
  }
}
