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

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum LoaderError {
  #[error("API error: {0}")]
  ApiError(String),

  #[error("IO error: {0}")]
  IoError(String),

  #[error("Serialization error: {0}")]
  SerializationError(String),

  #[error("Spreadsheet error: {0}")]
  SpreadsheetError(String),

  #[error("Dataset not found: {0}")]
  DatasetNotFound(String),

  #[error("Ticker '{0}' not found in the industry table")]
  TickerNotFound(String),

  #[error("Invalid data: {0}")]
  InvalidData(String),

  #[error("Configuration error: {0}")]
  ConfigurationError(String),
}

impl LoaderError {
  /// Not-found conditions callers are expected to handle (unknown ticker)
  pub fn is_not_found(&self) -> bool {
    matches!(self, LoaderError::TickerNotFound(_))
  }

  pub fn is_configuration(&self) -> bool {
    matches!(self, LoaderError::ConfigurationError(_))
  }
}

// Implement conversions manually
impl From<std::io::Error> for LoaderError {
  fn from(err: std::io::Error) -> Self {
    LoaderError::IoError(err.to_string())
  }
}

impl From<serde_json::Error> for LoaderError {
  fn from(err: serde_json::Error) -> Self {
    LoaderError::SerializationError(err.to_string())
  }
}

impl From<calamine::Error> for LoaderError {
  fn from(err: calamine::Error) -> Self {
    LoaderError::SpreadsheetError(err.to_string())
  }
}

impl From<tokio::task::JoinError> for LoaderError {
  fn from(err: tokio::task::JoinError) -> Self {
    LoaderError::IoError(format!("Workbook reader task failed: {}", err))
  }
}

impl From<reqwest::Error> for LoaderError {
  fn from(err: reqwest::Error) -> Self {
    LoaderError::ApiError(err.to_string())
  }
}

impl From<ib_core::Error> for LoaderError {
  fn from(err: ib_core::Error) -> Self {
    if err.is_configuration() {
      LoaderError::ConfigurationError(err.to_string())
    } else {
      LoaderError::ApiError(err.to_string())
    }
  }
}

pub type LoaderResult<T> = Result<T, LoaderError>;
