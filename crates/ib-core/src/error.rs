use thiserror::Error;

/// The main error type for ib-* crates
#[derive(Error, Debug)]
pub enum Error {
  /// Environment variable error
  #[error("Environment variable error: {0}")]
  EnvVar(#[from] std::env::VarError),

  /// Configuration error
  #[error("Configuration error: {0}")]
  Config(String),

  /// API key error
  #[error("API key error: {0}")]
  ApiKey(String),

  /// Serialization/Deserialization error
  #[error("Serialization error: {0}")]
  Serde(#[from] serde_json::Error),

  /// Date/Time parsing error
  #[error("Date parsing error")]
  ParseDate(#[from] chrono::ParseError),

  /// HTTP transport error
  #[error("HTTP error: {0}")]
  Http(String),

  /// Parse error for data processing
  #[error("Parse error: {0}")]
  Parse(String),
}

impl Error {
  /// Configuration problems are detected before any I/O and are shown to the user verbatim.
  pub fn is_configuration(&self) -> bool {
    matches!(self, Error::Config(_) | Error::ApiKey(_) | Error::EnvVar(_))
  }
}

/// Result type alias for ib-* crates
pub type Result<T> = std::result::Result<T, Error>;
