//! # ib-client
//!
//! A thin AlphaVantage client for the company fundamentals functions.
//!
//! Responses are returned as raw `serde_json::Value` so callers can cache the
//! payload verbatim. The client never checks the HTTP status and never retries:
//! an error payload (rate-limit note, invalid symbol) comes back like any other
//! body and is logged at warn level.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ib_client::AlphaVantageClient;
//! use ib_core::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let client = AlphaVantageClient::new(config)?;
//!
//!     let overview = client.fundamentals().company_overview("IBM").await?;
//!     println!("{}", overview["Name"]);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All methods return `Result<T, ib_core::Error>`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod endpoints;
pub mod transport;

// Re-export the main client and common types
pub use client::AlphaVantageClient;
pub use endpoints::fundamentals::FundamentalsEndpoints;
pub use ib_core::{Config, Error, FuncType, Result};
