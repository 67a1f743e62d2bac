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

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod dashboard;
mod format;

use commands::{industry::IndustryArgs, list::ListCommands, metrics::MetricsArgs, statements::StatementsArgs};
use dashboard::DashboardArgs;

#[derive(Parser, Debug)]
#[command(author, version, about = "Compare a company with its industry benchmarks", long_about = None)]
#[command(name = "ib")]
#[command(propagate_version = true)]
struct Cli {
  #[command(subcommand)]
  command: Commands,

  /// Verbose output
  #[arg(short, long, global = true)]
  verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
  /// Company ratios built from AlphaVantage fundamentals
  Metrics(MetricsArgs),
  /// Benchmarks of the industry a ticker belongs to
  Industry(IndustryArgs),
  /// Company overview and trailing-twelve-month statements
  Statements(StatementsArgs),
  /// Browse the company table
  List {
    #[command(subcommand)]
    cmd: ListCommands,
  },
  /// Interactive terminal dashboard
  Dashboard(DashboardArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
  // Load environment variables
  dotenv().ok();

  // Parse CLI arguments
  let cli = Cli::parse();

  init_logging(&cli);

  // Execute command
  match cli.command {
    Commands::Metrics(args) => commands::metrics::execute(args).await,
    Commands::Industry(args) => commands::industry::execute(args).await,
    Commands::Statements(args) => commands::statements::execute(args).await,
    Commands::List { cmd } => commands::list::execute(cmd).await,
    Commands::Dashboard(args) => dashboard::execute(args).await,
  }
}

/// Logs go to stderr so JSON on stdout stays clean. `RUST_LOG` overrides the level.
fn init_logging(cli: &Cli) {
  let default_level = match cli.command {
    Commands::Dashboard(_) => "warn",
    _ if cli.verbose => "debug",
    _ => "info",
  };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  if matches!(cli.command, Commands::Dashboard(_)) {
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(dashboard::log_writer).init();
  } else {
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
  }
}
