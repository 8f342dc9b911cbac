//! Command-line interface parsing for neowatch
//!
//! This module handles parsing of CLI arguments using clap: `serve` runs the
//! proxy and `dashboard` opens the terminal table against a running proxy.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::client::DEFAULT_SERVER_URL;
use crate::data::parse_calendar_date;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The date is not a real `YYYY-MM-DD` calendar date
    #[error("Invalid date: '{0}'. Expected format YYYY-MM-DD")]
    InvalidDate(String),
}

/// neowatch - NASA near-Earth-object proxy and dashboard
#[derive(Parser, Debug)]
#[command(name = "neowatch")]
#[command(about = "NASA near-Earth-object proxy server and terminal dashboard")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the caching proxy in front of NASA's NeoWs feed
    Serve {
        /// Interface to bind, overrides HOST
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on, overrides PORT
        #[arg(long)]
        port: Option<u16>,

        /// Enable debug logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Open the sortable object table
    ///
    /// Examples:
    ///   neowatch dashboard
    ///   neowatch dashboard --date 2024-01-01
    ///   neowatch dashboard --server http://10.0.0.5:4000
    Dashboard {
        /// Base URL of a running `neowatch serve`
        #[arg(long, default_value = DEFAULT_SERVER_URL)]
        server: String,

        /// Date to open on, defaults to today
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<String>,
    },
}

/// Configuration derived from CLI arguments for dashboard startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Proxy base URL
    pub server_url: String,
    /// Initial date (today when absent)
    pub date: Option<NaiveDate>,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            date: None,
        }
    }
}

/// Parses a date argument into a calendar date.
///
/// # Returns
/// * `Ok(NaiveDate)` for a valid `YYYY-MM-DD`
/// * `Err(CliError::InvalidDate)` otherwise
pub fn parse_date_arg(s: &str) -> Result<NaiveDate, CliError> {
    parse_calendar_date(s).ok_or_else(|| CliError::InvalidDate(s.to_string()))
}

impl StartupConfig {
    /// Creates a StartupConfig from the `dashboard` arguments.
    pub fn from_args(server: &str, date: Option<&str>) -> Result<Self, CliError> {
        let date = date.map(parse_date_arg).transpose()?;
        Ok(StartupConfig {
            server_url: server.to_string(),
            date,
        })
    }
}
