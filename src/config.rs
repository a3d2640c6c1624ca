//! Command line configuration

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::catalog::{Catalog, CatalogError};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ORDER_DESK_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "ORDER_DESK_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Order desk configuration
#[derive(Debug, Parser)]
#[command(name = "order-desk", about = "Interactive order desk", long_about = None)]
pub struct Config {
    /// YAML catalog fixture to seed products from; the built-in catalog is used when omitted
    #[arg(short, long, env = "ORDER_DESK_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load the configured catalog, or the built-in seed.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the fixture cannot be read or is invalid.
    pub fn load_catalog(&self) -> Result<Catalog<'static>, CatalogError> {
        match &self.catalog {
            Some(path) => Catalog::from_fixture_file(path),
            None => Catalog::seed(),
        }
    }
}
