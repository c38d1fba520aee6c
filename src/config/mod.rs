/// Configuration management for the Mechaway catalog
///
/// Handles catalog output selection and logging level for the catalog CLI.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Catalog output configuration
    pub catalog: CatalogConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// What the catalog CLI prints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Output format for the rendered catalog
    pub output: OutputFormat,
    /// Restrict output to a single template slug
    pub slug: Option<String>,
}

/// Catalog output formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line per template
    #[default]
    Summary,
    /// Full definitions as pretty-printed JSON
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Maximum log level (trace, debug, info, warn, error)
    pub level: String,
}

impl OutputFormat {
    /// Parse an output format name, falling back to `Summary` for anything unknown
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Summary,
        }
    }
}

impl LoggingConfig {
    /// Parsed level, `None` when `level` is not a valid tracing level
    pub fn max_level(&self) -> Option<tracing::Level> {
        tracing::Level::from_str(self.level.trim()).ok()
    }
}

impl Config {
    /// Build configuration from a variable lookup (environment in production)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            catalog: CatalogConfig {
                output: lookup("MECHAWAY_CATALOG_OUTPUT")
                    .map(|value| OutputFormat::parse_or_default(&value))
                    .unwrap_or_default(),
                slug: lookup("MECHAWAY_CATALOG_SLUG").filter(|slug| !slug.trim().is_empty()),
            },
            logging: LoggingConfig {
                level: lookup("MECHAWAY_LOG").unwrap_or_else(|| "info".to_string()),
            },
        }
    }
}

impl Default for Config {
    /// Default configuration with ENV_VAR support for container deployment
    fn default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}
