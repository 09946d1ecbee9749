//! Configuration management
//!
//! Handles loading, validation, and merging of configuration from:
//! - TOML files
//! - CLI arguments

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod types;

pub use types::{FormatsConfig, InspectionConfig, LoggingConfig, OutputConfig};

/// Output formats accepted by `[output] format`
pub const OUTPUT_FORMATS: &[&str] = &["text", "json"];

/// Log levels accepted by `[logging] level`
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Upper bound for `integer_dump_max`
const INTEGER_DUMP_CEILING: usize = 4096;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Decoder limits
    #[serde(default)]
    pub inspection: InspectionConfig,
    /// Registered format IDs
    #[serde(default)]
    pub formats: FormatsConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = Self::from_toml(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Parse and validate configuration text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Create default configuration
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let inspection = &self.inspection;

        if inspection.hex_dump_limit == 0 || inspection.hex_dump_limit % 16 != 0 {
            anyhow::bail!(
                "hex_dump_limit ({}) must be a positive multiple of 16",
                inspection.hex_dump_limit
            );
        }

        if inspection.integer_dump_max % 4 != 0 || inspection.integer_dump_max > INTEGER_DUMP_CEILING {
            anyhow::bail!(
                "integer_dump_max ({}) must be a multiple of 4 no larger than {}",
                inspection.integer_dump_max,
                INTEGER_DUMP_CEILING
            );
        }

        if !OUTPUT_FORMATS.contains(&self.output.format.as_str()) {
            anyhow::bail!("Invalid output format: {}", self.output.format);
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            anyhow::bail!("Invalid log level: {}", self.logging.level);
        }

        Ok(())
    }

    /// Override config with CLI arguments
    pub fn with_overrides(mut self, output_format: Option<String>, show_hex: Option<bool>) -> Self {
        if let Some(format) = output_format {
            self.output.format = format;
        }
        if let Some(show_hex) = show_hex {
            self.output.show_hex = show_hex;
        }

        self
    }

    /// Whether JSON output was requested
    pub fn json_output(&self) -> bool {
        self.output.format == "json"
    }
}
