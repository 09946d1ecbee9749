//! Configuration type definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::clipboard::formats::FormatRegistry;
use crate::codec::binary::INTEGER_DUMP_MAX;
use crate::codec::hexdump::HEX_DUMP_LIMIT;
use crate::html::FRAGMENT_BASE_INDENT;

/// Decoder limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionConfig {
    /// Bytes rendered by the hex dump (multiple of 16)
    #[serde(default = "default_hex_dump_limit")]
    pub hex_dump_limit: usize,

    /// Largest buffer shown as 32-bit integers
    #[serde(default = "default_integer_dump_max")]
    pub integer_dump_max: usize,

    /// Beautifier indent for fragment content, in tabs
    #[serde(default = "default_html_base_indent")]
    pub html_base_indent: usize,
}

fn default_hex_dump_limit() -> usize {
    HEX_DUMP_LIMIT
}

fn default_integer_dump_max() -> usize {
    INTEGER_DUMP_MAX
}

fn default_html_base_indent() -> usize {
    FRAGMENT_BASE_INDENT
}

impl Default for InspectionConfig {
    fn default() -> Self {
        Self {
            hex_dump_limit: default_hex_dump_limit(),
            integer_dump_max: default_integer_dump_max(),
            html_base_indent: default_html_base_indent(),
        }
    }
}

/// Session-specific registered format IDs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatsConfig {
    /// ID the OS assigned to the titled-hyperlink format
    #[serde(default)]
    pub titled_hyperlink_id: Option<u32>,

    /// ID the OS assigned to the link-preview format
    #[serde(default)]
    pub link_preview_id: Option<u32>,

    /// Further IDs to treat as images
    #[serde(default)]
    pub extra_image_ids: Vec<u32>,
}

impl FormatsConfig {
    /// Build the classifier's registry
    pub fn registry(&self) -> FormatRegistry {
        FormatRegistry {
            titled_hyperlink_id: self.titled_hyperlink_id,
            link_preview_id: self.link_preview_id,
            extra_image_ids: self.extra_image_ids.clone(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format ("text", "json")
    #[serde(default = "default_output_format")]
    pub format: String,

    /// Append a hex dump to every text rendering
    #[serde(default)]
    pub show_hex: bool,
}

fn default_output_format() -> String {
    "text".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_output_format(),
            show_hex: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level ("trace", "debug", "info", "warn", "error")
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file (None = console only)
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_file: None,
        }
    }
}

impl LoggingConfig {
    /// Apply `-v` count and `--log-file` on top of the file settings
    ///
    /// Any `-v` replaces the configured level; `--log-file` replaces the
    /// configured file.
    pub fn with_cli_overrides(mut self, verbose: u8, log_file: Option<PathBuf>) -> Self {
        let cli_level = match verbose {
            0 => None,
            1 => Some("info"),
            2 => Some("debug"),
            _ => Some("trace"),
        };
        if let Some(level) = cli_level {
            self.level = level.to_string();
        }
        self.level = self.level.to_lowercase();
        if log_file.is_some() {
            self.log_file = log_file;
        }
        self
    }
}
