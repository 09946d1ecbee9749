//! Utility Functions
//!
//! - [`uri`] - absolute URI checks used by link and JSON decoding
//! - [`errors`] - user-friendly error messages with troubleshooting hints
//!
//! ```rust
//! use clipboard_inspector::utils::{format_user_error, is_web_url};
//!
//! assert!(is_web_url("https://example.com/x"));
//!
//! let err = anyhow::anyhow!("Failed to read config file: missing.toml");
//! println!("{}", format_user_error(&err));
//! ```

pub mod errors;
pub mod uri;

pub use errors::format_user_error;
pub use uri::{absolute_uri_scheme, is_absolute_uri, is_web_url};
