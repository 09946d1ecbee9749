//! Inspection Error Types
//!
//! Errors raised inside a single decode chain. None of these abort the
//! classification of other representations: the [`Inspector`] turns them
//! into a visible [`DecodedContent::Malformed`] payload.
//!
//! [`Inspector`]: crate::clipboard::Inspector
//! [`DecodedContent::Malformed`]: crate::clipboard::DecodedContent::Malformed

use thiserror::Error;

/// Result type for inspection operations
pub type InspectResult<T> = std::result::Result<T, InspectError>;

/// Errors that can occur while decoding one representation
#[derive(Error, Debug)]
pub enum InspectError {
    /// Invalid UTF-8 data
    #[error("Invalid UTF-8 data")]
    InvalidUtf8,

    /// Invalid UTF-16 data
    #[error("Invalid UTF-16 data")]
    InvalidUtf16,

    /// Every candidate encoding decoded to something that looks binary
    #[error("Content looks binary under every candidate encoding")]
    Binary,

    /// Buffer shorter than the structure it should hold
    #[error("Invalid {what} data: expected at least {expected} bytes, got {actual}")]
    Truncated {
        /// Structure being decoded
        what: &'static str,
        /// Minimum number of bytes required
        expected: usize,
        /// Number of bytes present
        actual: usize,
    },

    /// JSON parser rejected the document
    #[error("Error parsing JSON: {0}")]
    JsonParse(String),

    /// Image could not be decoded in any layout
    #[error("Image decode error: {0}")]
    ImageDecode(String),

    /// Tokenizer lost its position in the input
    #[error("Tokenizer error: {0}")]
    Tokenize(String),

    /// Closing bracket or tag without an opener
    #[error("Unbalanced structure: {0}")]
    Unbalanced(String),

    /// Snapshot manifest is not usable
    #[error("Snapshot format error: {0}")]
    SnapshotFormat(String),
}

impl InspectError {
    /// Returns true if a less structured rendering can still be shown
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::SnapshotFormat(_))
    }

    /// Returns true if structured content was malformed
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::Truncated { .. }
                | Self::JsonParse(_)
                | Self::ImageDecode(_)
                | Self::Tokenize(_)
                | Self::Unbalanced(_)
        )
    }
}

impl From<serde_json::Error> for InspectError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParse(err.to_string())
    }
}

impl From<image::ImageError> for InspectError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageDecode(err.to_string())
    }
}
