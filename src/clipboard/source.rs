//! Representation Sources
//!
//! The pipeline never talks to a live clipboard. Something else opens the
//! store, enumerates it and hands over `(id, name, size, bytes)` tuples;
//! [`RepresentationSource`] is that seam.
//!
//! [`SnapshotSource`] is the on-disk implementation: a `snapshot.toml`
//! manifest plus one file per representation.
//!
//! ```toml
//! [[representation]]
//! format_id = 13
//! format_name = "CF_UNICODETEXT"
//! file = "13.bin"
//!
//! [[representation]]
//! format_id = 16
//! format_name = "CF_LOCALE"
//! file = "16.bin"
//! size = 4
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::clipboard::error::InspectError;
use crate::clipboard::formats::{resolve_format_name, RawRepresentation};

/// Supplies the representations currently offered by a clipboard
#[cfg_attr(test, mockall::automock)]
pub trait RepresentationSource {
    /// Enumerate every representation, in the order the store reports them
    fn representations(&self) -> Result<Vec<RawRepresentation>>;
}

/// One `[[representation]]` entry of a snapshot manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    /// Clipboard format ID
    pub format_id: u32,

    /// Registered name (optional for standard formats)
    #[serde(default)]
    pub format_name: Option<String>,

    /// Payload file, relative to the manifest
    pub file: PathBuf,

    /// Size reported by the original handle
    #[serde(default)]
    pub size: Option<u32>,
}

/// Snapshot manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotManifest {
    /// Entries in enumeration order
    #[serde(default, rename = "representation")]
    pub representations: Vec<SnapshotEntry>,
}

impl SnapshotManifest {
    /// Parse manifest text
    pub fn from_toml(content: &str) -> std::result::Result<Self, InspectError> {
        let manifest: SnapshotManifest =
            toml::from_str(content).map_err(|e| InspectError::SnapshotFormat(e.to_string()))?;

        if manifest.representations.is_empty() {
            return Err(InspectError::SnapshotFormat(
                "manifest lists no [[representation]] entries".to_string(),
            ));
        }

        Ok(manifest)
    }

    /// Serialize to manifest text
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize snapshot manifest")
    }
}

/// Clipboard snapshot stored as a manifest plus payload files
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    manifest_path: PathBuf,
    manifest: SnapshotManifest,
}

impl SnapshotSource {
    /// Load and parse a manifest
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot manifest: {}", path.display()))?;

        let manifest = SnapshotManifest::from_toml(&content)
            .with_context(|| format!("Invalid snapshot manifest: {}", path.display()))?;

        info!(
            "Loaded snapshot manifest {} ({} representations)",
            path.display(),
            manifest.representations.len()
        );

        Ok(Self {
            manifest_path: path.to_path_buf(),
            manifest,
        })
    }

    /// Parsed manifest
    pub fn manifest(&self) -> &SnapshotManifest {
        &self.manifest
    }

    fn resolve(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            return file.to_path_buf();
        }
        self.manifest_path
            .parent()
            .map(|dir| dir.join(file))
            .unwrap_or_else(|| file.to_path_buf())
    }

    fn read_entry(&self, entry: &SnapshotEntry) -> RawRepresentation {
        let name = resolve_format_name(entry.format_id, entry.format_name.as_deref());
        let path = self.resolve(&entry.file);

        match std::fs::read(&path) {
            Ok(bytes) => {
                debug!(
                    "Read {} bytes for format {} from {}",
                    bytes.len(),
                    entry.format_id,
                    path.display()
                );
                let mut rep = RawRepresentation::new(entry.format_id, name, bytes);
                if let Some(size) = entry.size {
                    rep.size_bytes = size;
                }
                rep
            }
            Err(e) => {
                warn!(
                    "Snapshot file {} for format {} unreadable: {}",
                    path.display(),
                    entry.format_id,
                    e
                );
                RawRepresentation::absent(entry.format_id, name, entry.size.unwrap_or(0))
            }
        }
    }
}

impl RepresentationSource for SnapshotSource {
    fn representations(&self) -> Result<Vec<RawRepresentation>> {
        Ok(self
            .manifest
            .representations
            .iter()
            .map(|entry| self.read_entry(entry))
            .collect())
    }
}
