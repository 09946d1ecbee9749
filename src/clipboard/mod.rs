//! Clipboard Representation Pipeline
//!
//! Classifies each representation a clipboard offers and decodes it into
//! a renderable form.
//!
//! # Architecture
//!
//! - [`formats`] - format ID constants, [`RawRepresentation`], [`FormatKind`]
//! - [`classify`] - ordered rule table, `(id, name, bytes)` → [`FormatKind`]
//! - [`Inspector`] - kind-specific decoder chains
//! - [`source`] - [`RepresentationSource`] seam and on-disk snapshots
//!
//! # Data Flow
//!
//! ```text
//! RepresentationSource ──> RawRepresentation ──> classify ──> FormatKind
//!                                  │                              │
//!                                  └──────────> Inspector <───────┘
//!                                                   │
//!                                                   └─> DecodedContent ──> display
//! ```
//!
//! Decoder failures never cross the [`Inspector`] boundary: a failed chain
//! yields [`DecodedContent::Malformed`] with a best-effort rendering of the
//! raw bytes, so one bad representation never hides the others.

pub mod classify;
pub mod content;
pub mod error;
pub mod formats;
pub mod inspector;
pub mod source;

pub use classify::{classify, classify_representation};
pub use content::{DecodedContent, Inspection, NO_DATA_MESSAGE};
pub use error::{InspectError, InspectResult};
pub use formats::{
    resolve_format_name, standard_format_name, FormatKind, FormatRegistry, RawRepresentation,
};
pub use inspector::Inspector;
pub use source::{RepresentationSource, SnapshotEntry, SnapshotManifest, SnapshotSource};
