//! Error types for document snapshots and configuration.

use crate::document::PageId;

/// Result type for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Errors raised while acquiring or validating a document snapshot.
///
/// Geometry misses are never errors; see [`crate::geometry::screen_to_page`].
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The external decoder failed to produce a document.
    #[error("document failed to load: {0}")]
    Load(String),

    /// The snapshot was not valid JSON for the document model.
    #[error("document snapshot parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Page rotation was not a right angle.
    #[error("invalid page rotation {0} (expected a multiple of 90)")]
    InvalidRotation(i32),

    /// Two pages share the same identifier.
    #[error("duplicate page id {0}")]
    DuplicatePageId(PageId),
}

/// Errors that can occur while loading viewport configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid value for a configuration parameter.
    #[error("invalid value for configuration key: {0}")]
    InvalidValue(String),

    /// I/O error reading or writing configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file was not valid TOML.
    #[error("configuration parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("configuration serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
