//! Error types for the countdown widget.

use std::path::PathBuf;

/// Why a countdown could not be started from user input.
///
/// These are surfaced to the user as error notices. They are never fatal and
/// the previous countdown is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The date or the time field is empty.
    #[error("both a target date and a target time are required")]
    MissingInput,

    /// A field is present but does not parse.
    #[error("invalid {field} input: {value:?}")]
    InvalidInput {
        /// Which field failed, `"date"` or `"time"`.
        field: &'static str,
        /// The offending input.
        value: String,
    },

    /// The target instant is not strictly after now.
    #[error("target time must be in the future")]
    NotInFuture,
}

/// Why a persisted record or URL payload could not be restored.
///
/// Restoring saved state is best effort: callers discard the input and fall
/// back to the empty state.
#[derive(Debug, thiserror::Error)]
pub enum DeserializationError {
    /// The payload is not a well-formed record.
    #[error("malformed countdown record: {0}")]
    Malformed(String),

    /// The record targets an instant that has already passed.
    #[error("countdown record expired")]
    Expired,
}

impl From<serde_json::Error> for DeserializationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Failures of a [`PersistenceStore`](crate::store::PersistenceStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error at {}: {source}", path.display())]
    Io {
        /// File that was being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The record could not be encoded.
    #[error("failed to encode countdown record: {0}")]
    Encode(#[from] serde_json::Error),

    /// No storage location could be determined.
    #[error("no storage directory available")]
    NoDirectory,

    /// The slot key cannot name a file inside the store directory.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Failures of a [`Clipboard`](crate::clipboard::Clipboard).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    /// This clipboard path is not available in the current environment.
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    /// The clipboard refused the write.
    #[error("clipboard rejected the write: {0}")]
    Rejected(String),
}

/// Failures loading a [`Config`](crate::config::Config).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        /// Config file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for [`Config`](crate::config::Config).
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
