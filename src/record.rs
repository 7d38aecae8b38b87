//! The persisted countdown record.
//!
//! One record lives in one storage slot. It is written whole on every save and
//! read once at startup; there is no merging and no versioning.

use serde::{Deserialize, Serialize};

use crate::clock::Timestamp;
use crate::error::{DeserializationError, StoreError};

/// Storage key of the single countdown slot.
pub const STORAGE_KEY: &str = "countdownAppData";

/// A saved countdown.
///
/// The JSON layout (`date`, `time`, `title`, `targetTimestamp`) matches what
/// the web version of the widget writes to local storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedRecord {
    /// Date input, `YYYY-MM-DD`.
    pub date: String,
    /// Time input, `HH:MM`.
    pub time: String,
    /// Countdown title. Older records may omit it.
    #[serde(default)]
    pub title: String,
    /// Target instant in milliseconds since the epoch.
    #[serde(rename = "targetTimestamp")]
    pub target_timestamp: Timestamp,
}

impl PersistedRecord {
    /// Encodes the record as JSON.
    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a record from JSON.
    ///
    /// The timestamp must be an integer: fractional or non-numeric values are
    /// rejected as malformed.
    pub fn from_json(json: &str) -> Result<Self, DeserializationError> {
        Ok(serde_json::from_str(json)?)
    }
}
