//! Config Records

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Config Entry Record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigEntryRecord {
    pub key: String,

    /// Decoded value; text that is not JSON is returned as a string
    pub value: Value,

    pub description: Option<String>,
    pub updated_at: Timestamp,
}
