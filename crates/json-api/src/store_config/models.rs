//! Store Config Models

use offerdesk_app::domain::config::records::ConfigEntryRecord;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Set Config Value Request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct SetConfigRequest {
    /// Any JSON value; strings are stored as-is
    pub value: Value,

    #[serde(default)]
    pub description: Option<String>,
}

/// Config Entry Response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ConfigEntryResponse {
    pub key: String,
    pub value: Value,
    pub description: Option<String>,
    pub updated_at: String,
}

impl From<ConfigEntryRecord> for ConfigEntryResponse {
    fn from(entry: ConfigEntryRecord) -> Self {
        ConfigEntryResponse {
            key: entry.key,
            value: entry.value,
            description: entry.description,
            updated_at: entry.updated_at.to_string(),
        }
    }
}
