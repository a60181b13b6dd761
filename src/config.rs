//! Store Configuration
//!
//! Process-wide defaults (contact numbers, company details) are passed around as an explicit
//! [`StoreConfig`] value rather than read from ambient state.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::offers::DEFAULT_REGION;

/// Recognised configuration key for the fallback order number.
pub const DEFAULT_WHATSAPP_KEY: &str = "default_whatsapp";

/// Recognised configuration key for the support phone number.
pub const SUPPORT_PHONE_KEY: &str = "support_phone";

/// Recognised configuration key for the support email address.
pub const SUPPORT_EMAIL_KEY: &str = "support_email";

/// Recognised configuration key for the company name.
pub const COMPANY_NAME_KEY: &str = "company_name";

/// Recognised configuration key for the region applied to rows without one.
pub const DEFAULT_REGION_KEY: &str = "default_region";

/// Store Config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// WhatsApp number used when an offer row does not carry one.
    pub default_whatsapp: String,

    /// Customer support phone number.
    pub support_phone: String,

    /// Customer support email address.
    pub support_email: String,

    /// Company display name.
    pub company_name: String,

    /// Region used when an offer row does not carry one.
    pub default_region: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_whatsapp: "+8801712345678".to_string(),
            support_phone: "+880171234567".to_string(),
            support_email: "support@realdeals.com".to_string(),
            company_name: "Real Deals BD".to_string(),
            default_region: DEFAULT_REGION.to_string(),
        }
    }
}

impl StoreConfig {
    /// Overlay recognised keys from a decoded key/value mapping onto the defaults.
    ///
    /// Unknown keys are ignored; `null` and empty values keep the default.
    pub fn from_values(values: &FxHashMap<String, Value>) -> Self {
        let mut config = Self::default();

        for (key, target) in [
            (DEFAULT_WHATSAPP_KEY, &mut config.default_whatsapp),
            (SUPPORT_PHONE_KEY, &mut config.support_phone),
            (SUPPORT_EMAIL_KEY, &mut config.support_email),
            (COMPANY_NAME_KEY, &mut config.company_name),
            (DEFAULT_REGION_KEY, &mut config.default_region),
        ] {
            if let Some(text) = values.get(key).and_then(value_text) {
                *target = text;
            }
        }

        config
    }
}

/// Decode a stored configuration value, falling back to the raw text when it is not JSON.
pub fn decode_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_ignored| Value::String(raw.to_string()))
}

/// Encode a configuration value for storage; strings are stored verbatim.
pub fn encode_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn value_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
        Value::String(text) => text.trim().to_string(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
    };

    (!text.is_empty()).then_some(text)
}
