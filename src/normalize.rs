//! Field Normalizer
//!
//! Promotes a [`RawRow`] into a typed [`OfferCandidate`], substituting defaults for absent fields.
//! Numeric coercion is lenient: a malformed number becomes `0` (or no original price), exactly
//! like an absent one. Telling the two apart is the validator's job, which is why the raw row
//! travels with the candidate.

use serde::{Deserialize, Serialize};

use crate::{
    config::StoreConfig,
    offers::{Category, DEFAULT_CATEGORY, Field, OfferDetails, Operator},
    parser::RawRow,
};

/// Defaults injected into normalisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeDefaults {
    /// Region for rows without one
    pub default_region: String,

    /// WhatsApp number for rows without one
    pub default_whatsapp: String,
}

impl From<&StoreConfig> for NormalizeDefaults {
    fn from(config: &StoreConfig) -> Self {
        Self {
            default_region: config.default_region.clone(),
            default_whatsapp: config.default_whatsapp.clone(),
        }
    }
}

impl Default for NormalizeDefaults {
    fn default() -> Self {
        Self::from(&StoreConfig::default())
    }
}

/// Offer Candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferCandidate {
    /// 1-based data row number
    pub row: usize,

    /// Typed, defaulted offer
    pub offer: OfferDetails,

    /// The row the offer was built from
    pub source: RawRow,
}

/// Normalise one raw row.
pub fn normalize(row: &RawRow, defaults: &NormalizeDefaults) -> OfferCandidate {
    let text = |field| row.field(field).map(str::to_string);

    let operator = row
        .field(Field::Operator)
        .map_or_else(String::new, canonical_operator);

    let category = row
        .field(Field::Category)
        .map_or_else(|| DEFAULT_CATEGORY.as_str().to_string(), canonical_category);

    let offer = OfferDetails {
        operator,
        title: text(Field::Title).unwrap_or_default(),
        data_amount: text(Field::DataAmount).unwrap_or_default(),
        minutes: coerce(row, Field::Minutes).unwrap_or(0),
        validity_days: coerce(row, Field::ValidityDays).unwrap_or(0),
        selling_price: coerce(row, Field::SellingPrice).unwrap_or(0),
        original_price: coerce(row, Field::OriginalPrice).filter(|price| *price > 0),
        region: text(Field::Region).unwrap_or_else(|| defaults.default_region.clone()),
        category,
        whatsapp_number: text(Field::WhatsappNumber)
            .unwrap_or_else(|| defaults.default_whatsapp.clone()),
        description: text(Field::Description),
    };

    OfferCandidate {
        row: row.row,
        offer,
        source: row.clone(),
    }
}

/// Canonical spelling of a known operator; anything else is returned trimmed for the validator.
pub fn canonical_operator(value: &str) -> String {
    value
        .parse::<Operator>()
        .map_or_else(|_ignored| value.trim().to_string(), |op| op.as_str().to_string())
}

/// Canonical spelling of a known category; anything else is returned trimmed for the validator.
pub fn canonical_category(value: &str) -> String {
    value
        .parse::<Category>()
        .map_or_else(|_ignored| value.trim().to_string(), |c| c.as_str().to_string())
}

/// Bring operator and category of an offer built outside the CSV path to canonical spelling.
#[must_use]
pub fn canonicalize(mut offer: OfferDetails) -> OfferDetails {
    offer.operator = canonical_operator(&offer.operator);
    offer.category = canonical_category(&offer.category);

    offer
}

/// Normalise every row, preserving order.
pub fn normalize_all(rows: &[RawRow], defaults: &NormalizeDefaults) -> Vec<OfferCandidate> {
    rows.iter().map(|row| normalize(row, defaults)).collect()
}

fn coerce(row: &RawRow, field: Field) -> Option<u32> {
    row.field(field)
        .and_then(leading_integer)
        .and_then(|value| u32::try_from(value).ok())
}

/// Parse an optional sign followed by leading digits, ignoring anything after them.
///
/// `"775abc"` yields `775`, `"12.5"` yields `12`, `"abc"` yields `None`.
pub fn leading_integer(value: &str) -> Option<i64> {
    let value = value.trim();

    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    let magnitude: i64 = digits.get(..end)?.parse().ok()?;

    Some(if negative { -magnitude } else { magnitude })
}
