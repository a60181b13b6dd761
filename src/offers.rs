//! Offers

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Region sentinel meaning the offer is available everywhere.
pub const DEFAULT_REGION: &str = "All Bangladesh";

/// Category applied when a row does not name one.
pub const DEFAULT_CATEGORY: Category = Category::Data;

/// Unknown enumeration value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    /// Which enumeration was being parsed.
    pub kind: &'static str,

    /// The rejected input.
    pub value: String,
}

/// Mobile network operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Operator {
    /// Grameenphone
    #[serde(rename = "GP")]
    Gp,

    /// Robi
    Robi,

    /// Banglalink
    Banglalink,

    /// Airtel
    Airtel,

    /// Skitto
    Skitto,
}

impl Operator {
    /// Every known operator, in display order.
    pub const ALL: [Operator; 5] = [
        Operator::Gp,
        Operator::Robi,
        Operator::Banglalink,
        Operator::Airtel,
        Operator::Skitto,
    ];

    /// Canonical display name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Operator::Gp => "GP",
            Operator::Robi => "Robi",
            Operator::Banglalink => "Banglalink",
            Operator::Airtel => "Airtel",
            Operator::Skitto => "Skitto",
        }
    }

    /// Comma separated list of canonical names, used in diagnostics.
    pub fn known_names() -> String {
        Self::ALL.map(Operator::as_str).join(", ")
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        Self::ALL
            .into_iter()
            .find(|operator| operator.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownVariant {
                kind: "operator",
                value: value.to_string(),
            })
    }
}

/// Bundle category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Data only
    Data,

    /// Data and minutes
    Combo,

    /// Voice minutes
    Minutes,

    /// Text messages
    Sms,
}

impl Category {
    /// Every known category.
    pub const ALL: [Category; 4] = [
        Category::Data,
        Category::Combo,
        Category::Minutes,
        Category::Sms,
    ];

    /// Stored name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Data => "data",
            Category::Combo => "combo",
            Category::Minutes => "minutes",
            Category::Sms => "sms",
        }
    }

    /// Comma separated list of stored names, used in diagnostics.
    pub fn known_names() -> String {
        Self::ALL.map(Category::as_str).join(", ")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownVariant {
                kind: "category",
                value: value.to_string(),
            })
    }
}

/// Offer columns, as they appear in CSV headers and exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// `operator`
    Operator,

    /// `title`
    Title,

    /// `data_amount`
    DataAmount,

    /// `minutes`
    Minutes,

    /// `validity_days`
    ValidityDays,

    /// `selling_price`
    SellingPrice,

    /// `original_price`
    OriginalPrice,

    /// `region`
    Region,

    /// `category`
    Category,

    /// `whatsapp_number`
    WhatsappNumber,

    /// `description`
    Description,
}

impl Field {
    /// Columns every import must carry.
    pub const REQUIRED: [Field; 5] = [
        Field::Operator,
        Field::Title,
        Field::DataAmount,
        Field::SellingPrice,
        Field::ValidityDays,
    ];

    /// Columns an import may carry.
    pub const OPTIONAL: [Field; 6] = [
        Field::Minutes,
        Field::OriginalPrice,
        Field::Region,
        Field::Category,
        Field::WhatsappNumber,
        Field::Description,
    ];

    /// Every column in export order.
    pub const ALL: [Field; 11] = [
        Field::Operator,
        Field::Title,
        Field::DataAmount,
        Field::Minutes,
        Field::ValidityDays,
        Field::SellingPrice,
        Field::OriginalPrice,
        Field::Region,
        Field::Category,
        Field::WhatsappNumber,
        Field::Description,
    ];

    /// Column name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Operator => "operator",
            Field::Title => "title",
            Field::DataAmount => "data_amount",
            Field::Minutes => "minutes",
            Field::ValidityDays => "validity_days",
            Field::SellingPrice => "selling_price",
            Field::OriginalPrice => "original_price",
            Field::Region => "region",
            Field::Category => "category",
            Field::WhatsappNumber => "whatsapp_number",
            Field::Description => "description",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Offer Details
///
/// One sellable bundle, without the identifier and timestamps the store assigns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferDetails {
    /// Operator display name.
    pub operator: String,

    /// Display title.
    pub title: String,

    /// Free-text data quantity, e.g. `50GB`.
    pub data_amount: String,

    /// Voice minutes included.
    pub minutes: u32,

    /// Days the bundle remains usable.
    pub validity_days: u32,

    /// Price charged to the customer.
    pub selling_price: u32,

    /// Pre-discount reference price.
    pub original_price: Option<u32>,

    /// Geographic scope.
    pub region: String,

    /// Category name.
    pub category: String,

    /// Contact number used to place an order.
    pub whatsapp_number: String,

    /// Optional free text.
    pub description: Option<String>,
}

impl OfferDetails {
    /// Difference between the reference and the selling price.
    ///
    /// Zero or negative savings are reported as-is, they are not an error.
    pub fn savings(&self) -> i64 {
        self.original_price.map_or(0, |original| {
            i64::from(original) - i64::from(self.selling_price)
        })
    }

    /// Heuristic numeric value of [`OfferDetails::data_amount`], used for sorting.
    pub fn data_amount_value(&self) -> f64 {
        data_amount_value(&self.data_amount)
    }

    /// Render a single column as text, empty when the value is absent.
    pub fn field_text(&self, field: Field) -> String {
        match field {
            Field::Operator => self.operator.clone(),
            Field::Title => self.title.clone(),
            Field::DataAmount => self.data_amount.clone(),
            Field::Minutes => self.minutes.to_string(),
            Field::ValidityDays => self.validity_days.to_string(),
            Field::SellingPrice => self.selling_price.to_string(),
            Field::OriginalPrice => self
                .original_price
                .map(|price| price.to_string())
                .unwrap_or_default(),
            Field::Region => self.region.clone(),
            Field::Category => self.category.clone(),
            Field::WhatsappNumber => self.whatsapp_number.clone(),
            Field::Description => self.description.clone().unwrap_or_default(),
        }
    }
}

impl AsRef<OfferDetails> for OfferDetails {
    fn as_ref(&self) -> &OfferDetails {
        self
    }
}

/// Strip everything except digits and dots, then parse; `0.0` when nothing parses.
pub fn data_amount_value(data_amount: &str) -> f64 {
    let numeric: String = data_amount
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    numeric.parse::<f64>().unwrap_or(0.0)
}
