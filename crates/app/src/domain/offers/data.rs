//! Offers Data

use offerdesk::{
    normalize::canonicalize,
    offers::{DEFAULT_REGION, OfferDetails},
    view::SortOrder,
};
use serde::{Deserialize, Serialize};

/// Default page size for offer listings.
pub const DEFAULT_LIMIT: u32 = 20;

/// Largest page size for offer listings.
pub const MAX_LIMIT: u32 = 100;

/// Column an offer listing is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffersSortBy {
    #[default]
    CreatedAt,
    SellingPrice,
    ValidityDays,
}

impl OffersSortBy {
    pub const fn as_str(self) -> &'static str {
        match self {
            OffersSortBy::CreatedAt => "created_at",
            OffersSortBy::SellingPrice => "selling_price",
            OffersSortBy::ValidityDays => "validity_days",
        }
    }
}

/// Offer listing filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OffersFilter {
    /// Case-insensitive operator substring
    pub operator: Option<String>,

    /// Case-insensitive category substring
    pub category: Option<String>,

    /// Case-insensitive region substring; the default region applies no filter
    pub region: Option<String>,

    pub min_price: Option<u32>,
    pub max_price: Option<u32>,
    pub sort_by: OffersSortBy,
    pub sort_order: SortOrder,

    /// 1-based page number
    pub page: u32,

    /// Page size, between 1 and [`MAX_LIMIT`]
    pub limit: u32,

    /// Also return soft-deleted offers
    pub include_inactive: bool,
}

impl Default for OffersFilter {
    fn default() -> Self {
        Self {
            operator: None,
            category: None,
            region: None,
            min_price: None,
            max_price: None,
            sort_by: OffersSortBy::CreatedAt,
            sort_order: SortOrder::Desc,
            page: 1,
            limit: DEFAULT_LIMIT,
            include_inactive: false,
        }
    }
}

impl OffersFilter {
    /// Clamp paging into range and drop filters that match everything.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        fn non_blank(value: Option<String>) -> Option<String> {
            value
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        }

        self.operator = non_blank(self.operator);
        self.category = non_blank(self.category);
        self.region = non_blank(self.region).filter(|region| region != DEFAULT_REGION);
        self.page = self.page.max(1);
        self.limit = self.limit.clamp(1, MAX_LIMIT);

        self
    }

    /// Rows to skip for the requested page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

/// Partial offer update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfferUpdate {
    pub operator: Option<String>,
    pub title: Option<String>,
    pub data_amount: Option<String>,
    pub minutes: Option<u32>,
    pub validity_days: Option<u32>,
    pub selling_price: Option<u32>,
    pub original_price: Option<u32>,
    pub region: Option<String>,
    pub category: Option<String>,
    pub whatsapp_number: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl OfferUpdate {
    /// Merge the update over `current`; operator and category come out in canonical spelling.
    #[must_use]
    pub fn apply(&self, current: &OfferDetails) -> OfferDetails {
        let text = |update: &Option<String>, current: &String| {
            update
                .as_deref()
                .map_or_else(|| current.clone(), |value| value.trim().to_string())
        };

        canonicalize(OfferDetails {
            operator: text(&self.operator, &current.operator),
            title: text(&self.title, &current.title),
            data_amount: text(&self.data_amount, &current.data_amount),
            minutes: self.minutes.unwrap_or(current.minutes),
            validity_days: self.validity_days.unwrap_or(current.validity_days),
            selling_price: self.selling_price.unwrap_or(current.selling_price),
            original_price: self.original_price.or(current.original_price),
            region: text(&self.region, &current.region),
            category: text(&self.category, &current.category),
            whatsapp_number: text(&self.whatsapp_number, &current.whatsapp_number),
            description: self
                .description
                .as_ref()
                .map(|value| value.trim().to_string())
                .or_else(|| current.description.clone()),
        })
    }

    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
