//! Test helpers

use jiff::Timestamp;
use offerdesk::{
    config::StoreConfig,
    offers::{DEFAULT_REGION, OfferDetails},
};

use crate::domain::offers::records::{OfferRecord, OfferUuid};

/// A valid 30-day data offer.
pub fn offer_details(operator: &str, selling_price: u32) -> OfferDetails {
    OfferDetails {
        operator: operator.to_string(),
        title: format!("{operator} Pack"),
        data_amount: "10GB".to_string(),
        minutes: 0,
        validity_days: 30,
        selling_price,
        original_price: None,
        region: DEFAULT_REGION.to_string(),
        category: "data".to_string(),
        whatsapp_number: StoreConfig::default().default_whatsapp,
        description: None,
    }
}

/// What the store would hand back for `details`.
pub fn stored(details: OfferDetails) -> OfferRecord {
    let now = Timestamp::now();

    OfferRecord {
        uuid: OfferUuid::new(),
        details,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}
