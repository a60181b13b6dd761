//! Offer Models

use offerdesk::offers::OfferDetails;
use offerdesk_app::domain::offers::records::OfferRecord;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Offer Response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct OfferResponse {
    /// The unique identifier of the offer
    pub uuid: Uuid,

    /// Operator display name
    pub operator: String,

    pub title: String,

    /// Free-text data quantity, e.g. `50GB`
    pub data_amount: String,

    pub minutes: u32,
    pub validity_days: u32,

    /// Price charged to the customer, in taka
    pub selling_price: u32,

    /// Pre-discount reference price, in taka
    pub original_price: Option<u32>,

    /// Original price minus selling price; zero without an original price
    pub savings: i64,

    pub region: String,
    pub category: String,
    pub whatsapp_number: String,
    pub description: Option<String>,

    /// Whether the offer is still on sale
    pub is_active: bool,

    /// The date and time the offer was created
    pub created_at: String,

    /// The date and time the offer was last updated
    pub updated_at: String,
}

impl From<OfferRecord> for OfferResponse {
    fn from(record: OfferRecord) -> Self {
        let savings = record.details.savings();

        let OfferDetails {
            operator,
            title,
            data_amount,
            minutes,
            validity_days,
            selling_price,
            original_price,
            region,
            category,
            whatsapp_number,
            description,
        } = record.details;

        OfferResponse {
            uuid: record.uuid.into(),
            operator,
            title,
            data_amount,
            minutes,
            validity_days,
            selling_price,
            original_price,
            savings,
            region,
            category,
            whatsapp_number,
            description,
            is_active: record.is_active,
            created_at: record.created_at.to_string(),
            updated_at: record.updated_at.to_string(),
        }
    }
}

/// Offers Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OffersResponse {
    /// The requested page of offers
    pub offers: Vec<OfferResponse>,

    /// 1-based page number
    pub page: u32,

    /// Page size
    pub limit: u32,
}
