//! Export Models

use offerdesk::stats::OfferStats;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use crate::offers::models::OfferResponse;

/// JSON Export Response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ExportResponse {
    /// Every offer regardless of status, newest first
    pub data: Vec<OfferResponse>,

    /// Number of exported offers
    pub count: usize,

    /// Time the export was taken
    pub exported_at: String,
}

/// Stats Response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct StatsResponse {
    pub total_offers: usize,
    pub active_offers: usize,
    pub inactive_offers: usize,

    /// Distinct operator names
    pub operators: usize,

    /// Distinct categories
    pub categories: usize,

    /// Distinct regions
    pub regions: usize,

    pub avg_price: Option<f64>,
    pub min_price: Option<u32>,
    pub max_price: Option<u32>,

    /// Time the figures were computed
    pub generated_at: String,
}

impl StatsResponse {
    pub(crate) fn new(stats: OfferStats, generated_at: String) -> Self {
        StatsResponse {
            total_offers: stats.total_offers,
            active_offers: stats.active_offers,
            inactive_offers: stats.inactive_offers,
            operators: stats.operators,
            categories: stats.categories,
            regions: stats.regions,
            avg_price: stats.avg_price,
            min_price: stats.min_price,
            max_price: stats.max_price,
            generated_at,
        }
    }
}
