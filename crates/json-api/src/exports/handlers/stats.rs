//! Offer Stats Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::prelude::*;

use offerdesk::stats::OfferStats;

use crate::{
    exports::{errors::load_failed, models::StatsResponse},
    extensions::*,
    state::State,
};

/// Offer Stats Handler
///
/// Aggregate figures over every offer, active or not.
#[endpoint(tags("exports"), summary = "Offer Statistics")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<StatsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let offers = state.app.offers.export_all().await.map_err(load_failed)?;

    let stats = OfferStats::from_offers(
        offers
            .iter()
            .map(|offer| (&offer.details, offer.is_active)),
    );

    Ok(Json(StatsResponse::new(stats, Timestamp::now().to_string())))
}
