//! Update Offer Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use offerdesk_app::domain::offers::data::OfferUpdate;

use crate::{
    errors::ApiError,
    extensions::*,
    offers::{errors::into_api_error, models::OfferResponse},
    state::State,
};

/// Update Offer Request
///
/// Every field is optional; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct UpdateOfferRequest {
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

impl From<UpdateOfferRequest> for OfferUpdate {
    fn from(request: UpdateOfferRequest) -> Self {
        OfferUpdate {
            operator: request.operator,
            title: request.title,
            data_amount: request.data_amount,
            minutes: request.minutes,
            validity_days: request.validity_days,
            selling_price: request.selling_price,
            original_price: request.original_price,
            region: request.region,
            category: request.category,
            whatsapp_number: request.whatsapp_number,
            description: request.description,
            is_active: request.is_active,
        }
    }
}

/// Offer Update Handler
#[endpoint(
    tags("offers"),
    summary = "Update Offer",
    responses(
        (status_code = StatusCode::OK, description = "Offer updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Offer not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Offer failed validation"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "offers.update",
    skip(offer, json, depot),
    fields(offer_uuid = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    offer: PathParam<Uuid>,
    json: JsonBody<UpdateOfferRequest>,
    depot: &mut Depot,
) -> Result<Json<OfferResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let offer = offer.into_inner();
    let update = OfferUpdate::from(json.into_inner());

    tracing::Span::current().record("offer_uuid", tracing::field::display(offer));

    if update.is_empty() {
        return Err(StatusError::bad_request()
            .brief("Update must change at least one field")
            .into());
    }

    let updated = state
        .app
        .offers
        .update_offer(offer.into(), update)
        .await
        .map_err(into_api_error)?;

    tracing::info!(offer_uuid = %offer, "updated offer");

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use offerdesk_app::domain::offers::{
        MockOffersService, OffersServiceError, records::OfferUuid,
    };

    use crate::test_helpers::{make_offer, offers_service};

    use super::*;

    fn make_service(offers: MockOffersService) -> Service {
        offers_service(offers, Router::with_path("offers/{offer}").put(handler))
    }

    #[tokio::test]
    async fn test_update_forwards_partial_update() -> TestResult {
        let uuid = OfferUuid::new();

        let mut offers = MockOffersService::new();

        offers
            .expect_update_offer()
            .once()
            .withf(move |u, update| {
                *u == uuid
                    && *update
                        == OfferUpdate {
                            selling_price: Some(699),
                            is_active: Some(false),
                            ..OfferUpdate::default()
                        }
            })
            .return_once(move |_, _| {
                let mut offer = make_offer(uuid);
                offer.details.selling_price = 699;
                offer.is_active = false;
                Ok(offer)
            });

        let mut res = TestClient::put(format!("http://example.com/offers/{uuid}"))
            .json(&json!({ "selling_price": 699, "is_active": false }))
            .send(&make_service(offers))
            .await;

        let response: OfferResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(response.selling_price, 699);
        assert!(!response.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_empty_body_returns_400() -> TestResult {
        let mut offers = MockOffersService::new();

        offers.expect_update_offer().never();

        let res = TestClient::put(format!("http://example.com/offers/{}", OfferUuid::new()))
            .json(&json!({}))
            .send(&make_service(offers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_offer_returns_404() -> TestResult {
        let mut offers = MockOffersService::new();

        offers
            .expect_update_offer()
            .once()
            .return_once(|_, _| Err(OffersServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/offers/{}", OfferUuid::new()))
            .json(&json!({ "title": "Renamed" }))
            .send(&make_service(offers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_store_constraint_returns_400() -> TestResult {
        let mut offers = MockOffersService::new();

        offers
            .expect_update_offer()
            .once()
            .return_once(|_, _| Err(OffersServiceError::InvalidData(
                "new row for relation \"offers\" violates check constraint \"offers_title_check\""
                    .to_string(),
            )));

        let res = TestClient::put(format!("http://example.com/offers/{}", OfferUuid::new()))
            .json(&json!({ "validity_days": 30 }))
            .send(&make_service(offers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
