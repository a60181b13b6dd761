//! Offer Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use offerdesk::view::SortOrder;
use offerdesk_app::domain::offers::data::{DEFAULT_LIMIT, OffersFilter, OffersSortBy};

use crate::{
    extensions::*,
    offers::{errors::into_status_error, models::OffersResponse},
    state::State,
};

fn parse_sort_by(value: &str) -> Result<OffersSortBy, StatusError> {
    match value {
        "created_at" => Ok(OffersSortBy::CreatedAt),
        "selling_price" => Ok(OffersSortBy::SellingPrice),
        "validity_days" => Ok(OffersSortBy::ValidityDays),
        _ => Err(StatusError::bad_request()
            .brief("sort_by must be one of: created_at, selling_price, validity_days")),
    }
}

fn parse_sort_order(value: &str) -> Result<SortOrder, StatusError> {
    match value.to_ascii_lowercase().as_str() {
        "asc" => Ok(SortOrder::Asc),
        "desc" => Ok(SortOrder::Desc),
        _ => Err(StatusError::bad_request().brief("sort_order must be asc or desc")),
    }
}

/// Offer Index Handler
///
/// Returns one page of offers, newest first unless another order is requested.
#[endpoint(tags("offers"), summary = "List Offers")]
#[expect(
    clippy::too_many_arguments,
    reason = "each query parameter is a separate extractor."
)]
pub(crate) async fn handler(
    operator: QueryParam<String, false>,
    category: QueryParam<String, false>,
    region: QueryParam<String, false>,
    min_price: QueryParam<u32, false>,
    max_price: QueryParam<u32, false>,
    sort_by: QueryParam<String, false>,
    sort_order: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    include_inactive: QueryParam<bool, false>,
    depot: &mut Depot,
) -> Result<Json<OffersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = OffersFilter {
        operator: operator.into_inner(),
        category: category.into_inner(),
        region: region.into_inner(),
        min_price: min_price.into_inner(),
        max_price: max_price.into_inner(),
        sort_by: sort_by
            .into_inner()
            .as_deref()
            .map(parse_sort_by)
            .transpose()?
            .unwrap_or_default(),
        sort_order: sort_order
            .into_inner()
            .as_deref()
            .map(parse_sort_order)
            .transpose()?
            .unwrap_or(SortOrder::Desc),
        page: page.into_inner().unwrap_or(1),
        limit: limit.into_inner().unwrap_or(DEFAULT_LIMIT),
        include_inactive: include_inactive.into_inner().unwrap_or(false),
    }
    .normalized();

    let (page, limit) = (filter.page, filter.limit);

    let offers = state
        .app
        .offers
        .list_offers(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OffersResponse {
        offers: offers.into_iter().map(Into::into).collect(),
        page,
        limit,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use offerdesk_app::domain::offers::{
        MockOffersService, OffersServiceError, records::OfferUuid,
    };

    use crate::test_helpers::{make_offer, offers_service};

    use super::*;

    fn make_service(offers: MockOffersService) -> Service {
        offers_service(offers, Router::with_path("offers").get(handler))
    }

    #[tokio::test]
    async fn test_index_uses_listing_defaults() -> TestResult {
        let mut offers = MockOffersService::new();

        offers
            .expect_list_offers()
            .once()
            .withf(|filter| *filter == OffersFilter::default())
            .return_once(|_| Ok(vec![]));

        let response: OffersResponse = TestClient::get("http://example.com/offers")
            .send(&make_service(offers))
            .await
            .take_json()
            .await?;

        assert!(response.offers.is_empty());
        assert_eq!((response.page, response.limit), (1, 20));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_filters() -> TestResult {
        let mut offers = MockOffersService::new();

        offers
            .expect_list_offers()
            .once()
            .withf(|filter| {
                filter.operator.as_deref() == Some("robi")
                    && filter.region.is_none()
                    && filter.min_price == Some(100)
                    && filter.sort_by == OffersSortBy::SellingPrice
                    && filter.sort_order == SortOrder::Asc
                    && filter.page == 2
                    && filter.limit == 100
                    && filter.include_inactive
            })
            .return_once(|_| Ok(vec![]));

        let res = TestClient::get(
            "http://example.com/offers?operator=robi&region=All%20Bangladesh&min_price=100\
             &sort_by=selling_price&sort_order=ASC&page=2&limit=500&include_inactive=true",
        )
        .send(&make_service(offers))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_returns_offers_in_service_order() -> TestResult {
        let first = OfferUuid::new();
        let second = OfferUuid::new();

        let mut offers = MockOffersService::new();

        offers
            .expect_list_offers()
            .once()
            .return_once(move |_| Ok(vec![make_offer(first), make_offer(second)]));

        let response: OffersResponse = TestClient::get("http://example.com/offers")
            .send(&make_service(offers))
            .await
            .take_json()
            .await?;

        let uuids: Vec<_> = response.offers.iter().map(|offer| offer.uuid).collect();

        assert_eq!(uuids, [first.into_uuid(), second.into_uuid()]);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_unknown_sort_returns_400() -> TestResult {
        let mut offers = MockOffersService::new();

        offers.expect_list_offers().never();

        let res = TestClient::get("http://example.com/offers?sort_by=title")
            .send(&make_service(offers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_service_error_returns_500() -> TestResult {
        let mut offers = MockOffersService::new();

        offers
            .expect_list_offers()
            .once()
            .return_once(|_| Err(OffersServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/offers")
            .send(&make_service(offers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
