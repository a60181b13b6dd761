//! Create Offer Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use offerdesk::{
    config::StoreConfig,
    normalize::canonicalize,
    offers::{DEFAULT_CATEGORY, OfferDetails},
};

use crate::{
    errors::ApiError,
    extensions::*,
    offers::{errors::into_api_error, models::OfferResponse},
    state::State,
};

/// Create Offer Request
///
/// Absent optional fields take the same defaults as a CSV import.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOfferRequest {
    pub operator: String,
    pub title: String,
    pub data_amount: String,
    #[serde(default)]
    pub minutes: u32,
    pub validity_days: u32,
    pub selling_price: u32,
    #[serde(default)]
    pub original_price: Option<u32>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub whatsapp_number: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateOfferRequest {
    fn into_details(self, config: &StoreConfig) -> OfferDetails {
        fn or_default(value: Option<String>, default: &str) -> String {
            value
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        }

        canonicalize(OfferDetails {
            operator: self.operator.trim().to_string(),
            title: self.title.trim().to_string(),
            data_amount: self.data_amount.trim().to_string(),
            minutes: self.minutes,
            validity_days: self.validity_days,
            selling_price: self.selling_price,
            original_price: self.original_price,
            region: or_default(self.region, &config.default_region),
            category: or_default(self.category, DEFAULT_CATEGORY.as_str()),
            whatsapp_number: or_default(self.whatsapp_number, &config.default_whatsapp),
            description: self
                .description
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
        })
    }
}

/// Create Offer Handler
#[endpoint(
    tags("offers"),
    summary = "Create Offer",
    responses(
        (status_code = StatusCode::CREATED, description = "Offer created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Offer failed validation"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOfferRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OfferResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let config = state
        .app
        .config
        .store_config()
        .await
        .or_500("failed to load store config")?;

    let offer = state
        .app
        .offers
        .create_offer(json.into_inner().into_details(&config))
        .await
        .map_err(into_api_error)?;

    res.add_header(LOCATION, format!("/offers/{}", offer.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    info!(offer_uuid = %offer.uuid, "created offer");

    Ok(Json(offer.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use offerdesk::{
        offers::Field,
        validate::{Rule, ValidationError},
    };
    use offerdesk_app::domain::{
        config::MockConfigService,
        offers::{MockOffersService, OffersServiceError, records::OfferUuid},
    };

    use crate::{
        errors::ValidationErrorsResponse,
        test_helpers::{make_offer, offers_and_config_service},
    };

    use super::*;

    fn default_config() -> MockConfigService {
        let mut config = MockConfigService::new();

        config
            .expect_store_config()
            .returning(|| Ok(StoreConfig::default()));

        config
    }

    fn make_service(offers: MockOffersService) -> Service {
        offers_and_config_service(
            offers,
            default_config(),
            Router::with_path("offers").post(handler),
        )
    }

    fn body() -> serde_json::Value {
        json!({
            "operator": "GP",
            "title": "50GB Bundle",
            "data_amount": "50GB",
            "validity_days": 30,
            "selling_price": 775
        })
    }

    #[tokio::test]
    async fn test_create_fills_defaults_and_returns_201() -> TestResult {
        let uuid = OfferUuid::new();

        let mut offers = MockOffersService::new();

        offers
            .expect_create_offer()
            .once()
            .withf(|details| {
                details.minutes == 0
                    && details.region == "All Bangladesh"
                    && details.category == "data"
                    && details.whatsapp_number == "+8801712345678"
            })
            .return_once(move |_| Ok(make_offer(uuid)));

        let mut res = TestClient::post("http://example.com/offers")
            .json(&body())
            .send(&make_service(offers))
            .await;

        let location = res
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned);

        let response: OfferResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/offers/{uuid}")));
        assert_eq!(response.uuid, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_stores_canonical_spelling() -> TestResult {
        let mut offers = MockOffersService::new();

        offers
            .expect_create_offer()
            .once()
            .withf(|details| details.operator == "GP" && details.category == "combo")
            .return_once(|_| Ok(make_offer(OfferUuid::new())));

        let res = TestClient::post("http://example.com/offers")
            .json(&json!({
                "operator": "gp",
                "title": "50GB + 1500 Minutes",
                "data_amount": "50GB",
                "minutes": 1500,
                "validity_days": 30,
                "selling_price": 775,
                "category": "COMBO"
            }))
            .send(&make_service(offers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_validation_failure_lists_errors() -> TestResult {
        let mut offers = MockOffersService::new();

        offers.expect_create_offer().once().return_once(|_| {
            Err(OffersServiceError::Validation(vec![ValidationError {
                row: 1,
                field: Field::SellingPrice,
                value: "0".to_string(),
                message: "selling_price must be a whole number between 1 and 10000".to_string(),
                rule: Rule::PriceRange,
            }]))
        });

        let mut res = TestClient::post("http://example.com/offers")
            .json(&body())
            .send(&make_service(offers))
            .await;

        let response: ValidationErrorsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(response.errors.len(), 1);
        assert_eq!(
            response.errors.first().map(|e| (e.field.as_str(), e.rule.as_str())),
            Some(("selling_price", "price_range"))
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_create_missing_field_returns_400() -> TestResult {
        let mut offers = MockOffersService::new();

        offers.expect_create_offer().never();

        let res = TestClient::post("http://example.com/offers")
            .json(&json!({ "operator": "GP" }))
            .send(&make_service(offers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[test]
    fn blank_optional_fields_take_configured_defaults() -> TestResult {
        let request = CreateOfferRequest {
            region: Some("  ".to_string()),
            whatsapp_number: None,
            description: Some(" ".to_string()),
            ..serde_json::from_value(body())?
        };

        let config = StoreConfig {
            default_region: "Dhaka".to_string(),
            default_whatsapp: "+8801900000000".to_string(),
            ..StoreConfig::default()
        };

        let details = request.into_details(&config);

        assert_eq!(details.region, "Dhaka");
        assert_eq!(details.whatsapp_number, "+8801900000000");
        assert_eq!(details.description, None);

        Ok(())
    }
}
