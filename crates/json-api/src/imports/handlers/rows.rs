//! Import Rows Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    extensions::*,
    imports::models::{ImportResponse, ImportRowsRequest},
    state::State,
};

use super::respond;

/// Import Rows Handler
///
/// Imports rows a client has already parsed. Rows are validated again before anything is stored.
#[endpoint(
    tags("imports"),
    summary = "Import Parsed Rows",
    responses(
        (status_code = StatusCode::OK, description = "Validation report"),
        (status_code = StatusCode::CREATED, description = "Offers imported"),
        (status_code = StatusCode::BAD_REQUEST, description = "Rows failed validation"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Import failed"),
    ),
)]
#[tracing::instrument(
    name = "imports.rows",
    skip(json, depot, res),
    fields(rows = tracing::field::Empty, validate_only = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    json: JsonBody<ImportRowsRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ImportResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();
    let validate_only = request.validate_only;
    let rows = request.into_raw_rows();
    let submitted = rows.len();

    let span = tracing::Span::current();

    span.record("rows", submitted);
    span.record("validate_only", validate_only);

    let result = state.app.imports.import_rows(rows, validate_only).await;

    respond(result, submitted, res)
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use offerdesk::{
        offers::Field,
        pipeline::{ImportReport, ImportStage},
        validate::{Rule, ValidationError},
    };
    use offerdesk_app::domain::{
        imports::{
            ImportsServiceError, MockImportsService,
            outcome::{CommittedImport, ImportOutcome},
        },
        offers::records::{OfferRecord, OfferUuid},
    };

    use crate::test_helpers::{imports_service, offer_details};

    use super::*;

    fn make_service(imports: MockImportsService) -> Service {
        imports_service(imports, Router::with_path("imports").post(handler))
    }

    fn body(validate_only: bool) -> serde_json::Value {
        json!({
            "rows": [{
                "operator": "GP",
                "title": "50GB Bundle",
                "data_amount": "50GB",
                "selling_price": 775,
                "validity_days": 30
            }],
            "validate_only": validate_only
        })
    }

    #[tokio::test]
    async fn test_commit_returns_201_with_offers() -> TestResult {
        let mut imports = MockImportsService::new();

        imports
            .expect_import_rows()
            .once()
            .withf(|rows, validate_only| {
                !*validate_only
                    && rows.len() == 1
                    && rows.first().and_then(|row| row.field(Field::SellingPrice)) == Some("775")
            })
            .return_once(|_, _| {
                let now = Timestamp::UNIX_EPOCH;

                Ok(ImportOutcome::Committed(CommittedImport {
                    imported_count: 1,
                    total_count: 1,
                    offers: vec![OfferRecord {
                        uuid: OfferUuid::new(),
                        details: offer_details("GP", 775),
                        is_active: true,
                        created_at: now,
                        updated_at: now,
                    }],
                }))
            });

        let mut res = TestClient::post("http://example.com/imports")
            .json(&body(false))
            .send(&make_service(imports))
            .await;

        let response: ImportResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(response.stage, "committed");
        assert_eq!(response.imported_count, Some(1));
        assert_eq!(response.total_count, 1);
        assert_eq!(response.offers.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_rejection_returns_400_with_report() -> TestResult {
        let mut imports = MockImportsService::new();

        imports.expect_import_rows().once().return_once(|_, _| {
            Ok(ImportOutcome::Rejected(ImportReport {
                stage: ImportStage::ValidationFailed,
                valid: false,
                valid_count: 0,
                total_count: 1,
                errors: vec![ValidationError {
                    row: 1,
                    field: Field::Operator,
                    value: "Teletalk".to_string(),
                    message: "operator must be one of: GP, Robi, Banglalink, Airtel, Skitto"
                        .to_string(),
                    rule: Rule::Operator,
                }],
                persist_error: None,
            }))
        });

        let mut res = TestClient::post("http://example.com/imports")
            .json(&body(false))
            .send(&make_service(imports))
            .await;

        let response: ImportResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(response.stage, "validation_failed");
        assert!(!response.valid);
        assert_eq!(
            response.errors.first().map(|e| (e.row, e.rule.as_str())),
            Some((1, "operator"))
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_validate_only_returns_200() -> TestResult {
        let mut imports = MockImportsService::new();

        imports
            .expect_import_rows()
            .once()
            .withf(|_, validate_only| *validate_only)
            .return_once(|_, _| {
                Ok(ImportOutcome::Validated(ImportReport {
                    stage: ImportStage::ReadyToPersist,
                    valid: true,
                    valid_count: 1,
                    total_count: 1,
                    errors: Vec::new(),
                    persist_error: None,
                }))
            });

        let mut res = TestClient::post("http://example.com/imports")
            .json(&body(true))
            .send(&make_service(imports))
            .await;

        let response: ImportResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(response.valid);
        assert_eq!(response.imported_count, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_store_failure_returns_500() -> TestResult {
        let mut imports = MockImportsService::new();

        imports.expect_import_rows().once().return_once(|_, _| {
            Err(ImportsServiceError::Persistence(
                "storage error: deadlock detected".to_string(),
            ))
        });

        let res = TestClient::post("http://example.com/imports")
            .json(&body(false))
            .send(&make_service(imports))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
