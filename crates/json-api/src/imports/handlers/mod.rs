//! Import Handlers

use salvo::prelude::*;

use offerdesk_app::domain::imports::{ImportsServiceError, outcome::ImportOutcome};

use crate::{
    imports::{errors::into_status_error, models::ImportResponse},
    observability::{ImportOutcomeLabel, observe_import},
};

pub(crate) mod csv;
pub(crate) mod rows;

/// Record the outcome and pick the response status.
///
/// Validate-only runs answer 200, rejected batches 400 with the full report, and committed
/// batches 201.
fn respond(
    result: Result<ImportOutcome, ImportsServiceError>,
    submitted: usize,
    res: &mut Response,
) -> Result<Json<ImportResponse>, StatusError> {
    let outcome = result.map_err(|error| {
        if matches!(error, ImportsServiceError::Persistence(_)) {
            observe_import(ImportOutcomeLabel::Failed, submitted);
        }

        into_status_error(error)
    })?;

    let (label, status) = match &outcome {
        ImportOutcome::Validated(_) => (ImportOutcomeLabel::Validated, StatusCode::OK),
        ImportOutcome::Rejected(_) => (ImportOutcomeLabel::Rejected, StatusCode::BAD_REQUEST),
        ImportOutcome::Committed(_) => (ImportOutcomeLabel::Committed, StatusCode::CREATED),
    };

    observe_import(label, outcome.total_count());

    res.status_code(status);

    Ok(Json(outcome.into()))
}
