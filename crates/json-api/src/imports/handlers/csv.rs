//! Import CSV Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{extensions::*, imports::models::ImportResponse, state::State};

use super::respond;

/// Largest accepted CSV upload.
const MAX_CSV_BYTES: usize = 5 * 1024 * 1024;

/// Data rows in `text`: non-blank lines after the header.
fn submitted_rows(text: &str) -> usize {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .count()
        .saturating_sub(1)
}

/// Import CSV Handler
///
/// Imports raw CSV text sent as the request body.
#[endpoint(
    tags("imports"),
    summary = "Import CSV",
    responses(
        (status_code = StatusCode::OK, description = "Validation report"),
        (status_code = StatusCode::CREATED, description = "Offers imported"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed CSV or rows failed validation"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Import failed"),
    ),
)]
#[tracing::instrument(
    name = "imports.csv",
    skip(validate_only, req, depot, res),
    fields(bytes = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    validate_only: QueryParam<bool, false>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ImportResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let validate_only = validate_only.into_inner().unwrap_or(false);

    let payload = req
        .payload_with_max_size(MAX_CSV_BYTES)
        .await
        .or_400("could not read CSV body")?;

    let text = String::from_utf8(payload.to_vec()).or_400("CSV body must be UTF-8 text")?;

    tracing::Span::current().record("bytes", text.len());

    let submitted = submitted_rows(&text);

    let result = state.app.imports.import_csv(text, validate_only).await;

    respond(result, submitted, res)
}
