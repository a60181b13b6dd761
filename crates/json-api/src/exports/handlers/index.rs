//! Export Offers Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::extract::QueryParam, prelude::*};

use offerdesk::export::to_csv;

use crate::{
    exports::{
        errors::{load_failed, render_failed},
        models::ExportResponse,
    },
    extensions::*,
    state::State,
};

use super::render_csv;

const EXPORT_FILENAME: &str = "offers-export.csv";

/// Export Offers Handler
///
/// Exports every offer, including deactivated ones, as JSON (the default) or as a CSV file.
#[endpoint(
    tags("exports"),
    summary = "Export Offers",
    responses(
        (status_code = StatusCode::OK, description = "Exported offers", body = ExportResponse),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown format"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Export failed"),
    ),
)]
#[tracing::instrument(name = "exports.index", skip(format, depot, res), err(Debug))]
pub(crate) async fn handler(
    format: QueryParam<String, false>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let csv = match format.into_inner().as_deref().map(str::to_ascii_lowercase) {
        None => false,
        Some(format) if format == "json" => false,
        Some(format) if format == "csv" => true,
        Some(_) => {
            return Err(StatusError::bad_request().brief("format must be csv or json"));
        }
    };

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let offers = state.app.offers.export_all().await.map_err(load_failed)?;

    if csv {
        let text = to_csv(offers.iter().map(|offer| &offer.details)).map_err(render_failed)?;

        return render_csv(res, EXPORT_FILENAME, text);
    }

    let data: Vec<_> = offers.into_iter().map(Into::into).collect();

    res.render(Json(ExportResponse {
        count: data.len(),
        data,
        exported_at: Timestamp::now().to_string(),
    }));

    Ok(())
}
