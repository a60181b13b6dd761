//! Import Template Handler

use std::sync::Arc;

use salvo::prelude::*;

use offerdesk::export::template_csv;

use crate::{
    exports::errors::{config_failed, render_failed},
    extensions::*,
    state::State,
};

use super::render_csv;

const TEMPLATE_FILENAME: &str = "offers-template.csv";

/// Import Template Handler
///
/// Downloads a CSV with every import column and two sample rows.
#[endpoint(
    tags("exports"),
    summary = "Download Import Template",
    responses(
        (status_code = StatusCode::OK, description = "CSV template"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Template could not be rendered"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot, res: &mut Response) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let config = state
        .app
        .config
        .store_config()
        .await
        .map_err(config_failed)?;

    let text = template_csv(&config).map_err(render_failed)?;

    render_csv(res, TEMPLATE_FILENAME, text)
}
