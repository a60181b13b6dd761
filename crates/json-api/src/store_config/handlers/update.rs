//! Set Store Config Value Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};

use crate::{
    extensions::*,
    state::State,
    store_config::{
        errors::into_status_error,
        models::{ConfigEntryResponse, SetConfigRequest},
    },
};

/// Set Store Config Value Handler
///
/// Inserts or replaces the value stored under `key`.
#[endpoint(
    tags("config"),
    summary = "Set Store Config Value",
    responses(
        (status_code = StatusCode::OK, description = "Value stored"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty key or invalid value"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "config.update", skip_all, fields(key = key.as_str()), err(Debug))]
pub(crate) async fn handler(
    key: PathParam<String>,
    json: JsonBody<SetConfigRequest>,
    depot: &mut Depot,
) -> Result<Json<ConfigEntryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let entry = state
        .app
        .config
        .set_value(key.into_inner(), request.value, request.description)
        .await
        .map_err(into_status_error)?;

    Ok(Json(entry.into()))
}
