//! Store Config Index Handler

use std::{collections::BTreeMap, sync::Arc};

use salvo::prelude::*;
use serde_json::Value;

use crate::{extensions::*, state::State, store_config::errors::into_status_error};

/// Store Config Index Handler
///
/// Returns every stored key with its decoded value, sorted by key.
#[endpoint(tags("config"), summary = "Get Store Config")]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<BTreeMap<String, Value>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let values = state
        .app
        .config
        .get_config()
        .await
        .map_err(into_status_error)?;

    Ok(Json(values.into_iter().collect()))
}
