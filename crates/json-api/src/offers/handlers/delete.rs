//! Delete Offer Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, offers::errors::into_status_error, state::State};

/// Delete Offer Handler
///
/// Deactivates the offer; the row is kept and still appears in exports.
#[endpoint(
    tags("offers"),
    summary = "Delete Offer",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Offer deactivated"),
        (status_code = StatusCode::NOT_FOUND, description = "Offer not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    offer: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .offers
        .soft_delete_offer(offer.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}
