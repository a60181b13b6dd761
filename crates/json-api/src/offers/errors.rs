//! Offer Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use offerdesk_app::domain::offers::OffersServiceError;

use crate::errors::ApiError;

pub(crate) fn into_status_error(error: OffersServiceError) -> StatusError {
    match error {
        OffersServiceError::AlreadyExists => StatusError::conflict().brief("Offer already exists"),
        OffersServiceError::InvalidReference
        | OffersServiceError::MissingRequiredData(_)
        | OffersServiceError::InvalidData(_) => {
            StatusError::bad_request().brief("Invalid offer payload")
        }
        OffersServiceError::Validation(errors) => {
            warn!(errors = errors.len(), "offer failed validation");

            StatusError::bad_request().brief("Offer failed validation")
        }
        OffersServiceError::Sql(source) => {
            error!("offer store error: {source}");

            StatusError::internal_server_error()
        }
        OffersServiceError::NotFound => StatusError::not_found().brief("Offer not found"),
    }
}

/// Like [`into_status_error`], but validation failures keep their error list.
pub(crate) fn into_api_error(error: OffersServiceError) -> ApiError {
    match error {
        OffersServiceError::Validation(errors) => {
            ApiError::validation("Offer failed validation", errors)
        }
        other => into_status_error(other).into(),
    }
}
