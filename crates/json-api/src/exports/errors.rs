//! Export Errors

use salvo::http::StatusError;
use tracing::error;

use offerdesk::export::ExportError;
use offerdesk_app::domain::{config::ConfigServiceError, offers::OffersServiceError};

pub(crate) fn load_failed(error: OffersServiceError) -> StatusError {
    error!("failed to load offers for export: {error}");

    StatusError::internal_server_error().brief("Export failed")
}

pub(crate) fn config_failed(error: ConfigServiceError) -> StatusError {
    error!("failed to load store config for export: {error}");

    StatusError::internal_server_error().brief("Export failed")
}

pub(crate) fn render_failed(error: ExportError) -> StatusError {
    error!("failed to render export: {error}");

    StatusError::internal_server_error().brief("Export failed")
}
