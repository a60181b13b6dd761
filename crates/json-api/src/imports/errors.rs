//! Import Errors

use salvo::http::StatusError;
use tracing::error;

use offerdesk::pipeline::ImportError;
use offerdesk_app::domain::imports::ImportsServiceError;

pub(crate) fn into_status_error(error: ImportsServiceError) -> StatusError {
    match error {
        ImportsServiceError::Import(
            ref source @ (ImportError::Format(_)
            | ImportError::MissingHeaders(_)
            | ImportError::NoRows),
        ) => StatusError::bad_request().brief(source.to_string()),
        ImportsServiceError::Import(source @ ImportError::InvalidStage { .. }) => {
            error!("import pipeline out of order: {source}");

            StatusError::internal_server_error()
        }
        ImportsServiceError::Config(source) => {
            error!("failed to load store config for import: {source}");

            StatusError::internal_server_error()
        }
        ImportsServiceError::Persistence(message) => {
            error!("store rejected import batch: {message}");

            StatusError::internal_server_error()
                .brief("Import failed")
                .detail(message)
        }
    }
}
