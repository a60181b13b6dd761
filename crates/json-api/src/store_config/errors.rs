//! Store Config Errors

use salvo::http::StatusError;
use tracing::error;

use offerdesk_app::domain::config::ConfigServiceError;

pub(crate) fn into_status_error(error: ConfigServiceError) -> StatusError {
    match error {
        ConfigServiceError::NotFound => StatusError::not_found().brief("Config key not found"),
        ConfigServiceError::EmptyKey => {
            StatusError::bad_request().brief("Config key cannot be empty")
        }
        ConfigServiceError::InvalidData => StatusError::bad_request().brief("Invalid config value"),
        ConfigServiceError::Sql(source) => {
            error!("config store error: {source}");

            StatusError::internal_server_error()
        }
    }
}
