//! Delete Store Config Value Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{extensions::*, state::State, store_config::errors::into_status_error};

/// Delete Store Config Value Handler
///
/// Removes the key; built-in defaults apply again where one exists.
#[endpoint(
    tags("config"),
    summary = "Delete Store Config Value",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Value removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Config key not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    key: PathParam<String>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .config
        .delete_value(key.into_inner())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use offerdesk_app::domain::config::{ConfigServiceError, MockConfigService};

    use crate::test_helpers::config_service;

    use super::*;

    fn make_service(config: MockConfigService) -> Service {
        config_service(config, Router::with_path("config/{key}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_returns_204() -> TestResult {
        let mut config = MockConfigService::new();

        config
            .expect_delete_value()
            .once()
            .withf(|key| key == "company_name")
            .return_once(|_| Ok(()));

        let res = TestClient::delete("http://example.com/config/company_name")
            .send(&make_service(config))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_key_returns_404() -> TestResult {
        let mut config = MockConfigService::new();

        config
            .expect_delete_value()
            .once()
            .return_once(|_| Err(ConfigServiceError::NotFound));

        let res = TestClient::delete("http://example.com/config/missing")
            .send(&make_service(config))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
