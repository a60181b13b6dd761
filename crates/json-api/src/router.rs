//! App Router

use salvo::Router;

use crate::{exports, imports, offers, store_config};

/// Every resource route; health, metrics and docs are mounted by `main`.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(
            Router::with_path("offers")
                .get(offers::index::handler)
                .post(offers::create::handler)
                .push(
                    Router::with_path("{offer}")
                        .get(offers::get::handler)
                        .put(offers::update::handler)
                        .delete(offers::delete::handler),
                ),
        )
        .push(
            Router::with_path("imports")
                .post(imports::rows::handler)
                .push(Router::with_path("csv").post(imports::csv::handler)),
        )
        .push(
            Router::with_path("exports")
                .get(exports::index::handler)
                .push(Router::with_path("template").get(exports::template::handler))
                .push(Router::with_path("stats").get(exports::stats::handler)),
        )
        .push(
            Router::with_path("config")
                .get(store_config::index::handler)
                .push(
                    Router::with_path("{key}")
                        .put(store_config::update::handler)
                        .delete(store_config::delete::handler),
                ),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use offerdesk_app::domain::offers::MockOffersService;

    use crate::{
        exports::models::StatsResponse,
        test_helpers::{state_with, strict_config_mock, strict_imports_mock},
    };

    use super::*;

    #[tokio::test]
    async fn test_routes_are_mounted() -> TestResult {
        let mut offers = MockOffersService::new();

        offers.expect_export_all().once().return_once(|| Ok(Vec::new()));

        let state = state_with(offers, strict_config_mock(), strict_imports_mock());
        let service = Service::new(Router::new().hoop(inject(state)).push(app_router()));

        let stats: StatsResponse = TestClient::get("http://example.com/exports/stats")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(stats.total_offers, 0);

        let missing = TestClient::get("http://example.com/carts")
            .send(&service)
            .await;

        assert_eq!(missing.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
