//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use offerdesk::offers::{DEFAULT_REGION, OfferDetails};
use offerdesk_app::{
    context::AppContext,
    domain::{
        config::MockConfigService,
        imports::MockImportsService,
        offers::{
            MockOffersService,
            records::{OfferRecord, OfferUuid},
        },
    },
};
use salvo::{affix_state::inject, prelude::*};

use crate::state::State;

pub(crate) fn strict_offers_mock() -> MockOffersService {
    let mut offers = MockOffersService::new();

    offers.expect_list_offers().never();
    offers.expect_get_offer().never();
    offers.expect_create_offer().never();
    offers.expect_insert_batch().never();
    offers.expect_update_offer().never();
    offers.expect_soft_delete_offer().never();
    offers.expect_export_all().never();

    offers
}

pub(crate) fn strict_config_mock() -> MockConfigService {
    let mut config = MockConfigService::new();

    config.expect_get_config().never();
    config.expect_store_config().never();
    config.expect_set_value().never();
    config.expect_delete_value().never();

    config
}

pub(crate) fn strict_imports_mock() -> MockImportsService {
    let mut imports = MockImportsService::new();

    imports.expect_import_rows().never();
    imports.expect_import_csv().never();

    imports
}

pub(crate) fn state_with(
    offers: MockOffersService,
    config: MockConfigService,
    imports: MockImportsService,
) -> Arc<State> {
    State::from_app_context(AppContext {
        offers: Arc::new(offers),
        config: Arc::new(config),
        imports: Arc::new(imports),
    })
}

fn service(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
}

pub(crate) fn offers_service(offers: MockOffersService, route: Router) -> Service {
    service(
        state_with(offers, strict_config_mock(), strict_imports_mock()),
        route,
    )
}

pub(crate) fn offers_and_config_service(
    offers: MockOffersService,
    config: MockConfigService,
    route: Router,
) -> Service {
    service(state_with(offers, config, strict_imports_mock()), route)
}

pub(crate) fn config_service(config: MockConfigService, route: Router) -> Service {
    service(
        state_with(strict_offers_mock(), config, strict_imports_mock()),
        route,
    )
}

pub(crate) fn imports_service(imports: MockImportsService, route: Router) -> Service {
    service(
        state_with(strict_offers_mock(), strict_config_mock(), imports),
        route,
    )
}

pub(crate) fn offer_details(operator: &str, selling_price: u32) -> OfferDetails {
    OfferDetails {
        operator: operator.to_string(),
        title: format!("{operator} Pack"),
        data_amount: "10GB".to_string(),
        minutes: 0,
        validity_days: 30,
        selling_price,
        original_price: None,
        region: DEFAULT_REGION.to_string(),
        category: "data".to_string(),
        whatsapp_number: "+8801712345678".to_string(),
        description: None,
    }
}

pub(crate) fn make_offer(uuid: OfferUuid) -> OfferRecord {
    OfferRecord {
        uuid,
        details: offer_details("GP", 100),
        is_active: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
