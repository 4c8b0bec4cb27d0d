//! Test helpers.

use std::sync::Arc;

use bazaar_app::{
    auth::{Caller, MockAuthService, Role, UserUuid},
    context::AppContext,
    domain::{
        campaigns::MockCampaignsService, categories::MockCategoriesService,
        participations::MockParticipationsService, products::MockProductsService,
        stores::MockStoresService,
    },
};
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State};

pub(crate) const TEST_ADMIN: Caller = Caller {
    user: UserUuid::from_uuid(Uuid::from_u128(1)),
    role: Role::Admin,
};

pub(crate) const TEST_STORE_OWNER: Caller = Caller {
    user: UserUuid::from_uuid(Uuid::from_u128(2)),
    role: Role::Store,
};

/// Hoop that authenticates every request as a fixed caller.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WithCaller(Caller);

#[salvo::handler]
impl WithCaller {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_caller(self.0);
        ctrl.call_next(req, depot, res).await;
    }
}

pub(crate) const fn with_caller(caller: Caller) -> WithCaller {
    WithCaller(caller)
}

/// Service mocks for one test. Mocks without expectations fail on any call.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) auth: MockAuthService,
    pub(crate) stores: MockStoresService,
    pub(crate) categories: MockCategoriesService,
    pub(crate) products: MockProductsService,
    pub(crate) campaigns: MockCampaignsService,
    pub(crate) participations: MockParticipationsService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            auth: Arc::new(self.auth),
            stores: Arc::new(self.stores),
            categories: Arc::new(self.categories),
            products: Arc::new(self.products),
            campaigns: Arc::new(self.campaigns),
            participations: Arc::new(self.participations),
        })
    }

    /// Serve `route` as `caller`.
    pub(crate) fn service(self, caller: Caller, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(with_caller(caller))
                .push(route),
        )
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    Mocks {
        auth,
        ..Mocks::default()
    }
    .into_state()
}
