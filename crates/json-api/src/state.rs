//! Shared handler state, injected into the depot once per process.

use std::sync::Arc;

use bazaar_app::context::AppContext;

/// Every domain service the handlers reach, behind trait objects so tests
/// can swap in mocks.
#[derive(Clone, Debug)]
pub(crate) struct State {
    pub(crate) app: AppContext,
}

impl State {
    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self { app })
    }
}
