//! Get My Store Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    stores::{errors::into_status_error, models::StoreResponse},
};

/// Get My Store Handler
#[endpoint(
    tags("stores"),
    summary = "Get My Store",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<StoreResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let store = state
        .app
        .stores
        .get_store_for_owner(caller.user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(store.into()))
}
