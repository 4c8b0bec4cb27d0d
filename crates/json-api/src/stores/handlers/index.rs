//! List Stores Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    stores::{errors::into_status_error, models::StoreResponse},
};

/// List Stores Handler
///
/// Newest stores first.
#[endpoint(
    tags("stores"),
    summary = "List Stores",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<StoreResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let stores = state
        .app
        .stores
        .list_stores()
        .await
        .map_err(into_status_error)?;

    Ok(Json(stores.into_iter().map(StoreResponse::from).collect()))
}
