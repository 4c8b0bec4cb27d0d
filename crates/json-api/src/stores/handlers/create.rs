//! Onboard Store Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use bazaar_app::domain::stores::{data::NewStore, records::StoreUuid};

use crate::{
    extensions::*,
    state::State,
    stores::{errors::into_status_error, models::StoreResponse},
};

/// Onboard Store Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateStoreRequest {
    pub name: String,
    pub description: Option<String>,
}

/// Onboard Store Handler
///
/// Creates the caller's store. Each store user owns at most one.
#[endpoint(
    tags("stores"),
    summary = "Onboard Store",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Store created"),
        (status_code = StatusCode::CONFLICT, description = "Caller already owns a store"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateStoreRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<StoreResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;
    let request = json.into_inner();

    let store = state
        .app
        .stores
        .onboard_store(
            caller.user,
            NewStore {
                uuid: StoreUuid::new(),
                name: request.name,
                description: request.description,
            },
        )
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(store.into()))
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::stores::{MockStoresService, StoresServiceError};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        stores::models::fixtures::make_store,
        test_helpers::{Mocks, TEST_STORE_OWNER},
    };

    use super::*;

    fn make_service(stores: MockStoresService) -> Service {
        Mocks {
            stores,
            ..Mocks::default()
        }
        .service(TEST_STORE_OWNER, Router::with_path("stores").post(handler))
    }

    #[tokio::test]
    async fn test_onboard_store_success() -> TestResult {
        let store = make_store(TEST_STORE_OWNER.user);
        let uuid = store.uuid;

        let mut stores = MockStoresService::new();

        stores
            .expect_onboard_store()
            .once()
            .withf(|owner, new| *owner == TEST_STORE_OWNER.user && new.name == "Corner Bakery")
            .return_once(move |_, _| Ok(store));

        let mut res = TestClient::post("http://example.com/stores")
            .json(&json!({ "name": "Corner Bakery" }))
            .send(&make_service(stores))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: StoreResponse = res.take_json().await?;

        assert_eq!(body.id, uuid.into_uuid());
        assert_eq!(body.owner_id, TEST_STORE_OWNER.user.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_second_store_returns_409() -> TestResult {
        let mut stores = MockStoresService::new();

        stores
            .expect_onboard_store()
            .once()
            .return_once(|_, _| Err(StoresServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/stores")
            .json(&json!({ "name": "Second Shop" }))
            .send(&make_service(stores))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
