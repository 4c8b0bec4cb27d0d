//! List Products Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::ProductResponse},
    state::State,
};

/// List Products Handler
///
/// Returns the products of the caller's store.
#[endpoint(
    tags("products"),
    summary = "List Products",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let products = state
        .app
        .products
        .list_products(caller.user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::products::{MockProductsService, records::ProductUuid};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        products::models::fixtures::make_product,
        test_helpers::{Mocks, TEST_STORE_OWNER},
    };

    use super::*;

    #[tokio::test]
    async fn test_list_products() -> TestResult {
        let first = ProductUuid::new();
        let second = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|owner| *owner == TEST_STORE_OWNER.user)
            .return_once(move |_| Ok(vec![make_product(first), make_product(second)]));

        let service = Mocks {
            products,
            ..Mocks::default()
        }
        .service(TEST_STORE_OWNER, Router::with_path("products").get(handler));

        let mut res = TestClient::get("http://example.com/products")
            .send(&service)
            .await;

        let body: Vec<ProductResponse> = res.take_json().await?;

        assert_eq!(
            body.iter().map(|product| product.id).collect::<Vec<_>>(),
            vec![first.into_uuid(), second.into_uuid()]
        );

        Ok(())
    }
}
