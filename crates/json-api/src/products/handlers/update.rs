//! Update Product Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::products::data::ProductUpdate;

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::ProductResponse},
    state::State,
};

/// Update Product Request
///
/// Omitted fields keep their current value. Price changes do not touch
/// existing campaign participations.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct UpdateProductRequest {
    pub name: Option<String>,

    #[salvo(schema(value_type = Option<f64>))]
    pub price: Option<Decimal>,

    pub category_id: Option<Uuid>,
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        ProductUpdate {
            category: request.category_id.map(Into::into),
            name: request.name,
            price: request.price,
        }
    }
}

/// Update Product Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;
    let product = product.into_inner();
    let request = json.into_inner();

    let updated = state
        .app
        .products
        .update_product(caller.user, product.into(), request.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(product_uuid = %product, price = %updated.price, "updated product");

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::products::{
        MockProductsService, ProductsServiceError, records::ProductUuid,
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        products::models::fixtures::make_product,
        test_helpers::{Mocks, TEST_STORE_OWNER},
    };

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        Mocks {
            products,
            ..Mocks::default()
        }
        .service(
            TEST_STORE_OWNER,
            Router::with_path("products/{product}").patch(handler),
        )
    }

    #[tokio::test]
    async fn test_update_product_price() -> TestResult {
        let uuid = ProductUuid::new();
        let mut product = make_product(uuid);
        product.price = Decimal::new(500, 2);

        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .withf(move |owner, requested, update| {
                *owner == TEST_STORE_OWNER.user
                    && *requested == uuid
                    && *update
                        == ProductUpdate {
                            category: None,
                            name: None,
                            price: Some(Decimal::new(500, 2)),
                        }
            })
            .return_once(move |_, _, _| Ok(product));

        let mut res = TestClient::patch(format!("http://example.com/products/{uuid}"))
            .json(&json!({ "price": 5 }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(body.price, Decimal::new(500, 2));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_unknown_product_returns_404() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .return_once(|_, _, _| Err(ProductsServiceError::NotFound));

        let res = TestClient::patch(format!("http://example.com/products/{}", Uuid::now_v7()))
            .json(&json!({ "name": "Rye" }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
