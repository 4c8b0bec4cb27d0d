//! API routes.
//!
//! Category listing is public. Everything else sits behind the bearer token
//! middleware and is then split by role.

use salvo::prelude::*;

use crate::{
    auth::{self, require_admin, require_store},
    campaigns, categories, participations, products, stores,
};

fn store_routes() -> Router {
    Router::new()
        .hoop(require_store)
        .push(
            Router::with_path("campaign-participations")
                .get(participations::index::handler)
                .post(participations::submit::handler)
                .push(Router::with_path("available").get(participations::available::handler))
                .push(Router::with_path("{participation}").delete(participations::withdraw::handler)),
        )
        .push(
            Router::with_path("stores")
                .post(stores::create::handler)
                .push(Router::with_path("me").get(stores::me::handler)),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .patch(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
}

fn admin_routes() -> Router {
    Router::new()
        .hoop(require_admin)
        .push(
            Router::with_path("campaign-participations/{participation}/status")
                .patch(participations::status::handler),
        )
        .push(
            Router::with_path("campaigns")
                .get(campaigns::index::handler)
                .post(campaigns::create::handler)
                .push(
                    Router::with_path("{campaign}")
                        .get(campaigns::get::handler)
                        .patch(campaigns::update::handler)
                        .delete(campaigns::delete::handler)
                        .push(
                            Router::with_path("participations")
                                .get(participations::campaign_index::handler),
                        ),
                ),
        )
        .push(Router::with_path("stores").get(stores::index::handler))
        .push(
            Router::with_path("categories")
                .post(categories::create::handler)
                .push(Router::with_path("{category}").delete(categories::delete::handler)),
        )
}

/// All JSON API routes, without the operational endpoints.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("categories").get(categories::index::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(store_routes())
                .push(admin_routes()),
        )
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::categories::MockCategoriesService;
    use salvo::{affix_state::inject, test::TestClient};
    use serde_json::json;

    use crate::test_helpers::Mocks;

    use super::*;

    fn service(mocks: Mocks) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(mocks.into_state()))
                .push(app_router()),
        )
    }

    #[tokio::test]
    async fn category_listing_is_public() {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_list_categories()
            .once()
            .return_once(|| Ok(Vec::new()));

        let service = service(Mocks {
            categories,
            ..Mocks::default()
        });

        let res = TestClient::get("http://example.com/categories")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn category_creation_requires_a_token() {
        let service = service(Mocks::default());

        let res = TestClient::post("http://example.com/categories")
            .json(&json!({ "name": "Bakery", "slug": "bakery" }))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn participation_routes_require_a_token() {
        let service = service(Mocks::default());

        let res = TestClient::get("http://example.com/campaign-participations/available")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
    }
}
