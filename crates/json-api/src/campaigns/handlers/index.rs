//! List Campaigns Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    campaigns::{errors::into_status_error, models::CampaignResponse},
    extensions::*,
    state::State,
};

/// List Campaigns Handler
///
/// Featured campaigns first, then by most recent start.
#[endpoint(
    tags("campaigns"),
    summary = "List Campaigns",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<CampaignResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let campaigns = state
        .app
        .campaigns
        .list_campaigns()
        .await
        .map_err(into_status_error)?;

    Ok(Json(campaigns.into_iter().map(CampaignResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::campaigns::MockCampaignsService;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        campaigns::models::fixtures::make_campaign,
        test_helpers::{Mocks, TEST_ADMIN},
    };

    use super::*;

    #[tokio::test]
    async fn test_list_campaigns_keeps_service_order() -> TestResult {
        let featured = make_campaign();
        let regular = make_campaign();
        let expected = vec![featured.uuid.into_uuid(), regular.uuid.into_uuid()];

        let mut campaigns = MockCampaignsService::new();

        campaigns
            .expect_list_campaigns()
            .once()
            .return_once(move || Ok(vec![featured, regular]));

        let service = Mocks {
            campaigns,
            ..Mocks::default()
        }
        .service(TEST_ADMIN, Router::with_path("campaigns").get(handler));

        let mut res = TestClient::get("http://example.com/campaigns")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Vec<CampaignResponse> = res.take_json().await?;

        assert_eq!(
            body.iter().map(|campaign| campaign.id).collect::<Vec<_>>(),
            expected
        );

        Ok(())
    }
}
