//! Get Campaign Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    campaigns::{errors::into_status_error, models::CampaignResponse},
    extensions::*,
    state::State,
};

/// Get Campaign Handler
///
/// Returns a campaign with its current participation totals.
#[endpoint(
    tags("campaigns"),
    summary = "Get Campaign",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    campaign: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CampaignResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let campaign = state
        .app
        .campaigns
        .get_campaign(campaign.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(campaign.into()))
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::campaigns::{CampaignsServiceError, MockCampaignsService};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        campaigns::models::fixtures::make_campaign,
        test_helpers::{Mocks, TEST_ADMIN},
    };

    use super::*;

    fn make_service(campaigns: MockCampaignsService) -> Service {
        Mocks {
            campaigns,
            ..Mocks::default()
        }
        .service(TEST_ADMIN, Router::with_path("campaigns/{campaign}").get(handler))
    }

    #[tokio::test]
    async fn test_get_campaign_includes_totals() -> TestResult {
        let mut campaign = make_campaign();
        campaign.total_participants = 2;
        campaign.total_products = 5;
        let uuid = campaign.uuid;

        let mut campaigns = MockCampaignsService::new();

        campaigns
            .expect_get_campaign()
            .once()
            .withf(move |requested| *requested == uuid)
            .return_once(move |_| Ok(campaign));

        let mut res = TestClient::get(format!("http://example.com/campaigns/{uuid}"))
            .send(&make_service(campaigns))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CampaignResponse = res.take_json().await?;

        assert_eq!(body.total_participants, 2);
        assert_eq!(body.total_products, 5);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_unknown_campaign_returns_404() -> TestResult {
        let mut campaigns = MockCampaignsService::new();

        campaigns
            .expect_get_campaign()
            .once()
            .return_once(|_| Err(CampaignsServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/campaigns/{}", Uuid::now_v7()))
            .send(&make_service(campaigns))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
