//! Delete Campaign Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{campaigns::errors::into_status_error, extensions::*, state::State};

/// Delete Campaign Handler
///
/// Deleting a campaign also removes its participations.
#[endpoint(
    tags("campaigns"),
    summary = "Delete Campaign",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Campaign deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Campaign not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    campaign: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .campaigns
        .delete_campaign(campaign.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::campaigns::{
        CampaignsServiceError, MockCampaignsService, records::CampaignUuid,
    };
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_ADMIN};

    use super::*;

    fn make_service(campaigns: MockCampaignsService) -> Service {
        Mocks {
            campaigns,
            ..Mocks::default()
        }
        .service(
            TEST_ADMIN,
            Router::with_path("campaigns/{campaign}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_delete_campaign_success() -> TestResult {
        let uuid = CampaignUuid::new();

        let mut campaigns = MockCampaignsService::new();

        campaigns
            .expect_delete_campaign()
            .once()
            .withf(move |requested| *requested == uuid)
            .return_once(|_| Ok(()));

        let res = TestClient::delete(format!("http://example.com/campaigns/{uuid}"))
            .send(&make_service(campaigns))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_unknown_campaign_returns_404() -> TestResult {
        let mut campaigns = MockCampaignsService::new();

        campaigns
            .expect_delete_campaign()
            .once()
            .return_once(|_| Err(CampaignsServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/campaigns/{}", Uuid::now_v7()))
            .send(&make_service(campaigns))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
