//! Available Campaigns Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use bazaar_app::domain::campaigns::records::AvailableCampaign;

use crate::{
    campaigns::models::CampaignResponse, extensions::*,
    participations::errors::ParticipationError, state::State,
};

/// A running campaign with the caller's enrolment count.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AvailableCampaignResponse {
    #[serde(flatten)]
    pub campaign: CampaignResponse,

    /// Pending and approved participations of the caller's store
    pub my_participations: u64,
}

impl From<AvailableCampaign> for AvailableCampaignResponse {
    fn from(available: AvailableCampaign) -> Self {
        Self {
            campaign: available.campaign.into(),
            my_participations: available.my_participations,
        }
    }
}

/// Available Campaigns Handler
///
/// Lists the active campaigns running at `at` (default: now), featured
/// first, then by most recent start.
#[endpoint(
    tags("campaign-participations"),
    summary = "List Available Campaigns",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<AvailableCampaignResponse>>, ParticipationError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;
    let point_in_time = at.into_point_in_time()?;

    let campaigns = state
        .app
        .participations
        .list_available_campaigns(caller, point_in_time)
        .await?;

    Ok(Json(
        campaigns
            .into_iter()
            .map(AvailableCampaignResponse::from)
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::participations::MockParticipationsService;
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        campaigns::models::fixtures::make_campaign,
        test_helpers::{Mocks, TEST_STORE_OWNER},
    };

    use super::*;

    fn make_service(participations: MockParticipationsService) -> Service {
        Mocks {
            participations,
            ..Mocks::default()
        }
        .service(
            TEST_STORE_OWNER,
            Router::with_path("campaign-participations/available").get(handler),
        )
    }

    #[tokio::test]
    async fn test_lists_campaigns_with_my_participations() -> TestResult {
        let campaign = make_campaign();
        let expected = campaign.uuid.into_uuid();
        let at: Timestamp = "2026-03-01T12:00:00Z".parse()?;

        let mut participations = MockParticipationsService::new();

        participations
            .expect_list_available_campaigns()
            .once()
            .withf(move |caller, point_in_time| {
                *caller == TEST_STORE_OWNER && *point_in_time == at
            })
            .return_once(move |_, _| {
                Ok(vec![AvailableCampaign {
                    campaign,
                    my_participations: 3,
                }])
            });

        let mut res = TestClient::get(
            "http://example.com/campaign-participations/available?at=2026-03-01T12:00:00Z",
        )
        .send(&make_service(participations))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Vec<AvailableCampaignResponse> = res.take_json().await?;
        let summary: Vec<_> = body
            .iter()
            .map(|available| (available.campaign.id, available.my_participations))
            .collect();

        assert_eq!(summary, vec![(expected, 3)]);

        Ok(())
    }

    #[tokio::test]
    async fn test_bad_point_in_time_returns_400() -> TestResult {
        let mut participations = MockParticipationsService::new();

        participations.expect_list_available_campaigns().never();

        let res = TestClient::get("http://example.com/campaign-participations/available?at=soon")
            .send(&make_service(participations))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
