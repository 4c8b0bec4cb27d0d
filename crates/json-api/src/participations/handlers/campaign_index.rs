//! Campaign Review Queue Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    participations::{errors::ParticipationError, models::ParticipationResponse},
    state::State,
};

/// Campaign Review Queue Handler
///
/// Lists every participation in a campaign, newest first.
#[endpoint(
    tags("campaign-participations"),
    summary = "List Campaign Participations",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    campaign: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Vec<ParticipationResponse>>, ParticipationError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let participations = state
        .app
        .participations
        .list_campaign_participations(caller, campaign.into_inner().into())
        .await?;

    Ok(Json(
        participations
            .into_iter()
            .map(ParticipationResponse::from)
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::{
        campaigns::records::CampaignUuid,
        participations::{
            MockParticipationsService, ParticipationsServiceError, records::ParticipationStatus,
        },
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        participations::models::fixtures::make_participation,
        test_helpers::{Mocks, TEST_ADMIN},
    };

    use super::*;

    fn make_service(participations: MockParticipationsService) -> Service {
        Mocks {
            participations,
            ..Mocks::default()
        }
        .service(
            TEST_ADMIN,
            Router::with_path("campaigns/{campaign}/participations").get(handler),
        )
    }

    #[tokio::test]
    async fn test_lists_review_queue() -> TestResult {
        let campaign = CampaignUuid::new();
        let mut pending = make_participation(ParticipationStatus::Pending);
        pending.campaign = campaign;

        let mut participations = MockParticipationsService::new();

        participations
            .expect_list_campaign_participations()
            .once()
            .withf(move |caller, requested| *caller == TEST_ADMIN && *requested == campaign)
            .return_once(move |_, _| Ok(vec![pending]));

        let mut res = TestClient::get(format!(
            "http://example.com/campaigns/{campaign}/participations"
        ))
        .send(&make_service(participations))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Vec<ParticipationResponse> = res.take_json().await?;
        let statuses: Vec<_> = body
            .iter()
            .map(|participation| (participation.campaign_id, participation.status.as_str()))
            .collect();

        assert_eq!(statuses, vec![(campaign.into_uuid(), "pending")]);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_campaign_returns_404() -> TestResult {
        let mut participations = MockParticipationsService::new();

        participations
            .expect_list_campaign_participations()
            .once()
            .return_once(|_, _| Err(ParticipationsServiceError::CampaignNotFound));

        let res = TestClient::get(format!(
            "http://example.com/campaigns/{}/participations",
            Uuid::now_v7()
        ))
        .send(&make_service(participations))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
