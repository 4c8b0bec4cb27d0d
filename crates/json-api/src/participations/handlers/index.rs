//! List My Participations Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    participations::{errors::ParticipationError, models::ParticipationResponse},
    state::State,
};

/// List My Participations Handler
///
/// Returns the caller's participations across all campaigns, newest first.
#[endpoint(
    tags("campaign-participations"),
    summary = "List My Participations",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Vec<ParticipationResponse>>, ParticipationError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let participations = state
        .app
        .participations
        .list_my_participations(caller)
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
    use bazaar_app::domain::participations::{
        MockParticipationsService, ParticipationsServiceError, records::ParticipationStatus,
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        participations::models::fixtures::make_participation,
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
            Router::with_path("campaign-participations").get(handler),
        )
    }

    #[tokio::test]
    async fn test_lists_callers_participations() -> TestResult {
        let participation = make_participation(ParticipationStatus::Approved);
        let expected = participation.uuid.into_uuid();

        let mut participations = MockParticipationsService::new();

        participations
            .expect_list_my_participations()
            .once()
            .withf(|caller| *caller == TEST_STORE_OWNER)
            .return_once(move |_| Ok(vec![participation]));

        let mut res = TestClient::get("http://example.com/campaign-participations")
            .send(&make_service(participations))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Vec<ParticipationResponse> = res.take_json().await?;
        let ids: Vec<_> = body.iter().map(|participation| participation.id).collect();

        assert_eq!(ids, vec![expected]);
        assert_eq!(body.iter().map(|p| p.discount_fixed).collect::<Vec<_>>(), vec![None]);

        Ok(())
    }

    #[tokio::test]
    async fn test_without_store_returns_404() -> TestResult {
        let mut participations = MockParticipationsService::new();

        participations
            .expect_list_my_participations()
            .once()
            .return_once(|_| Err(ParticipationsServiceError::StoreNotFound));

        let res = TestClient::get("http://example.com/campaign-participations")
            .send(&make_service(participations))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
