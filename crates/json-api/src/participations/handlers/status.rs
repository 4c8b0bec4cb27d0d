//! Set Participation Status Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::participations::records::ParticipationStatus;

use crate::{
    extensions::*,
    participations::{errors::ParticipationError, models::MessageResponse},
    state::State,
};

/// Set Participation Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SetParticipationStatusRequest {
    /// `approved` or `rejected`
    pub status: String,
}

/// Set Participation Status Handler
///
/// Approves or rejects a participation, stamping the reviewer and time.
#[endpoint(
    tags("campaign-participations"),
    summary = "Set Participation Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
    ),
)]
pub(crate) async fn handler(
    participation: PathParam<Uuid>,
    json: JsonBody<SetParticipationStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, ParticipationError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;
    let participation = participation.into_inner();

    let status = json
        .into_inner()
        .status
        .parse::<ParticipationStatus>()
        .map_err(|error| ParticipationError::new(StatusCode::BAD_REQUEST, error.to_string()))?;

    state
        .app
        .participations
        .set_status(caller, participation.into(), status, Timestamp::now())
        .await?;

    tracing::info!(participation_uuid = %participation, %status, "reviewed participation");

    Ok(Json(MessageResponse::new(format!("Participation {status}"))))
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::participations::{
        InvalidState, MockParticipationsService, ParticipationsServiceError,
        records::ParticipationUuid,
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        participations::errors::ErrorResponse,
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
            Router::with_path("campaign-participations/{participation}/status").patch(handler),
        )
    }

    fn url(participation: impl std::fmt::Display) -> String {
        format!("http://example.com/campaign-participations/{participation}/status")
    }

    #[tokio::test]
    async fn test_approve_success() -> TestResult {
        let uuid = ParticipationUuid::new();

        let mut participations = MockParticipationsService::new();

        participations
            .expect_set_status()
            .once()
            .withf(move |caller, participation, status, _| {
                *caller == TEST_ADMIN
                    && *participation == uuid
                    && *status == ParticipationStatus::Approved
            })
            .return_once(|_, _, _, _| Ok(()));

        let mut res = TestClient::patch(url(uuid))
            .json(&json!({ "status": "approved" }))
            .send(&make_service(participations))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: MessageResponse = res.take_json().await?;

        assert_eq!(body.message, "Participation approved");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400_without_calling_service() -> TestResult {
        let mut participations = MockParticipationsService::new();

        participations.expect_set_status().never();

        let mut res = TestClient::patch(url(Uuid::now_v7()))
            .json(&json!({ "status": "archived" }))
            .send(&make_service(participations))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(body.error, "unknown participation status `archived`");

        Ok(())
    }

    #[tokio::test]
    async fn test_pending_status_returns_400() -> TestResult {
        let mut participations = MockParticipationsService::new();

        participations
            .expect_set_status()
            .once()
            .return_once(|_, _, _, _| Err(InvalidState::InvalidStatus.into()));

        let res = TestClient::patch(url(Uuid::now_v7()))
            .json(&json!({ "status": "pending" }))
            .send(&make_service(participations))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_participation_returns_404() -> TestResult {
        let mut participations = MockParticipationsService::new();

        participations
            .expect_set_status()
            .once()
            .return_once(|_, _, _, _| Err(ParticipationsServiceError::NotFound));

        let res = TestClient::patch(url(Uuid::now_v7()))
            .json(&json!({ "status": "rejected" }))
            .send(&make_service(participations))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
