//! Submit Participations Handler

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::participations::{
    ParticipationsServiceError,
    data::{ParticipationRequest, SubmissionOutcome},
    records::ParticipationRecord,
};

use crate::{
    extensions::*,
    observability::observe_participation_items,
    participations::{errors::ParticipationError, models::ItemErrorResponse},
    state::State,
};

/// Submit Participations Request
///
/// `discount_percent` wins when both discounts are supplied.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubmitParticipationsRequest {
    pub campaign_id: Option<Uuid>,

    #[serde(default)]
    pub product_ids: Vec<Uuid>,

    #[salvo(schema(value_type = Option<f64>))]
    pub discount_percent: Option<Decimal>,

    #[salvo(schema(value_type = Option<f64>))]
    pub discount_fixed: Option<Decimal>,
}

impl From<SubmitParticipationsRequest> for ParticipationRequest {
    fn from(request: SubmitParticipationsRequest) -> Self {
        Self {
            campaign: request.campaign_id.map(Into::into),
            products: request.product_ids.into_iter().map(Into::into).collect(),
            discount_percent: request.discount_percent,
            discount_fixed: request.discount_fixed,
        }
    }
}

/// An admitted product
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AcceptedParticipationResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub status: String,

    #[salvo(schema(value_type = String))]
    pub promo_price: Decimal,
}

impl From<ParticipationRecord> for AcceptedParticipationResponse {
    fn from(record: ParticipationRecord) -> Self {
        Self {
            id: record.uuid.into_uuid(),
            product_id: record.product.into_uuid(),
            status: record.status.to_string(),
            promo_price: record.promo_price,
        }
    }
}

/// Participations Submitted Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ParticipationsSubmittedResponse {
    pub message: String,
    pub participations: Vec<AcceptedParticipationResponse>,
    pub requires_approval: bool,

    /// Products that were not admitted
    pub errors: Vec<ItemErrorResponse>,
}

impl From<SubmissionOutcome> for ParticipationsSubmittedResponse {
    fn from(outcome: SubmissionOutcome) -> Self {
        let count = outcome.participations.len();

        let message = if outcome.requires_approval {
            format!("{count} product(s) submitted to the campaign, pending approval")
        } else {
            format!("{count} product(s) added to the campaign")
        };

        Self {
            message,
            participations: outcome
                .participations
                .into_iter()
                .map(AcceptedParticipationResponse::from)
                .collect(),
            requires_approval: outcome.requires_approval,
            errors: outcome.errors.iter().map(ItemErrorResponse::from).collect(),
        }
    }
}

/// Submit Participations Handler
///
/// Enrols a batch of the caller's products into a campaign. Products that
/// cannot be admitted are listed in `errors`; the request only fails as a
/// whole when none was admitted.
#[endpoint(
    tags("campaign-participations"),
    summary = "Submit Participations",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "At least one product admitted"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SubmitParticipationsRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ParticipationsSubmittedResponse>, ParticipationError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let outcome = state
        .app
        .participations
        .submit(caller, json.into_inner().into(), Timestamp::now())
        .await
        .inspect_err(|error| {
            if let ParticipationsServiceError::NoneAccepted(errors) = error {
                observe_participation_items(0, errors.len());
            }
        })?;

    observe_participation_items(outcome.participations.len(), outcome.errors.len());

    res.status_code(StatusCode::CREATED);

    Ok(Json(outcome.into()))
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::{
        campaigns::records::CampaignUuid,
        participations::{
            InvalidState, ItemError, ItemRejection, MockParticipationsService,
            records::ParticipationStatus,
        },
        products::records::ProductUuid,
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        participations::{errors::ErrorResponse, models::fixtures::make_participation},
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
            Router::with_path("campaign-participations").post(handler),
        )
    }

    #[tokio::test]
    async fn test_partial_batch_returns_201_with_errors() -> TestResult {
        let campaign = CampaignUuid::new();
        let rejected = ProductUuid::new();
        let mut admitted = make_participation(ParticipationStatus::Approved);
        admitted.campaign = campaign;
        let admitted_product = admitted.product;

        let outcome = SubmissionOutcome {
            participations: vec![admitted.clone()],
            requires_approval: false,
            errors: vec![ItemError {
                product: rejected,
                reason: ItemRejection::NotOwned,
            }],
        };

        let mut participations = MockParticipationsService::new();

        participations
            .expect_submit()
            .once()
            .withf(move |caller, request, _| {
                *caller == TEST_STORE_OWNER
                    && *request
                        == ParticipationRequest {
                            campaign: Some(campaign),
                            products: vec![admitted_product, rejected],
                            discount_percent: Some(Decimal::new(15, 0)),
                            discount_fixed: None,
                        }
            })
            .return_once(move |_, _, _| Ok(outcome));

        let mut res = TestClient::post("http://example.com/campaign-participations")
            .json(&json!({
                "campaign_id": campaign.into_uuid(),
                "product_ids": [admitted_product.into_uuid(), rejected.into_uuid()],
                "discount_percent": 15,
            }))
            .send(&make_service(participations))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: ParticipationsSubmittedResponse = res.take_json().await?;

        assert_eq!(body.message, "1 product(s) added to the campaign");
        assert!(!body.requires_approval);
        assert_eq!(body.participations.len(), 1);
        assert_eq!(body.participations[0].id, admitted.uuid.into_uuid());
        assert_eq!(body.participations[0].status, "approved");
        assert_eq!(body.participations[0].promo_price, Decimal::new(8_500, 2));
        assert_eq!(
            body.errors,
            vec![ItemErrorResponse {
                product_id: rejected.into_uuid(),
                error: "not found or not owned by your store".to_string(),
            }]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_decimal_discount_is_passed_exactly() -> TestResult {
        let mut participations = MockParticipationsService::new();

        participations
            .expect_submit()
            .once()
            .withf(|_, request, _| request.discount_percent == Some(Decimal::new(125, 1)))
            .return_once(|_, _, _| {
                Ok(SubmissionOutcome {
                    participations: vec![make_participation(ParticipationStatus::Pending)],
                    requires_approval: true,
                    errors: Vec::new(),
                })
            });

        let mut res = TestClient::post("http://example.com/campaign-participations")
            .json(&json!({
                "campaign_id": Uuid::now_v7(),
                "product_ids": [Uuid::now_v7()],
                "discount_percent": 12.5,
            }))
            .send(&make_service(participations))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: ParticipationsSubmittedResponse = res.take_json().await?;

        assert!(body.requires_approval);
        assert_eq!(body.participations[0].status, "pending");
        assert!(body.errors.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_none_accepted_returns_400_with_details() -> TestResult {
        let product = ProductUuid::new();

        let mut participations = MockParticipationsService::new();

        participations.expect_submit().once().return_once(move |_, _, _| {
            Err(ParticipationsServiceError::NoneAccepted(vec![ItemError {
                product,
                reason: ItemRejection::AlreadyParticipating,
            }]))
        });

        let mut res = TestClient::post("http://example.com/campaign-participations")
            .json(&json!({
                "campaign_id": Uuid::now_v7(),
                "product_ids": [product.into_uuid()],
                "discount_fixed": 2.5,
            }))
            .send(&make_service(participations))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(body.error, "no products were added to the campaign");
        assert_eq!(
            body.details,
            Some(vec![ItemErrorResponse {
                product_id: product.into_uuid(),
                error: "already participating".to_string(),
            }])
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_campaign_returns_400() -> TestResult {
        let mut participations = MockParticipationsService::new();

        participations
            .expect_submit()
            .once()
            .withf(|_, request, _| request.campaign.is_none() && request.products.is_empty())
            .return_once(|_, _, _| Err(ParticipationsServiceError::MissingField("campaign_id")));

        let mut res = TestClient::post("http://example.com/campaign-participations")
            .json(&json!({}))
            .send(&make_service(participations))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(body.error, "missing required field: campaign_id");
        assert!(body.details.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_inactive_campaign_returns_400() -> TestResult {
        let mut participations = MockParticipationsService::new();

        participations
            .expect_submit()
            .once()
            .return_once(|_, _, _| Err(InvalidState::CampaignNotActive.into()));

        let mut res = TestClient::post("http://example.com/campaign-participations")
            .json(&json!({
                "campaign_id": Uuid::now_v7(),
                "product_ids": [Uuid::now_v7()],
                "discount_percent": 20,
            }))
            .send(&make_service(participations))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(body.error, "campaign not active");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_campaign_returns_404() -> TestResult {
        let mut participations = MockParticipationsService::new();

        participations
            .expect_submit()
            .once()
            .return_once(|_, _, _| Err(ParticipationsServiceError::CampaignNotFound));

        let res = TestClient::post("http://example.com/campaign-participations")
            .json(&json!({
                "campaign_id": Uuid::now_v7(),
                "product_ids": [Uuid::now_v7()],
                "discount_percent": 20,
            }))
            .send(&make_service(participations))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
