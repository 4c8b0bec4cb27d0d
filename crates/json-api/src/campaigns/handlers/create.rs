//! Create Campaign Handler

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::campaigns::{
    data::{CampaignDefinition, DEFAULT_MIN_DISCOUNT_PERCENT, NewCampaign},
    records::CampaignUuid,
};

use crate::{
    campaigns::{errors::into_status_error, models::CampaignResponse},
    extensions::*,
    state::State,
};

const fn enabled() -> bool {
    true
}

/// Create Campaign Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCampaignRequest {
    pub name: String,
    pub description: Option<String>,

    #[salvo(schema(value_type = String))]
    pub starts_at: Timestamp,

    #[salvo(schema(value_type = String))]
    pub ends_at: Timestamp,

    /// Defaults to 10
    #[salvo(schema(value_type = Option<f64>))]
    pub min_discount_percent: Option<Decimal>,

    pub max_products_per_store: Option<u32>,
    pub allowed_categories: Option<Vec<Uuid>>,

    #[serde(default)]
    pub requires_approval: bool,

    #[serde(default = "enabled")]
    pub is_active: bool,

    #[serde(default)]
    pub is_featured: bool,

    pub badge_text: Option<String>,
    pub badge_color: Option<String>,
    pub list_banner: Option<String>,
    pub detail_banner: Option<String>,
}

impl From<CreateCampaignRequest> for CampaignDefinition {
    fn from(request: CreateCampaignRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
            starts_at: request.starts_at,
            ends_at: request.ends_at,
            min_discount_percent: request
                .min_discount_percent
                .unwrap_or(DEFAULT_MIN_DISCOUNT_PERCENT),
            max_products_per_store: request.max_products_per_store,
            allowed_categories: request
                .allowed_categories
                .map(|categories| categories.into_iter().map(Into::into).collect()),
            requires_approval: request.requires_approval,
            is_active: request.is_active,
            is_featured: request.is_featured,
            badge_text: request.badge_text,
            badge_color: request.badge_color,
            list_banner: request.list_banner,
            detail_banner: request.detail_banner,
        }
    }
}

/// Create Campaign Handler
#[endpoint(
    tags("campaigns"),
    summary = "Create Campaign",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Campaign created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCampaignRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CampaignResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let campaign = state
        .app
        .campaigns
        .create_campaign(NewCampaign {
            uuid: CampaignUuid::new(),
            definition: json.into_inner().into(),
        })
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/campaigns/{}", campaign.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(campaign.into()))
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::campaigns::{CampaignsServiceError, MockCampaignsService};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
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
        .service(TEST_ADMIN, Router::with_path("campaigns").post(handler))
    }

    #[tokio::test]
    async fn test_create_campaign_applies_defaults() -> TestResult {
        let campaign = make_campaign();
        let uuid = campaign.uuid;

        let mut campaigns = MockCampaignsService::new();

        campaigns
            .expect_create_campaign()
            .once()
            .withf(|new| {
                let definition = &new.definition;

                definition.name == "Spring Market"
                    && definition.min_discount_percent == DEFAULT_MIN_DISCOUNT_PERCENT
                    && definition.is_active
                    && !definition.requires_approval
                    && definition.allowed_categories.is_none()
            })
            .return_once(move |_| Ok(campaign));

        let mut res = TestClient::post("http://example.com/campaigns")
            .json(&json!({
                "name": "Spring Market",
                "starts_at": "2026-03-01T00:00:00Z",
                "ends_at": "2026-03-31T00:00:00Z",
            }))
            .send(&make_service(campaigns))
            .await;

        let body: CampaignResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/campaigns/{uuid}").as_str()));
        assert_eq!(body.id, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_campaign_invalid_window_returns_400() -> TestResult {
        let mut campaigns = MockCampaignsService::new();

        campaigns.expect_create_campaign().once().return_once(|_| {
            Err(CampaignsServiceError::InvalidData(
                "starts_at must be before ends_at",
            ))
        });

        let res = TestClient::post("http://example.com/campaigns")
            .json(&json!({
                "name": "Backwards",
                "starts_at": "2026-03-31T00:00:00Z",
                "ends_at": "2026-03-01T00:00:00Z",
            }))
            .send(&make_service(campaigns))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_campaign_malformed_timestamp_returns_400() -> TestResult {
        let mut campaigns = MockCampaignsService::new();

        campaigns.expect_create_campaign().never();

        let res = TestClient::post("http://example.com/campaigns")
            .json(&json!({
                "name": "Spring Market",
                "starts_at": "next tuesday",
                "ends_at": "2026-03-31T00:00:00Z",
            }))
            .send(&make_service(campaigns))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
