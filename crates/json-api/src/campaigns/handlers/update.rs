//! Update Campaign Handler

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::campaigns::data::CampaignUpdate;

use crate::{
    campaigns::{errors::into_status_error, models::CampaignResponse},
    extensions::*,
    state::State,
};

/// Update Campaign Request
///
/// Omitted fields keep their current value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct UpdateCampaignRequest {
    pub name: Option<String>,
    pub description: Option<String>,

    #[salvo(schema(value_type = Option<String>))]
    pub starts_at: Option<Timestamp>,

    #[salvo(schema(value_type = Option<String>))]
    pub ends_at: Option<Timestamp>,

    #[salvo(schema(value_type = Option<f64>))]
    pub min_discount_percent: Option<Decimal>,

    pub max_products_per_store: Option<u32>,
    /// An empty list admits no category
    pub allowed_categories: Option<Vec<Uuid>>,

    /// Remove the allow-list so every category is permitted
    pub clear_allowed_categories: bool,
    pub requires_approval: Option<bool>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub badge_text: Option<String>,
    pub badge_color: Option<String>,
    pub list_banner: Option<String>,
    pub detail_banner: Option<String>,
}

impl From<UpdateCampaignRequest> for CampaignUpdate {
    fn from(request: UpdateCampaignRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
            starts_at: request.starts_at,
            ends_at: request.ends_at,
            min_discount_percent: request.min_discount_percent,
            max_products_per_store: request.max_products_per_store,
            allowed_categories: request
                .allowed_categories
                .map(|categories| categories.into_iter().map(Into::into).collect()),
            clear_allowed_categories: request.clear_allowed_categories,
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

/// Update Campaign Handler
#[endpoint(
    tags("campaigns"),
    summary = "Update Campaign",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Campaign updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Campaign not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    campaign: PathParam<Uuid>,
    json: JsonBody<UpdateCampaignRequest>,
    depot: &mut Depot,
) -> Result<Json<CampaignResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let campaign = campaign.into_inner();

    let updated = state
        .app
        .campaigns
        .update_campaign(campaign.into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(campaign_uuid = %campaign, "updated campaign");

    Ok(Json(updated.into()))
}
