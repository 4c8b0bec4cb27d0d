//! Campaigns Repository

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::warn;
use uuid::Uuid;

use crate::domain::{
    campaigns::{
        data::{CampaignDefinition, NewCampaign},
        records::{AvailableCampaign, CampaignRecord, CampaignUuid},
    },
    categories::records::CategoryUuid,
    stores::records::StoreUuid,
};

mod postgres;
mod sqlite;

pub use postgres::PgCampaignsRepository;
pub use sqlite::SqliteCampaignsRepository;

const CREATE_CAMPAIGN_SQL: &str = include_str!("../sql/create_campaign.sql");
const GET_CAMPAIGN_SQL: &str = include_str!("../sql/get_campaign.sql");
const LIST_CAMPAIGNS_SQL: &str = include_str!("../sql/list_campaigns.sql");
const LIST_AVAILABLE_CAMPAIGNS_SQL: &str = include_str!("../sql/list_available_campaigns.sql");
const UPDATE_CAMPAIGN_SQL: &str = include_str!("../sql/update_campaign.sql");
const DELETE_CAMPAIGN_SQL: &str = include_str!("../sql/delete_campaign.sql");

#[automock]
#[async_trait]
pub trait CampaignsRepository: Send + Sync {
    async fn create_campaign(
        &self,
        campaign: NewCampaign,
        at: Timestamp,
    ) -> Result<CampaignRecord, sqlx::Error>;

    async fn get_campaign(
        &self,
        campaign: CampaignUuid,
    ) -> Result<Option<CampaignRecord>, sqlx::Error>;

    /// Featured first, then most recent start.
    async fn list_campaigns(&self) -> Result<Vec<CampaignRecord>, sqlx::Error>;

    /// Active campaigns running at `at`, annotated with the store's enrolment count.
    async fn list_available_campaigns(
        &self,
        store: StoreUuid,
        at: Timestamp,
    ) -> Result<Vec<AvailableCampaign>, sqlx::Error>;

    async fn update_campaign(
        &self,
        campaign: CampaignUuid,
        definition: CampaignDefinition,
        at: Timestamp,
    ) -> Result<Option<CampaignRecord>, sqlx::Error>;

    /// Returns the number of rows removed.
    async fn delete_campaign(&self, campaign: CampaignUuid) -> Result<u64, sqlx::Error>;
}

/// Serialise the allow-list for the JSON text column. Only NULL means every
/// category is allowed; an empty list admits none.
fn encode_allowed_categories(
    categories: Option<&[CategoryUuid]>,
) -> Result<Option<String>, sqlx::Error> {
    let Some(categories) = categories else {
        return Ok(None);
    };

    let uuids: Vec<Uuid> = categories.iter().map(|uuid| uuid.into_uuid()).collect();

    serde_json::to_string(&uuids)
        .map(Some)
        .map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

/// Parse the allow-list column.
///
/// A value that does not parse as a list of category ids is logged and read
/// as "no restriction" so a bad row never blocks every submission.
fn decode_allowed_categories(campaign: Uuid, raw: Option<String>) -> Option<Vec<CategoryUuid>> {
    let raw = raw?;

    match serde_json::from_str::<Vec<Uuid>>(&raw) {
        Ok(uuids) => Some(uuids.into_iter().map(CategoryUuid::from_uuid).collect()),
        Err(error) => {
            warn!(
                campaign_uuid = %campaign,
                %error,
                "malformed allowed_categories, treating campaign as unrestricted"
            );

            None
        }
    }
}

fn decode_count(column: &str, value: i64) -> sqlx::Result<u64> {
    u64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

fn decode_cap(value: Option<i64>) -> sqlx::Result<Option<u32>> {
    value
        .map(|cap| {
            u32::try_from(cap).map_err(|e| sqlx::Error::ColumnDecode {
                index: "max_products_per_store".to_string(),
                source: Box::new(e),
            })
        })
        .transpose()
}
