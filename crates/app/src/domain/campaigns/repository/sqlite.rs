use async_trait::async_trait;
use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, SqlitePool, query, query_as, sqlite::SqliteRow};

use crate::{
    database::sqlite::{decimal, encode_decimal, encode_timestamp, timestamp},
    domain::{
        campaigns::{
            data::{CampaignDefinition, NewCampaign},
            records::{AvailableCampaign, CampaignRecord, CampaignUuid},
        },
        stores::records::StoreUuid,
    },
};

use super::{
    CREATE_CAMPAIGN_SQL, CampaignsRepository, DELETE_CAMPAIGN_SQL, GET_CAMPAIGN_SQL,
    LIST_AVAILABLE_CAMPAIGNS_SQL, LIST_CAMPAIGNS_SQL, UPDATE_CAMPAIGN_SQL, decode_allowed_categories,
    decode_cap, decode_count, encode_allowed_categories,
};

#[derive(Debug, Clone)]
pub struct SqliteCampaignsRepository {
    pool: SqlitePool,
}

impl SqliteCampaignsRepository {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn write_campaign(
        &self,
        sql: &str,
        campaign: CampaignUuid,
        definition: CampaignDefinition,
        at: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let allowed_categories =
            encode_allowed_categories(definition.allowed_categories.as_deref())?;

        let rows_affected = query(sql)
            .bind(campaign.into_uuid())
            .bind(definition.name)
            .bind(definition.description)
            .bind(encode_timestamp(definition.starts_at))
            .bind(encode_timestamp(definition.ends_at))
            .bind(encode_decimal(definition.min_discount_percent))
            .bind(definition.max_products_per_store.map(i64::from))
            .bind(allowed_categories)
            .bind(definition.requires_approval)
            .bind(definition.is_active)
            .bind(definition.is_featured)
            .bind(definition.badge_text)
            .bind(definition.badge_color)
            .bind(definition.list_banner)
            .bind(definition.detail_banner)
            .bind(encode_timestamp(at))
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

#[async_trait]
impl CampaignsRepository for SqliteCampaignsRepository {
    async fn create_campaign(
        &self,
        campaign: NewCampaign,
        at: Timestamp,
    ) -> Result<CampaignRecord, sqlx::Error> {
        self.write_campaign(CREATE_CAMPAIGN_SQL, campaign.uuid, campaign.definition, at)
            .await?;

        self.get_campaign(campaign.uuid)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    async fn get_campaign(
        &self,
        campaign: CampaignUuid,
    ) -> Result<Option<CampaignRecord>, sqlx::Error> {
        query_as::<Sqlite, CampaignRecord>(GET_CAMPAIGN_SQL)
            .bind(campaign.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_campaigns(&self) -> Result<Vec<CampaignRecord>, sqlx::Error> {
        query_as::<Sqlite, CampaignRecord>(LIST_CAMPAIGNS_SQL)
            .fetch_all(&self.pool)
            .await
    }

    async fn list_available_campaigns(
        &self,
        store: StoreUuid,
        at: Timestamp,
    ) -> Result<Vec<AvailableCampaign>, sqlx::Error> {
        query_as::<Sqlite, AvailableCampaign>(LIST_AVAILABLE_CAMPAIGNS_SQL)
            .bind(store.into_uuid())
            .bind(encode_timestamp(at))
            .fetch_all(&self.pool)
            .await
    }

    async fn update_campaign(
        &self,
        campaign: CampaignUuid,
        definition: CampaignDefinition,
        at: Timestamp,
    ) -> Result<Option<CampaignRecord>, sqlx::Error> {
        let rows_affected = self
            .write_campaign(UPDATE_CAMPAIGN_SQL, campaign, definition, at)
            .await?;

        if rows_affected == 0 {
            return Ok(None);
        }

        self.get_campaign(campaign).await
    }

    async fn delete_campaign(&self, campaign: CampaignUuid) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CAMPAIGN_SQL)
            .bind(campaign.into_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, SqliteRow> for CampaignRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let uuid = row.try_get("uuid")?;

        Ok(Self {
            uuid: CampaignUuid::from_uuid(uuid),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            starts_at: timestamp(row, "starts_at")?,
            ends_at: timestamp(row, "ends_at")?,
            min_discount_percent: decimal(row, "min_discount_percent")?,
            max_products_per_store: decode_cap(row.try_get("max_products_per_store")?)?,
            allowed_categories: decode_allowed_categories(uuid, row.try_get("allowed_categories")?),
            requires_approval: row.try_get("requires_approval")?,
            is_active: row.try_get("is_active")?,
            is_featured: row.try_get("is_featured")?,
            badge_text: row.try_get("badge_text")?,
            badge_color: row.try_get("badge_color")?,
            list_banner: row.try_get("list_banner")?,
            detail_banner: row.try_get("detail_banner")?,
            total_participants: decode_count(
                "total_participants",
                row.try_get("total_participants")?,
            )?,
            total_products: decode_count("total_products", row.try_get("total_products")?)?,
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for AvailableCampaign {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            campaign: CampaignRecord::from_row(row)?,
            my_participations: decode_count(
                "my_participations",
                row.try_get("my_participations")?,
            )?,
        })
    }
}
