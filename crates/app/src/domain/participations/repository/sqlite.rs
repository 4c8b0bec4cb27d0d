use async_trait::async_trait;
use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, SqlitePool, query, query_as, query_scalar, sqlite::SqliteRow};
use uuid::Uuid;

use crate::{
    auth::UserUuid,
    database::sqlite::{
        decimal, encode_decimal, encode_timestamp, optional_decimal, optional_timestamp, timestamp,
    },
    domain::{
        campaigns::records::CampaignUuid,
        participations::{
            data::NewParticipation,
            records::{ParticipationRecord, ParticipationStatus, ParticipationUuid},
        },
        products::records::ProductUuid,
        stores::records::StoreUuid,
    },
};

use super::{
    COUNT_ACTIVE_STORE_PARTICIPATIONS_SQL, DELETE_STORE_PARTICIPATION_SQL,
    INSERT_PARTICIPATION_SQL, LIST_CAMPAIGN_PARTICIPATIONS_SQL, LIST_STORE_PARTICIPATIONS_SQL,
    ParticipationsRepository, SET_PARTICIPATION_STATUS_SQL, decode_count, decode_discount,
    decode_status,
};

#[derive(Debug, Clone)]
pub struct SqliteParticipationsRepository {
    pool: SqlitePool,
}

impl SqliteParticipationsRepository {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParticipationsRepository for SqliteParticipationsRepository {
    async fn insert_participation(
        &self,
        participation: NewParticipation,
    ) -> Result<Option<ParticipationRecord>, sqlx::Error> {
        query_as::<Sqlite, ParticipationRecord>(INSERT_PARTICIPATION_SQL)
            .bind(participation.uuid.into_uuid())
            .bind(participation.campaign.into_uuid())
            .bind(participation.store.into_uuid())
            .bind(participation.product.into_uuid())
            .bind(participation.discount.percent().map(encode_decimal))
            .bind(participation.discount.fixed().map(encode_decimal))
            .bind(encode_decimal(participation.original_price))
            .bind(encode_decimal(participation.promo_price))
            .bind(participation.status.as_str())
            .bind(participation.approved_at.map(encode_timestamp))
            .bind(encode_timestamp(participation.created_at))
            .fetch_optional(&self.pool)
            .await
    }

    async fn count_active_store_participations(
        &self,
        campaign: CampaignUuid,
        store: StoreUuid,
    ) -> Result<u64, sqlx::Error> {
        let total: i64 = query_scalar(COUNT_ACTIVE_STORE_PARTICIPATIONS_SQL)
            .bind(campaign.into_uuid())
            .bind(store.into_uuid())
            .fetch_one(&self.pool)
            .await?;

        decode_count(total)
    }

    async fn delete_store_participation(
        &self,
        store: StoreUuid,
        participation: ParticipationUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_STORE_PARTICIPATION_SQL)
            .bind(participation.into_uuid())
            .bind(store.into_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    async fn set_participation_status(
        &self,
        participation: ParticipationUuid,
        status: ParticipationStatus,
        decided_at: Timestamp,
        decided_by: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_PARTICIPATION_STATUS_SQL)
            .bind(participation.into_uuid())
            .bind(status.as_str())
            .bind(encode_timestamp(decided_at))
            .bind(decided_by.into_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    async fn list_store_participations(
        &self,
        store: StoreUuid,
    ) -> Result<Vec<ParticipationRecord>, sqlx::Error> {
        query_as::<Sqlite, ParticipationRecord>(LIST_STORE_PARTICIPATIONS_SQL)
            .bind(store.into_uuid())
            .fetch_all(&self.pool)
            .await
    }

    async fn list_campaign_participations(
        &self,
        campaign: CampaignUuid,
    ) -> Result<Vec<ParticipationRecord>, sqlx::Error> {
        query_as::<Sqlite, ParticipationRecord>(LIST_CAMPAIGN_PARTICIPATIONS_SQL)
            .bind(campaign.into_uuid())
            .fetch_all(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for ParticipationRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ParticipationUuid::from_uuid(row.try_get("uuid")?),
            campaign: CampaignUuid::from_uuid(row.try_get("campaign_uuid")?),
            store: StoreUuid::from_uuid(row.try_get("store_uuid")?),
            product: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            discount: decode_discount(
                optional_decimal(row, "discount_percent")?,
                optional_decimal(row, "discount_fixed")?,
            )?,
            original_price: decimal(row, "original_price")?,
            promo_price: decimal(row, "promo_price")?,
            status: decode_status(row.try_get("status")?)?,
            approved_at: optional_timestamp(row, "approved_at")?,
            approved_by: row
                .try_get::<Option<Uuid>, _>("approved_by")?
                .map(UserUuid::from_uuid),
            created_at: timestamp(row, "created_at")?,
        })
    }
}
