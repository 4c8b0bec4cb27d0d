use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    auth::UserUuid,
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
pub struct PgParticipationsRepository {
    pool: PgPool,
}

impl PgParticipationsRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParticipationsRepository for PgParticipationsRepository {
    async fn insert_participation(
        &self,
        participation: NewParticipation,
    ) -> Result<Option<ParticipationRecord>, sqlx::Error> {
        query_as::<Postgres, ParticipationRecord>(INSERT_PARTICIPATION_SQL)
            .bind(participation.uuid.into_uuid())
            .bind(participation.campaign.into_uuid())
            .bind(participation.store.into_uuid())
            .bind(participation.product.into_uuid())
            .bind(participation.discount.percent())
            .bind(participation.discount.fixed())
            .bind(participation.original_price)
            .bind(participation.promo_price)
            .bind(participation.status.as_str())
            .bind(participation.approved_at.map(SqlxTimestamp::from))
            .bind(SqlxTimestamp::from(participation.created_at))
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
            .bind(SqlxTimestamp::from(decided_at))
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
        query_as::<Postgres, ParticipationRecord>(LIST_STORE_PARTICIPATIONS_SQL)
            .bind(store.into_uuid())
            .fetch_all(&self.pool)
            .await
    }

    async fn list_campaign_participations(
        &self,
        campaign: CampaignUuid,
    ) -> Result<Vec<ParticipationRecord>, sqlx::Error> {
        query_as::<Postgres, ParticipationRecord>(LIST_CAMPAIGN_PARTICIPATIONS_SQL)
            .bind(campaign.into_uuid())
            .fetch_all(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ParticipationRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ParticipationUuid::from_uuid(row.try_get("uuid")?),
            campaign: CampaignUuid::from_uuid(row.try_get("campaign_uuid")?),
            store: StoreUuid::from_uuid(row.try_get("store_uuid")?),
            product: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            discount: decode_discount(
                row.try_get("discount_percent")?,
                row.try_get("discount_fixed")?,
            )?,
            original_price: row.try_get("original_price")?,
            promo_price: row.try_get("promo_price")?,
            status: decode_status(row.try_get("status")?)?,
            approved_at: row
                .try_get::<Option<SqlxTimestamp>, _>("approved_at")?
                .map(SqlxTimestamp::to_jiff),
            approved_by: row
                .try_get::<Option<Uuid>, _>("approved_by")?
                .map(UserUuid::from_uuid),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
