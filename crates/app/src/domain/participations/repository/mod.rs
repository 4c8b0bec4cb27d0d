//! Participations Repository

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rust_decimal::Decimal;

use crate::{
    auth::UserUuid,
    domain::{
        campaigns::records::CampaignUuid,
        participations::{
            data::NewParticipation,
            pricing::Discount,
            records::{ParticipationRecord, ParticipationStatus, ParticipationUuid},
        },
        stores::records::StoreUuid,
    },
};

mod postgres;
mod sqlite;

pub use postgres::PgParticipationsRepository;
pub use sqlite::SqliteParticipationsRepository;

const INSERT_PARTICIPATION_SQL: &str = include_str!("../sql/insert_participation.sql");
const COUNT_ACTIVE_STORE_PARTICIPATIONS_SQL: &str =
    include_str!("../sql/count_active_store_participations.sql");
const DELETE_STORE_PARTICIPATION_SQL: &str = include_str!("../sql/delete_store_participation.sql");
const SET_PARTICIPATION_STATUS_SQL: &str = include_str!("../sql/set_participation_status.sql");
const LIST_STORE_PARTICIPATIONS_SQL: &str = include_str!("../sql/list_store_participations.sql");
const LIST_CAMPAIGN_PARTICIPATIONS_SQL: &str =
    include_str!("../sql/list_campaign_participations.sql");

#[automock]
#[async_trait]
pub trait ParticipationsRepository: Send + Sync {
    /// Inserts unless the product already participates in the campaign, in
    /// which case `None` is returned and the existing row is left untouched.
    async fn insert_participation(
        &self,
        participation: NewParticipation,
    ) -> Result<Option<ParticipationRecord>, sqlx::Error>;

    /// Pending and approved participations of `store` in `campaign`.
    async fn count_active_store_participations(
        &self,
        campaign: CampaignUuid,
        store: StoreUuid,
    ) -> Result<u64, sqlx::Error>;

    /// Returns the number of rows removed.
    async fn delete_store_participation(
        &self,
        store: StoreUuid,
        participation: ParticipationUuid,
    ) -> Result<u64, sqlx::Error>;

    /// Returns the number of rows updated.
    async fn set_participation_status(
        &self,
        participation: ParticipationUuid,
        status: ParticipationStatus,
        decided_at: Timestamp,
        decided_by: UserUuid,
    ) -> Result<u64, sqlx::Error>;

    async fn list_store_participations(
        &self,
        store: StoreUuid,
    ) -> Result<Vec<ParticipationRecord>, sqlx::Error>;

    async fn list_campaign_participations(
        &self,
        campaign: CampaignUuid,
    ) -> Result<Vec<ParticipationRecord>, sqlx::Error>;
}

fn decode_discount(percent: Option<Decimal>, fixed: Option<Decimal>) -> sqlx::Result<Discount> {
    Discount::from_parts(percent, fixed).ok_or_else(|| sqlx::Error::ColumnDecode {
        index: "discount_percent".to_string(),
        source: "participation has neither a percent nor a fixed discount".into(),
    })
}

fn decode_status(status: &str) -> sqlx::Result<ParticipationStatus> {
    status.parse().map_err(|e| sqlx::Error::ColumnDecode {
        index: "status".to_string(),
        source: Box::new(e),
    })
}

fn decode_count(value: i64) -> sqlx::Result<u64> {
    u64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: "total".to_string(),
        source: Box::new(e),
    })
}
