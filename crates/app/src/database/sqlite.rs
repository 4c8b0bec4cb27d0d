//! `SQLite` adapter plumbing.
//!
//! `SQLite` has no native timestamp, decimal or boolean types, so values are
//! coerced here: timestamps as unix microseconds, decimals as exact text.

use std::{str::FromStr, sync::Arc};

use jiff::Timestamp;
use rust_decimal::Decimal;
use sqlx::{
    Row, SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
};

use crate::{
    auth::SqliteAuthRepository,
    database::Repositories,
    domain::{
        campaigns::SqliteCampaignsRepository, categories::SqliteCategoriesRepository,
        participations::SqliteParticipationsRepository, products::SqliteProductsRepository,
        stores::SqliteStoresRepository,
    },
};

/// Open a `SQLite` pool with foreign keys enforced.
///
/// In-memory databases live and die with their connection, so they get a
/// single connection that is never recycled.
pub(crate) async fn connect(url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = if url.contains(":memory:") || url.contains("mode=memory") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
    };

    pool.connect_with(options).await
}

pub(crate) fn repositories(pool: &SqlitePool) -> Repositories {
    Repositories {
        auth: Arc::new(SqliteAuthRepository::new(pool.clone())),
        stores: Arc::new(SqliteStoresRepository::new(pool.clone())),
        categories: Arc::new(SqliteCategoriesRepository::new(pool.clone())),
        products: Arc::new(SqliteProductsRepository::new(pool.clone())),
        campaigns: Arc::new(SqliteCampaignsRepository::new(pool.clone())),
        participations: Arc::new(SqliteParticipationsRepository::new(pool.clone())),
    }
}

#[must_use]
pub(crate) fn encode_timestamp(timestamp: Timestamp) -> i64 {
    timestamp.as_microsecond()
}

#[must_use]
pub(crate) fn encode_decimal(value: Decimal) -> String {
    value.to_string()
}

pub(crate) fn timestamp(row: &SqliteRow, column: &str) -> sqlx::Result<Timestamp> {
    let micros: i64 = row.try_get(column)?;

    decode_timestamp(column, micros)
}

pub(crate) fn optional_timestamp(row: &SqliteRow, column: &str) -> sqlx::Result<Option<Timestamp>> {
    row.try_get::<Option<i64>, _>(column)?
        .map(|micros| decode_timestamp(column, micros))
        .transpose()
}

pub(crate) fn decimal(row: &SqliteRow, column: &str) -> sqlx::Result<Decimal> {
    let text: String = row.try_get(column)?;

    decode_decimal(column, &text)
}

pub(crate) fn optional_decimal(row: &SqliteRow, column: &str) -> sqlx::Result<Option<Decimal>> {
    row.try_get::<Option<String>, _>(column)?
        .map(|text| decode_decimal(column, &text))
        .transpose()
}

fn decode_timestamp(column: &str, micros: i64) -> sqlx::Result<Timestamp> {
    Timestamp::from_microsecond(micros).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

fn decode_decimal(column: &str, text: &str) -> sqlx::Result<Decimal> {
    Decimal::from_str(text).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_text_is_exact() {
        let price = Decimal::new(1_999, 2);

        assert_eq!(encode_decimal(price), "19.99");
        assert!(matches!(decode_decimal("price", "19.99"), Ok(value) if value == price));
    }

    #[test]
    fn malformed_decimal_is_a_column_decode_error() {
        let result = decode_decimal("price", "nineteen");

        assert!(
            matches!(result, Err(sqlx::Error::ColumnDecode { ref index, .. }) if index == "price"),
            "expected ColumnDecode, got {result:?}"
        );
    }

    #[test]
    fn timestamps_keep_microsecond_precision() -> testresult::TestResult {
        let at: Timestamp = "2026-03-01T12:30:45.123456Z".parse()?;

        assert_eq!(decode_timestamp("at", encode_timestamp(at))?, at);

        Ok(())
    }
}
