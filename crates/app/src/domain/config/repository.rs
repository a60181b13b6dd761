//! Config Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use offerdesk::config::decode_value;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::config::records::ConfigEntryRecord;

const LIST_CONFIG_SQL: &str = include_str!("sql/list_config.sql");
const UPSERT_CONFIG_SQL: &str = include_str!("sql/upsert_config.sql");
const DELETE_CONFIG_SQL: &str = include_str!("sql/delete_config.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgConfigRepository;

impl PgConfigRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_entries(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ConfigEntryRecord>, sqlx::Error> {
        query_as::<Postgres, ConfigEntryRecord>(LIST_CONFIG_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn upsert_entry(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        key: &str,
        encoded_value: &str,
        description: Option<&str>,
    ) -> Result<ConfigEntryRecord, sqlx::Error> {
        query_as::<Postgres, ConfigEntryRecord>(UPSERT_CONFIG_SQL)
            .bind(key)
            .bind(encoded_value)
            .bind(description)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_entry(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        key: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CONFIG_SQL)
            .bind(key)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for ConfigEntryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let raw: String = row.try_get("value")?;

        Ok(Self {
            key: row.try_get("key")?,
            value: decode_value(&raw),
            description: row.try_get("description")?,
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
