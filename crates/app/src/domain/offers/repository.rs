//! Offers Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use offerdesk::offers::OfferDetails;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::offers::{
    data::OffersFilter,
    records::{OfferRecord, OfferUuid},
};

const LIST_OFFERS_SQL: &str = include_str!("sql/list_offers.sql");
const GET_OFFER_SQL: &str = include_str!("sql/get_offer.sql");
const GET_OFFER_FOR_UPDATE_SQL: &str = include_str!("sql/get_offer_for_update.sql");
const CREATE_OFFER_SQL: &str = include_str!("sql/create_offer.sql");
const UPDATE_OFFER_SQL: &str = include_str!("sql/update_offer.sql");
const SOFT_DELETE_OFFER_SQL: &str = include_str!("sql/soft_delete_offer.sql");
const EXPORT_OFFERS_SQL: &str = include_str!("sql/export_offers.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOffersRepository;

impl PgOffersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_offers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &OffersFilter,
    ) -> Result<Vec<OfferRecord>, sqlx::Error> {
        let min_price = filter.min_price.map(to_db_integer).transpose()?;
        let max_price = filter.max_price.map(to_db_integer).transpose()?;

        let limit = i64::from(filter.limit);
        let offset = i64::try_from(filter.offset()).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        query_as::<Postgres, OfferRecord>(LIST_OFFERS_SQL)
            .bind(filter.include_inactive)
            .bind(filter.operator.as_deref())
            .bind(filter.category.as_deref())
            .bind(filter.region.as_deref())
            .bind(min_price)
            .bind(max_price)
            .bind(filter.sort_by.as_str())
            .bind(filter.sort_order.as_str())
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_offer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferUuid,
    ) -> Result<OfferRecord, sqlx::Error> {
        query_as::<Postgres, OfferRecord>(GET_OFFER_SQL)
            .bind(offer.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn lock_offer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferUuid,
    ) -> Result<OfferRecord, sqlx::Error> {
        query_as::<Postgres, OfferRecord>(GET_OFFER_FOR_UPDATE_SQL)
            .bind(offer.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_offer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        details: &OfferDetails,
    ) -> Result<OfferRecord, sqlx::Error> {
        query_as::<Postgres, OfferRecord>(CREATE_OFFER_SQL)
            .bind(&details.operator)
            .bind(&details.title)
            .bind(&details.data_amount)
            .bind(to_db_integer(details.minutes)?)
            .bind(to_db_integer(details.validity_days)?)
            .bind(to_db_integer(details.selling_price)?)
            .bind(details.original_price.map(to_db_integer).transpose()?)
            .bind(&details.region)
            .bind(&details.category)
            .bind(&details.whatsapp_number)
            .bind(details.description.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_offer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferUuid,
        details: &OfferDetails,
        is_active: bool,
    ) -> Result<OfferRecord, sqlx::Error> {
        query_as::<Postgres, OfferRecord>(UPDATE_OFFER_SQL)
            .bind(offer.into_uuid())
            .bind(&details.operator)
            .bind(&details.title)
            .bind(&details.data_amount)
            .bind(to_db_integer(details.minutes)?)
            .bind(to_db_integer(details.validity_days)?)
            .bind(to_db_integer(details.selling_price)?)
            .bind(details.original_price.map(to_db_integer).transpose()?)
            .bind(&details.region)
            .bind(&details.category)
            .bind(&details.whatsapp_number)
            .bind(details.description.as_deref())
            .bind(is_active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn soft_delete_offer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SOFT_DELETE_OFFER_SQL)
            .bind(offer.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn export_offers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<OfferRecord>, sqlx::Error> {
        query_as::<Postgres, OfferRecord>(EXPORT_OFFERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}

fn to_db_integer(value: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(value).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

fn from_db_integer(row: &PgRow, column: &str) -> sqlx::Result<u32> {
    let value: i32 = row.try_get(column)?;

    u32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for OfferRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let original_price = row
            .try_get::<Option<i32>, _>("original_price")?
            .map(u32::try_from)
            .transpose()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "original_price".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: OfferUuid::from_uuid(row.try_get("uuid")?),
            details: OfferDetails {
                operator: row.try_get("operator")?,
                title: row.try_get("title")?,
                data_amount: row.try_get("data_amount")?,
                minutes: from_db_integer(row, "minutes")?,
                validity_days: from_db_integer(row, "validity_days")?,
                selling_price: from_db_integer(row, "selling_price")?,
                original_price,
                region: row.try_get("region")?,
                category: row.try_get("category")?,
                whatsapp_number: row.try_get("whatsapp_number")?,
                description: row.try_get("description")?,
            },
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
