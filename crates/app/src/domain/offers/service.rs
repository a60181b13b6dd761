//! Offers service.

use async_trait::async_trait;
use mockall::automock;
use offerdesk::{
    normalize::canonicalize,
    offers::OfferDetails,
    validate::{ValidationError, Validator},
};
use tracing::info;

use crate::{
    database::Db,
    domain::offers::{
        data::{OfferUpdate, OffersFilter},
        errors::OffersServiceError,
        records::{OfferRecord, OfferUuid},
        repository::PgOffersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgOffersService {
    db: Db,
    repository: PgOffersRepository,
    validator: Validator,
}

impl PgOffersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOffersRepository::new(),
            validator: Validator::default(),
        }
    }

    fn validate(&self, offers: &[OfferDetails]) -> Result<(), OffersServiceError> {
        let errors: Vec<ValidationError> = offers
            .iter()
            .enumerate()
            .flat_map(|(idx, offer)| self.validator.validate_source(idx + 1, offer))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(OffersServiceError::Validation(errors))
        }
    }
}

#[async_trait]
impl OffersService for PgOffersService {
    #[tracing::instrument(name = "offers.service.list_offers", skip(self), err)]
    async fn list_offers(
        &self,
        filter: OffersFilter,
    ) -> Result<Vec<OfferRecord>, OffersServiceError> {
        let filter = filter.normalized();

        let mut tx = self.db.begin().await?;

        let offers = self.repository.list_offers(&mut tx, &filter).await?;

        tx.commit().await?;

        Ok(offers)
    }

    #[tracing::instrument(name = "offers.service.get_offer", skip(self), fields(offer_uuid = %offer), err)]
    async fn get_offer(&self, offer: OfferUuid) -> Result<OfferRecord, OffersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_offer(&mut tx, offer).await?;

        tx.commit().await?;

        Ok(record)
    }

    #[tracing::instrument(name = "offers.service.create_offer", skip(self, details), err)]
    async fn create_offer(&self, details: OfferDetails) -> Result<OfferRecord, OffersServiceError> {
        let details = canonicalize(details);

        self.validate(std::slice::from_ref(&details))?;

        let mut tx = self.db.begin().await?;

        let record = self.repository.create_offer(&mut tx, &details).await?;

        tx.commit().await?;

        info!(offer_uuid = %record.uuid, "created offer");

        Ok(record)
    }

    #[tracing::instrument(
        name = "offers.service.insert_batch",
        skip(self, offers),
        fields(batch_size = offers.len()),
        err
    )]
    async fn insert_batch(
        &self,
        offers: Vec<OfferDetails>,
    ) -> Result<Vec<OfferRecord>, OffersServiceError> {
        let offers: Vec<OfferDetails> = offers.into_iter().map(canonicalize).collect();

        self.validate(&offers)?;

        let mut tx = self.db.begin().await?;

        let mut records = Vec::with_capacity(offers.len());

        for details in &offers {
            records.push(self.repository.create_offer(&mut tx, details).await?);
        }

        tx.commit().await?;

        info!(inserted = records.len(), "inserted offer batch");

        Ok(records)
    }

    #[tracing::instrument(
        name = "offers.service.update_offer",
        skip(self, update),
        fields(offer_uuid = %offer),
        err
    )]
    async fn update_offer(
        &self,
        offer: OfferUuid,
        update: OfferUpdate,
    ) -> Result<OfferRecord, OffersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_offer(&mut tx, offer).await?;

        let merged = update.apply(&current.details);

        self.validate(std::slice::from_ref(&merged))?;

        let record = self
            .repository
            .update_offer(
                &mut tx,
                offer,
                &merged,
                update.is_active.unwrap_or(current.is_active),
            )
            .await?;

        tx.commit().await?;

        Ok(record)
    }

    #[tracing::instrument(
        name = "offers.service.soft_delete_offer",
        skip(self),
        fields(offer_uuid = %offer),
        err
    )]
    async fn soft_delete_offer(&self, offer: OfferUuid) -> Result<(), OffersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.soft_delete_offer(&mut tx, offer).await?;

        if rows_affected == 0 {
            return Err(OffersServiceError::NotFound);
        }

        tx.commit().await?;

        info!("deactivated offer");

        Ok(())
    }

    #[tracing::instrument(name = "offers.service.export_all", skip(self), err)]
    async fn export_all(&self) -> Result<Vec<OfferRecord>, OffersServiceError> {
        let mut tx = self.db.begin().await?;

        let offers = self.repository.export_offers(&mut tx).await?;

        tx.commit().await?;

        Ok(offers)
    }
}

#[automock]
#[async_trait]
pub trait OffersService: Send + Sync {
    /// Retrieve one page of offers matching the filter.
    async fn list_offers(&self, filter: OffersFilter)
    -> Result<Vec<OfferRecord>, OffersServiceError>;

    /// Retrieve a single offer, active or not.
    async fn get_offer(&self, offer: OfferUuid) -> Result<OfferRecord, OffersServiceError>;

    /// Validate and store a single offer.
    async fn create_offer(&self, details: OfferDetails) -> Result<OfferRecord, OffersServiceError>;

    /// Validate and store every offer in one transaction; nothing is stored if any row fails.
    async fn insert_batch(
        &self,
        offers: Vec<OfferDetails>,
    ) -> Result<Vec<OfferRecord>, OffersServiceError>;

    /// Apply a partial update; the merged offer is validated before it is stored.
    async fn update_offer(
        &self,
        offer: OfferUuid,
        update: OfferUpdate,
    ) -> Result<OfferRecord, OffersServiceError>;

    /// Mark an offer inactive.
    async fn soft_delete_offer(&self, offer: OfferUuid) -> Result<(), OffersServiceError>;

    /// Every offer regardless of status, newest first.
    async fn export_all(&self) -> Result<Vec<OfferRecord>, OffersServiceError>;
}
