//! Imports service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use offerdesk::{
    parser::RawRow,
    pipeline::{ImportSession, ImportSettings, ImportStage},
};
use tracing::{info, warn};

use crate::domain::{
    config::ConfigService,
    imports::{
        errors::ImportsServiceError,
        outcome::{CommittedImport, ImportOutcome},
    },
    offers::OffersService,
};

/// Server-side import pipeline; every upload is validated again before it is stored.
#[derive(Clone)]
pub struct OfferImportService {
    offers: Arc<dyn OffersService>,
    config: Arc<dyn ConfigService>,
}

impl std::fmt::Debug for OfferImportService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OfferImportService").finish_non_exhaustive()
    }
}

impl OfferImportService {
    #[must_use]
    pub fn new(offers: Arc<dyn OffersService>, config: Arc<dyn ConfigService>) -> Self {
        Self { offers, config }
    }

    async fn settings(&self) -> Result<ImportSettings, ImportsServiceError> {
        let config = self.config.store_config().await?;

        Ok(ImportSettings::from(&config))
    }

    async fn run(
        &self,
        mut session: ImportSession,
        validate_only: bool,
    ) -> Result<ImportOutcome, ImportsServiceError> {
        if validate_only {
            return Ok(ImportOutcome::Validated(session.report()));
        }

        if session.stage() == ImportStage::ValidationFailed {
            warn!(
                errors = session.errors().len(),
                total = session.total_count(),
                "import rejected by validation"
            );

            return Ok(ImportOutcome::Rejected(session.report()));
        }

        let batch = session.begin_persist()?;

        match self.offers.insert_batch(batch).await {
            Ok(offers) => {
                session.commit(offers.len())?;

                info!(imported = offers.len(), "import committed");

                Ok(ImportOutcome::Committed(CommittedImport {
                    imported_count: offers.len(),
                    total_count: session.total_count(),
                    offers,
                }))
            }
            Err(error) => {
                let message = error.to_string();

                session.persist_failed(message.clone())?;

                Err(ImportsServiceError::Persistence(message))
            }
        }
    }
}

#[async_trait]
impl ImportsService for OfferImportService {
    #[tracing::instrument(
        name = "imports.service.import_rows",
        skip(self, rows),
        fields(rows = rows.len()),
        err
    )]
    async fn import_rows(
        &self,
        rows: Vec<RawRow>,
        validate_only: bool,
    ) -> Result<ImportOutcome, ImportsServiceError> {
        let session = ImportSession::from_rows(rows, &self.settings().await?)?;

        self.run(session, validate_only).await
    }

    #[tracing::instrument(
        name = "imports.service.import_csv",
        skip(self, text),
        fields(bytes = text.len()),
        err
    )]
    async fn import_csv(
        &self,
        text: String,
        validate_only: bool,
    ) -> Result<ImportOutcome, ImportsServiceError> {
        let session = ImportSession::from_csv(&text, &self.settings().await?)?;

        self.run(session, validate_only).await
    }
}

#[automock]
#[async_trait]
pub trait ImportsService: Send + Sync {
    /// Import rows a client has already parsed.
    async fn import_rows(
        &self,
        rows: Vec<RawRow>,
        validate_only: bool,
    ) -> Result<ImportOutcome, ImportsServiceError>;

    /// Import raw CSV text.
    async fn import_csv(
        &self,
        text: String,
        validate_only: bool,
    ) -> Result<ImportOutcome, ImportsServiceError>;
}
