//! App Context

use std::sync::Arc;

use sqlx::migrate::MigrateError;
use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        config::{ConfigService, PgConfigService},
        imports::{ImportsService, OfferImportService},
        offers::{OffersService, PgOffersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrations(#[source] MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub offers: Arc<dyn OffersService>,
    pub config: Arc<dyn ConfigService>,
    pub imports: Arc<dyn ImportsService>,
}

impl AppContext {
    /// Build application context from a database URL, applying pending migrations first.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or migrating fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrations)?;

        Ok(Self::from_db(Db::new(pool)))
    }

    /// Wire the Postgres-backed services onto an existing pool.
    #[must_use]
    pub fn from_db(db: Db) -> Self {
        let offers: Arc<dyn OffersService> = Arc::new(PgOffersService::new(db.clone()));
        let config: Arc<dyn ConfigService> = Arc::new(PgConfigService::new(db));

        Self {
            imports: Arc::new(OfferImportService::new(offers.clone(), config.clone())),
            offers,
            config,
        }
    }
}
