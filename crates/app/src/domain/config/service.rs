//! Config service.

use async_trait::async_trait;
use mockall::automock;
use offerdesk::config::{StoreConfig, encode_value};
use rustc_hash::FxHashMap;
use serde_json::Value;
use tracing::info;

use crate::{
    database::Db,
    domain::config::{
        errors::ConfigServiceError, records::ConfigEntryRecord, repository::PgConfigRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgConfigService {
    db: Db,
    repository: PgConfigRepository,
}

impl PgConfigService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgConfigRepository::new(),
        }
    }
}

#[async_trait]
impl ConfigService for PgConfigService {
    #[tracing::instrument(name = "config.service.get_config", skip(self), err)]
    async fn get_config(&self) -> Result<FxHashMap<String, Value>, ConfigServiceError> {
        let mut tx = self.db.begin().await?;

        let entries = self.repository.list_entries(&mut tx).await?;

        tx.commit().await?;

        Ok(entries
            .into_iter()
            .map(|entry| (entry.key, entry.value))
            .collect())
    }

    async fn store_config(&self) -> Result<StoreConfig, ConfigServiceError> {
        Ok(StoreConfig::from_values(&self.get_config().await?))
    }

    #[tracing::instrument(name = "config.service.set_value", skip(self, value, description), err)]
    async fn set_value(
        &self,
        key: String,
        value: Value,
        description: Option<String>,
    ) -> Result<ConfigEntryRecord, ConfigServiceError> {
        let key = key.trim();

        if key.is_empty() {
            return Err(ConfigServiceError::EmptyKey);
        }

        let mut tx = self.db.begin().await?;

        let entry = self
            .repository
            .upsert_entry(&mut tx, key, &encode_value(&value), description.as_deref())
            .await?;

        tx.commit().await?;

        info!(key = %entry.key, "stored config value");

        Ok(entry)
    }

    #[tracing::instrument(name = "config.service.delete_value", skip(self), err)]
    async fn delete_value(&self, key: String) -> Result<(), ConfigServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_entry(&mut tx, key.trim()).await?;

        if rows_affected == 0 {
            return Err(ConfigServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ConfigService: Send + Sync {
    /// Every stored key with its decoded value.
    async fn get_config(&self) -> Result<FxHashMap<String, Value>, ConfigServiceError>;

    /// Stored values overlaid on the built-in defaults.
    async fn store_config(&self) -> Result<StoreConfig, ConfigServiceError>;

    /// Insert or replace a value.
    async fn set_value(
        &self,
        key: String,
        value: Value,
        description: Option<String>,
    ) -> Result<ConfigEntryRecord, ConfigServiceError>;

    /// Remove a value.
    async fn delete_value(&self, key: String) -> Result<(), ConfigServiceError>;
}
