//! Imports service errors.

use offerdesk::pipeline::ImportError;
use thiserror::Error;

use crate::domain::config::ConfigServiceError;

#[derive(Debug, Error)]
pub enum ImportsServiceError {
    /// The upload could not be read as an offer CSV.
    #[error(transparent)]
    Import(#[from] ImportError),

    /// Store defaults could not be loaded.
    #[error("failed to load store configuration: {0}")]
    Config(#[from] ConfigServiceError),

    /// The store rejected the batch; carries the store's message unchanged.
    #[error("{0}")]
    Persistence(String),
}
