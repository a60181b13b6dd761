//! Import Session
//!
//! Drives one upload attempt through parsing, normalisation and validation, then tracks the
//! persistence hand-off. The session never talks to a store itself: callers take the batch with
//! [`ImportSession::begin_persist`] and report back with [`ImportSession::commit`] or
//! [`ImportSession::persist_failed`].

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    config::StoreConfig,
    normalize::{NormalizeDefaults, OfferCandidate, normalize_all},
    offers::{Field, OfferDetails},
    parser::{FormatError, RawRow, parse},
    validate::{ValidationError, ValidationRules, Validator},
};

/// Import Stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportStage {
    /// Nothing has happened yet
    Idle,

    /// Splitting text into rows
    Parsing,

    /// Promoting rows into typed candidates
    Normalizing,

    /// Applying the rule set
    Validating,

    /// At least one row failed a rule
    ValidationFailed,

    /// Every row passed and the batch may be stored
    ReadyToPersist,

    /// The batch has been handed to the store
    Persisting,

    /// The store accepted the batch
    Committed,

    /// The store rejected the batch
    PersistFailed,
}

impl ImportStage {
    /// Snake-case identifier, as serialised.
    pub const fn as_str(self) -> &'static str {
        match self {
            ImportStage::Idle => "idle",
            ImportStage::Parsing => "parsing",
            ImportStage::Normalizing => "normalizing",
            ImportStage::Validating => "validating",
            ImportStage::ValidationFailed => "validation_failed",
            ImportStage::ReadyToPersist => "ready_to_persist",
            ImportStage::Persisting => "persisting",
            ImportStage::Committed => "committed",
            ImportStage::PersistFailed => "persist_failed",
        }
    }
}

impl fmt::Display for ImportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().replace('_', " "))
    }
}

/// Errors that abort an import attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// Malformed CSV structure.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Required columns absent from the header row.
    #[error("missing required column(s): {}", join_fields(.0))]
    MissingHeaders(SmallVec<[Field; 5]>),

    /// Pre-parsed upload without a single row.
    #[error("import must contain at least one row")]
    NoRows,

    /// Operation attempted from the wrong stage.
    #[error("cannot {action} while the import is {stage}")]
    InvalidStage {
        /// Attempted operation
        action: &'static str,

        /// Stage the session was in
        stage: ImportStage,
    },
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Everything an import needs besides its input.
#[derive(Debug, Clone, Default)]
pub struct ImportSettings {
    /// Normaliser defaults
    pub defaults: NormalizeDefaults,

    /// Validation bounds
    pub rules: ValidationRules,
}

impl From<&StoreConfig> for ImportSettings {
    fn from(config: &StoreConfig) -> Self {
        Self {
            defaults: NormalizeDefaults::from(config),
            rules: ValidationRules::default(),
        }
    }
}

/// Summary of an import attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Stage reached
    pub stage: ImportStage,

    /// Whether every row passed validation
    pub valid: bool,

    /// Rows without validation errors
    pub valid_count: usize,

    /// Rows submitted
    pub total_count: usize,

    /// Every validation error, row-major
    pub errors: Vec<ValidationError>,

    /// Message of the most recent store failure, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persist_error: Option<String>,
}

/// Import Session
#[derive(Debug, Clone)]
pub struct ImportSession {
    stage: ImportStage,
    candidates: Vec<OfferCandidate>,
    errors: Vec<ValidationError>,
    valid_count: usize,
    imported_count: Option<usize>,
    persist_error: Option<String>,
}

impl ImportSession {
    /// Run CSV text through parsing, header checks, normalisation and validation.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Format`] for structurally broken text and
    /// [`ImportError::MissingHeaders`] when required columns are absent. In both cases no row
    /// is normalised.
    pub fn from_csv(text: &str, settings: &ImportSettings) -> Result<Self, ImportError> {
        let parsed = parse(text)?;

        let missing = parsed.missing_headers();

        if !missing.is_empty() {
            return Err(ImportError::MissingHeaders(missing));
        }

        Self::from_rows(parsed.rows, settings)
    }

    /// Run already parsed rows through normalisation and validation.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::NoRows`] for an empty row list.
    pub fn from_rows(rows: Vec<RawRow>, settings: &ImportSettings) -> Result<Self, ImportError> {
        if rows.is_empty() {
            return Err(ImportError::NoRows);
        }

        let candidates = normalize_all(&rows, &settings.defaults);
        let validator = Validator::new(settings.rules.clone());

        let mut errors = Vec::new();
        let mut valid_count = 0;

        for candidate in &candidates {
            let row_errors = validator.validate_source(candidate.row, &candidate.source);

            if row_errors.is_empty() {
                valid_count += 1;
            }

            errors.extend(row_errors);
        }

        let stage = if errors.is_empty() {
            ImportStage::ReadyToPersist
        } else {
            ImportStage::ValidationFailed
        };

        Ok(Self {
            stage,
            candidates,
            errors,
            valid_count,
            imported_count: None,
            persist_error: None,
        })
    }

    /// Current stage.
    pub fn stage(&self) -> ImportStage {
        self.stage
    }

    /// Normalised candidates, in row order.
    pub fn candidates(&self) -> &[OfferCandidate] {
        &self.candidates
    }

    /// Validation errors, row-major.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Rows submitted.
    pub fn total_count(&self) -> usize {
        self.candidates.len()
    }

    /// Rows stored by the last successful commit.
    pub fn imported_count(&self) -> Option<usize> {
        self.imported_count
    }

    /// Message of the most recent store failure.
    pub fn persist_error(&self) -> Option<&str> {
        self.persist_error.as_deref()
    }

    /// Hand the whole batch over for storage.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::InvalidStage`] unless the session is ready to persist.
    pub fn begin_persist(&mut self) -> Result<Vec<OfferDetails>, ImportError> {
        self.expect_stage(ImportStage::ReadyToPersist, "begin persisting")?;

        self.stage = ImportStage::Persisting;
        self.persist_error = None;

        Ok(self
            .candidates
            .iter()
            .map(|candidate| candidate.offer.clone())
            .collect())
    }

    /// Record that the store accepted `count` records.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::InvalidStage`] unless a persist is in flight.
    pub fn commit(&mut self, count: usize) -> Result<(), ImportError> {
        self.expect_stage(ImportStage::Persisting, "commit")?;

        self.stage = ImportStage::Committed;
        self.imported_count = Some(count);

        Ok(())
    }

    /// Record that the store rejected the batch; the session becomes ready for a manual retry.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::InvalidStage`] unless a persist is in flight.
    pub fn persist_failed(&mut self, message: impl Into<String>) -> Result<(), ImportError> {
        self.expect_stage(ImportStage::Persisting, "record a persist failure")?;

        self.stage = ImportStage::ReadyToPersist;
        self.persist_error = Some(message.into());

        Ok(())
    }

    /// Summarise the attempt.
    ///
    /// A session waiting for a retry after a store failure reports [`ImportStage::PersistFailed`].
    pub fn report(&self) -> ImportReport {
        let stage = match (self.stage, &self.persist_error) {
            (ImportStage::ReadyToPersist, Some(_)) => ImportStage::PersistFailed,
            (stage, _) => stage,
        };

        ImportReport {
            stage,
            valid: self.errors.is_empty(),
            valid_count: self.valid_count,
            total_count: self.total_count(),
            errors: self.errors.clone(),
            persist_error: self.persist_error.clone(),
        }
    }

    fn expect_stage(&self, expected: ImportStage, action: &'static str) -> Result<(), ImportError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(ImportError::InvalidStage {
                action,
                stage: self.stage,
            })
        }
    }
}
