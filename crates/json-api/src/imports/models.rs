//! Import Models

use std::collections::BTreeMap;

use offerdesk::{
    parser::RawRow,
    pipeline::{ImportReport, ImportStage},
};
use offerdesk_app::domain::imports::outcome::{CommittedImport, ImportOutcome};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{errors::ValidationErrorResponse, offers::models::OfferResponse};

/// Import Rows Request
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct ImportRowsRequest {
    /// Rows keyed by column name, in file order
    pub rows: Vec<BTreeMap<String, Value>>,

    /// Validate without storing anything
    #[serde(default)]
    pub validate_only: bool,
}

impl ImportRowsRequest {
    /// Convert to raw rows numbered from 1; scalars are rendered as text and nulls dropped.
    pub(crate) fn into_raw_rows(self) -> Vec<RawRow> {
        self.rows
            .into_iter()
            .enumerate()
            .map(|(index, values)| {
                RawRow::new(
                    index + 1,
                    values.into_iter().filter_map(|(key, value)| {
                        let text = match value {
                            Value::Null => return None,
                            Value::String(text) => text,
                            other => other.to_string(),
                        };

                        Some((key, text.trim().to_string()))
                    }),
                )
            })
            .collect()
    }
}

/// Import Response
///
/// One shape for every outcome: a validation report, a rejection, or a committed batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ImportResponse {
    /// Stage the import reached
    pub stage: String,

    /// Whether every row passed validation
    pub valid: bool,

    /// Rows without validation errors
    pub valid_count: usize,

    /// Rows submitted
    pub total_count: usize,

    /// Rows stored, when the batch was committed
    pub imported_count: Option<usize>,

    /// Every validation error, row-major
    pub errors: Vec<ValidationErrorResponse>,

    /// Stored offers, when the batch was committed
    pub offers: Vec<OfferResponse>,
}

impl From<ImportReport> for ImportResponse {
    fn from(report: ImportReport) -> Self {
        ImportResponse {
            stage: report.stage.as_str().to_string(),
            valid: report.valid,
            valid_count: report.valid_count,
            total_count: report.total_count,
            imported_count: None,
            errors: report.errors.into_iter().map(Into::into).collect(),
            offers: Vec::new(),
        }
    }
}

impl From<CommittedImport> for ImportResponse {
    fn from(committed: CommittedImport) -> Self {
        ImportResponse {
            stage: ImportStage::Committed.as_str().to_string(),
            valid: true,
            valid_count: committed.total_count,
            total_count: committed.total_count,
            imported_count: Some(committed.imported_count),
            errors: Vec::new(),
            offers: committed.offers.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ImportOutcome> for ImportResponse {
    fn from(outcome: ImportOutcome) -> Self {
        match outcome {
            ImportOutcome::Validated(report) | ImportOutcome::Rejected(report) => report.into(),
            ImportOutcome::Committed(committed) => committed.into(),
        }
    }
}
