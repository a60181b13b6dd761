//! Import outcomes

use offerdesk::pipeline::ImportReport;
use serde::{Deserialize, Serialize};

use crate::domain::offers::records::OfferRecord;

/// Result of a committed import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommittedImport {
    pub imported_count: usize,
    pub total_count: usize,
    pub offers: Vec<OfferRecord>,
}

/// Import Outcome
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    /// Validate-only run; nothing was stored
    Validated(ImportReport),

    /// At least one row failed validation; nothing was stored
    Rejected(ImportReport),

    /// Every row was stored
    Committed(CommittedImport),
}

impl ImportOutcome {
    /// Rows submitted, whatever the outcome.
    pub fn total_count(&self) -> usize {
        match self {
            ImportOutcome::Validated(report) | ImportOutcome::Rejected(report) => {
                report.total_count
            }
            ImportOutcome::Committed(committed) => committed.total_count,
        }
    }
}
