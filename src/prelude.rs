//! Offerdesk prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    config::{StoreConfig, decode_value, encode_value},
    export::{ExportError, report::write_report, template_csv, to_csv, to_json},
    normalize::{NormalizeDefaults, OfferCandidate, normalize, normalize_all},
    offers::{Category, DEFAULT_REGION, Field, OfferDetails, Operator},
    parser::{FormatError, ParsedCsv, RawRow, parse},
    pipeline::{ImportError, ImportReport, ImportSession, ImportSettings, ImportStage},
    stats::OfferStats,
    validate::{ImportCheck, Rule, ValidationError, ValidationRules, Validator},
    view::{OfferView, SortOrder, ViewSort},
};
