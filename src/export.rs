//! Export Formatter
//!
//! Renders offers back to CSV in the fixed column order of [`Field::ALL`], or to pretty JSON.
//! Values containing a comma, quote or line break are quoted with inner quotes doubled.

use std::{io, string::FromUtf8Error};

use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::Serialize;
use thiserror::Error;

use crate::{
    config::StoreConfig,
    offers::{DEFAULT_REGION, Field, OfferDetails},
};

pub mod report;

/// Errors that can occur while rendering an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV writer failure.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Flushing the CSV buffer failed.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The rendered CSV was not valid UTF-8.
    #[error(transparent)]
    Utf8(#[from] FromUtf8Error),

    /// JSON serialisation failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Render offers as CSV text with a header row.
///
/// # Errors
///
/// Returns an [`ExportError`] if the CSV writer fails.
pub fn to_csv<'a>(
    offers: impl IntoIterator<Item = &'a OfferDetails>,
) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(Field::ALL.map(Field::as_str))?;

    for offer in offers {
        writer.write_record(Field::ALL.map(|field| offer.field_text(field)))?;
    }

    let bytes = writer.into_inner().map_err(|err| err.into_error())?;

    Ok(String::from_utf8(bytes)?)
}

/// Sample offers shipped in the downloadable import template.
pub fn template_offers(config: &StoreConfig) -> [OfferDetails; 2] {
    [
        OfferDetails {
            operator: "GP".to_string(),
            title: "50GB + 1500 Minutes Bundle".to_string(),
            data_amount: "50GB".to_string(),
            minutes: 1500,
            validity_days: 30,
            selling_price: 775,
            original_price: Some(900),
            region: DEFAULT_REGION.to_string(),
            category: "combo".to_string(),
            whatsapp_number: config.default_whatsapp.clone(),
            description: Some("Best value combo pack".to_string()),
        },
        OfferDetails {
            operator: "Robi".to_string(),
            title: "25GB Data Pack".to_string(),
            data_amount: "25GB".to_string(),
            minutes: 0,
            validity_days: 30,
            selling_price: 450,
            original_price: Some(500),
            region: DEFAULT_REGION.to_string(),
            category: "data".to_string(),
            whatsapp_number: config.default_whatsapp.clone(),
            description: Some("High speed data pack".to_string()),
        },
    ]
}

/// Render the import template: every column plus two sample rows.
///
/// # Errors
///
/// Returns an [`ExportError`] if the CSV writer fails.
pub fn template_csv(config: &StoreConfig) -> Result<String, ExportError> {
    to_csv(&template_offers(config))
}

/// Render any export document as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`ExportError::Json`] if the value cannot be serialised.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(value)?)
}
