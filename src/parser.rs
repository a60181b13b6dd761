//! CSV Parser
//!
//! Splits raw delimited text into [`RawRow`] mappings keyed by lowercased header name.
//!
//! The dialect is intentionally small: one comma delimiter, one record per line, and a value
//! wrapped in double quotes has that pair removed (with `""` collapsed to `"`). A quoted value
//! that itself contains a comma is still split at that comma.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::offers::Field;

/// Malformed CSV structure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Fewer than a header row and one data row.
    #[error("CSV must have a header row and at least one data row, found {found} non-blank line(s)")]
    TooFewRows {
        /// Number of non-blank lines found
        found: usize,
    },
}

/// Raw Row
///
/// Loosely typed values for one data row. Nothing about field presence is trusted until the row
/// has been normalised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    /// 1-based data row number, header excluded
    pub row: usize,

    /// Trimmed values keyed by lowercased header name
    pub values: FxHashMap<String, String>,
}

impl RawRow {
    /// Create a row from header/value pairs; header names are trimmed and lowercased.
    pub fn new<K, V>(row: usize, values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            row,
            values: values
                .into_iter()
                .map(|(key, value)| (key.as_ref().trim().to_lowercase(), value.into()))
                .collect(),
        }
    }

    /// Look up a value by header name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Trimmed value for a field, `None` when missing or blank.
    pub fn field(&self, field: Field) -> Option<&str> {
        self.get(field.as_str())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

/// Parsed CSV
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCsv {
    /// Lowercased, trimmed header names in file order
    pub headers: Vec<String>,

    /// Data rows in file order
    pub rows: Vec<RawRow>,
}

impl ParsedCsv {
    /// Required columns absent from the header row, in canonical order.
    pub fn missing_headers(&self) -> SmallVec<[Field; 5]> {
        Field::REQUIRED
            .into_iter()
            .filter(|field| !self.headers.iter().any(|header| header == field.as_str()))
            .collect()
    }
}

/// Parse CSV text.
///
/// The first non-blank line is the header row and every later non-blank line is a data row.
/// Short rows are padded with empty values and surplus values are dropped. A leading byte order
/// mark is ignored.
///
/// # Errors
///
/// Returns [`FormatError::TooFewRows`] when fewer than two non-blank lines exist.
pub fn parse(text: &str) -> Result<ParsedCsv, FormatError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();

    let Some((header_line, data_lines)) = lines.split_first() else {
        return Err(FormatError::TooFewRows { found: 0 });
    };

    if data_lines.is_empty() {
        return Err(FormatError::TooFewRows { found: 1 });
    }

    let headers: Vec<String> = split_line(header_line)
        .map(|header| header.to_lowercase())
        .collect();

    let rows = data_lines
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            let mut values = split_line(line);

            RawRow {
                row: idx + 1,
                values: headers
                    .iter()
                    .map(|header| (header.clone(), values.next().unwrap_or_default()))
                    .collect(),
            }
        })
        .collect();

    Ok(ParsedCsv { headers, rows })
}

fn split_line(line: &str) -> impl Iterator<Item = String> + '_ {
    line.split(',').map(unquote)
}

fn unquote(value: &str) -> String {
    let value = value.trim();

    value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .map_or_else(|| value.to_string(), |inner| inner.replace("\"\"", "\""))
}
