//! Validation report

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};

use crate::{pipeline::ImportReport, validate::ValidationError};

/// Render validation errors as a text table.
pub fn error_table(errors: &[ValidationError]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Row", "Field", "Value", "Problem"]);

    for error in errors {
        builder.push_record([
            error.row.to_string(),
            error.field.to_string(),
            error.value.clone(),
            error.message.clone(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::first(), Alignment::right());

    table.to_string()
}

/// Write an import report: a count summary followed by the error table, if any.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_report(mut out: impl io::Write, report: &ImportReport) -> io::Result<()> {
    writeln!(
        out,
        "{} of {} row(s) valid ({})",
        report.valid_count, report.total_count, report.stage
    )?;

    if !report.errors.is_empty() {
        writeln!(out, "\n{}", error_table(&report.errors))?;
    }

    if let Some(message) = &report.persist_error {
        writeln!(out, "\nStore rejected the batch: {message}")?;
    }

    Ok(())
}
