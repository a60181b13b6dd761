use std::{io, path::PathBuf};

use clap::Args;
use offerdesk::prelude::{ImportSession, ImportSettings, write_report};
use offerdesk_app::domain::imports::outcome::ImportOutcome;

use super::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ImportArgs {
    /// CSV file to import
    file: PathBuf,

    /// Only validate; nothing is stored
    #[arg(long)]
    validate_only: bool,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: ImportArgs) -> Result<(), String> {
    let text = tokio::fs::read_to_string(&args.file)
        .await
        .map_err(|error| format!("failed to read {}: {error}", args.file.display()))?;

    let ctx = args.database.connect().await?;

    let config = ctx
        .config
        .store_config()
        .await
        .map_err(|error| format!("failed to load config: {error}"))?;

    // Local pre-check so problems are listed before anything is sent to the store.
    let session = ImportSession::from_csv(&text, &ImportSettings::from(&config))
        .map_err(|error| error.to_string())?;

    let report = session.report();

    write_report(io::stdout().lock(), &report)
        .map_err(|error| format!("failed to write report: {error}"))?;

    if !report.valid {
        return Err(format!(
            "import aborted: {} validation error(s)",
            report.errors.len()
        ));
    }

    if args.validate_only {
        return Ok(());
    }

    let outcome = ctx
        .imports
        .import_csv(text, false)
        .await
        .map_err(|error| format!("import failed: {error}"))?;

    match outcome {
        ImportOutcome::Committed(committed) => {
            println!(
                "imported {} of {} offer(s)",
                committed.imported_count, committed.total_count
            );

            Ok(())
        }
        ImportOutcome::Rejected(report) | ImportOutcome::Validated(report) => {
            write_report(io::stdout().lock(), &report)
                .map_err(|error| format!("failed to write report: {error}"))?;

            Err("import rejected by the store".to_string())
        }
    }
}
