use std::path::PathBuf;

use clap::{Args, ValueEnum};
use offerdesk::prelude::{to_csv, to_json};

use super::{DatabaseArgs, emit};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ExportFormat {
    #[default]
    Csv,
    Json,
}

#[derive(Debug, Args)]
pub(crate) struct ExportArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: ExportFormat,

    /// Write to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: ExportArgs) -> Result<(), String> {
    let ctx = args.database.connect().await?;

    let offers = ctx
        .offers
        .export_all()
        .await
        .map_err(|error| format!("failed to export offers: {error}"))?;

    let text = match args.format {
        ExportFormat::Csv => to_csv(offers.iter().map(|offer| &offer.details)),
        ExportFormat::Json => to_json(&offers),
    }
    .map_err(|error| error.to_string())?;

    emit(&text, args.output.as_deref()).await?;

    if args.output.is_some() {
        println!("exported {} offer(s)", offers.len());
    }

    Ok(())
}
