use std::path::PathBuf;

use clap::Args;
use offerdesk::prelude::template_csv;

use super::{DatabaseArgs, emit};

#[derive(Debug, Args)]
pub(crate) struct TemplateArgs {
    /// Write to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: TemplateArgs) -> Result<(), String> {
    let ctx = args.database.connect().await?;

    let config = ctx
        .config
        .store_config()
        .await
        .map_err(|error| format!("failed to load config: {error}"))?;

    let text = template_csv(&config).map_err(|error| error.to_string())?;

    emit(&text, args.output.as_deref()).await
}
