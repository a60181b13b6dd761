use clap::Args;
use offerdesk::prelude::{decode_value, encode_value};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct SetConfigArgs {
    key: String,

    /// JSON value; anything that is not JSON is stored as a string
    value: String,

    /// Human-readable note stored next to the value
    #[arg(long)]
    description: Option<String>,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: SetConfigArgs) -> Result<(), String> {
    let ctx = args.database.connect().await?;

    let entry = ctx
        .config
        .set_value(args.key, decode_value(&args.value), args.description)
        .await
        .map_err(|error| format!("failed to store config value: {error}"))?;

    println!("{}: {}", entry.key, encode_value(&entry.value));

    Ok(())
}
