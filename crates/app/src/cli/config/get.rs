use clap::Args;
use offerdesk::prelude::encode_value;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct GetConfigArgs {
    /// Only print this key
    key: Option<String>,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: GetConfigArgs) -> Result<(), String> {
    let ctx = args.database.connect().await?;

    let values = ctx
        .config
        .get_config()
        .await
        .map_err(|error| format!("failed to load config: {error}"))?;

    if let Some(key) = args.key {
        let value = values
            .get(&key)
            .ok_or_else(|| format!("config key not found: {key}"))?;

        println!("{}", encode_value(value));

        return Ok(());
    }

    let mut entries: Vec<_> = values.into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    for (key, value) in entries {
        println!("{key}: {}", encode_value(&value));
    }

    Ok(())
}
