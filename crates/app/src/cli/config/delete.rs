use clap::Args;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct DeleteConfigArgs {
    key: String,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: DeleteConfigArgs) -> Result<(), String> {
    let ctx = args.database.connect().await?;

    ctx.config
        .delete_value(args.key.clone())
        .await
        .map_err(|error| format!("failed to delete config value: {error}"))?;

    println!("deleted {}", args.key);

    Ok(())
}
