use clap::Args;
use offerdesk::prelude::{OfferStats, to_json};

use super::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct StatsArgs {
    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: StatsArgs) -> Result<(), String> {
    let ctx = args.database.connect().await?;

    let offers = ctx
        .offers
        .export_all()
        .await
        .map_err(|error| format!("failed to load offers: {error}"))?;

    let stats = OfferStats::from_offers(
        offers
            .iter()
            .map(|offer| (&offer.details, offer.is_active)),
    );

    println!("{}", to_json(&stats).map_err(|error| error.to_string())?);

    Ok(())
}
