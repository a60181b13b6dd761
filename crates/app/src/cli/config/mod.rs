use clap::{Args, Subcommand};

mod delete;
mod get;
mod set;

#[derive(Debug, Args)]
pub(crate) struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Debug, Subcommand)]
enum ConfigSubcommand {
    Get(get::GetConfigArgs),
    Set(set::SetConfigArgs),
    Delete(delete::DeleteConfigArgs),
}

pub(crate) async fn run(command: ConfigCommand) -> Result<(), String> {
    match command.command {
        ConfigSubcommand::Get(args) => get::run(args).await,
        ConfigSubcommand::Set(args) => set::run(args).await,
        ConfigSubcommand::Delete(args) => delete::run(args).await,
    }
}
