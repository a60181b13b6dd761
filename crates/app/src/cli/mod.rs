use std::path::Path;

use clap::{Args, Parser, Subcommand};
use offerdesk_app::context::AppContext;

mod config;
mod export;
mod import;
mod stats;
mod template;

#[derive(Debug, Parser)]
#[command(name = "offerdesk-app", about = "Offerdesk CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate a CSV file and import its offers
    Import(import::ImportArgs),

    /// Export every stored offer
    Export(export::ExportArgs),

    /// Print the CSV import template
    Template(template::TemplateArgs),

    /// Print offer statistics
    Stats(stats::StatsArgs),

    /// Read or change store configuration
    Config(config::ConfigCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Import(args) => import::run(args).await,
            Commands::Export(args) => export::run(args).await,
            Commands::Template(args) => template::run(args).await,
            Commands::Stats(args) => stats::run(args).await,
            Commands::Config(command) => config::run(command).await,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

impl DatabaseArgs {
    pub(crate) async fn connect(&self) -> Result<AppContext, String> {
        AppContext::from_database_url(&self.database_url)
            .await
            .map_err(|error| format!("{error}: {}", source_message(&error)))
    }
}

fn source_message(error: &dyn std::error::Error) -> String {
    error
        .source()
        .map_or_else(String::new, ToString::to_string)
}

/// Write `text` to `output`, or to stdout when no path is given.
pub(crate) async fn emit(text: &str, output: Option<&Path>) -> Result<(), String> {
    match output {
        Some(path) => tokio::fs::write(path, text)
            .await
            .map_err(|error| format!("failed to write {}: {error}", path.display())),
        None => {
            print!("{text}");
            Ok(())
        }
    }
}
