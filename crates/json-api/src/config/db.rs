//! Database Config

use clap::Args;

/// Offer store database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string; pending migrations are applied at startup
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,
}
