//! Database Config

use clap::Args;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// Connection string, `postgres://...` or `sqlite:...`
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Apply pending migrations at start-up.
    #[arg(
        long,
        env = "RUN_MIGRATIONS",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub run_migrations: bool,
}
