use clap::{Parser, Subcommand};
use sea_orm::Database;
use sea_orm_migration::prelude::*;

/// Schema maintenance for the reimbursement database.
#[derive(Parser)]
#[command(name = "migration")]
struct Cli {
    /// SQLite connection string.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./reimburse.db?mode=rwc"
    )]
    database_url: String,
    #[command(subcommand)]
    command: Option<Step>,
}

#[derive(Subcommand, Default)]
enum Step {
    /// Apply pending migrations (default).
    #[default]
    Up,
    /// Roll back the last `steps` migrations, or all of them.
    Down {
        #[arg(long)]
        steps: Option<u32>,
    },
    /// Drop every table and re-apply, reseeding the development users.
    Fresh,
    Status,
}

#[tokio::main]
async fn main() -> Result<(), DbErr> {
    let cli = Cli::parse();
    let db = Database::connect(&cli.database_url).await?;

    match cli.command.unwrap_or_default() {
        Step::Up => migration::Migrator::up(&db, None).await,
        Step::Down { steps } => migration::Migrator::down(&db, steps).await,
        Step::Fresh => migration::Migrator::fresh(&db).await,
        Step::Status => migration::Migrator::status(&db).await,
    }
}
