//! Scheduled payment batch runner.
//!
//! Cron-style entry point: processes every pending scheduled payment due
//! today (or also overdue ones with `--process-overdue`), then exits.
//! Intended to be run once daily, e.g. from crontab:
//!
//! ```text
//! 0 6 * * * /usr/local/bin/run_scheduled_payments --process-overdue
//! ```

use clap::Parser;
use ledger_service::{config, db, services::scheduler_service};
use tracing_subscriber::EnvFilter;

/// Run scheduled payments that are due.
#[derive(Debug, Parser)]
#[command(name = "run_scheduled_payments")]
struct Args {
    /// Include overdue payments in the queue, not just those due today
    #[arg(long)]
    process_overdue: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let config = config::Config::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(&pool).await?;

    let summary = scheduler_service::process_due(&pool, args.process_overdue).await?;

    tracing::info!(
        executed = summary.executed,
        skipped = summary.skipped,
        process_overdue = args.process_overdue,
        "scheduled payment run complete"
    );

    Ok(())
}
