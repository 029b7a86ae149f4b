use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use database::Database;
use indexer::{ApplyOutcome, BoardLogEntry, ReplayStats, Replayer};

#[derive(Debug, Parser)]
#[command(name = "replay-log")]
#[command(about = "Replay a board operation log (NDJSON) into the Agora index")]
struct Args {
    /// Log file with one JSON-encoded BoardLogEntry per line
    #[arg(long)]
    log: PathBuf,

    /// SQLite database URL
    #[arg(long, default_value = "sqlite:agora.db?mode=rwc")]
    db: String,

    /// Clear entity tables and reset the cursor before replaying
    #[arg(long)]
    reset: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let db = Database::connect(&args.db).await?;
    db.migrate().await?;

    if args.reset {
        db.reset().await?;
    }

    let replayer = Replayer::new(db);

    let file = File::open(&args.log)?;
    let mut stats = ReplayStats::default();
    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let entry: BoardLogEntry = serde_json::from_str(&line)?;
        match replayer.apply(&entry).await? {
            ApplyOutcome::Applied => stats.applied += 1,
            ApplyOutcome::Skipped => stats.skipped += 1,
            ApplyOutcome::UnknownOperation => stats.unknown += 1,
        }
    }

    info!(
        applied = stats.applied,
        skipped = stats.skipped,
        unknown = stats.unknown,
        "Replay complete"
    );

    Ok(())
}
