use anki_review::export::json::{export_records_to_path, import_deck_set, import_review_log};
use anki_review::{RecordSet, Scheduler, Sm2Config};

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sm2-review", about = "SM-2 scheduling for imported Anki decks", version)]
struct Cli {
    /// Deck listing produced by the package import
    decks: PathBuf,

    /// Review log to replay before answering
    #[arg(long)]
    log: Option<PathBuf>,

    /// Evaluation time (RFC 3339), defaults to the current time
    #[arg(long)]
    now: Option<DateTime<Utc>>,

    /// JSON file overriding SM-2 parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "plain")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Card counts per bucket and average ease factor
    Stats {
        /// Restrict to one deck
        #[arg(long)]
        deck: Option<String>,
    },
    /// Card ids per bucket
    Snapshot,
    /// The card to study next
    Next,
    /// Write all scheduling records as JSON
    Export {
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Sm2Config::from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Sm2Config::default(),
    };
    let deck_set = import_deck_set(&cli.decks)
        .with_context(|| format!("Failed to load decks from {}", cli.decks.display()))?;
    let scheduler = Scheduler::new(config).context("Invalid scheduler config")?;
    let mut records = RecordSet::from_decks(scheduler, &deck_set);

    if let Some(log_path) = &cli.log {
        let events = import_review_log(log_path)
            .with_context(|| format!("Failed to load review log {}", log_path.display()))?;
        records.replay(&events).context("Failed to replay review log")?;
    }

    let now = cli.now.unwrap_or_else(Utc::now);

    match cli.command {
        Command::Stats { deck } => {
            let stats = match &deck {
                Some(deck_id) => {
                    if deck_set.deck(deck_id).is_none() {
                        anyhow::bail!("Deck '{deck_id}' not found");
                    }
                    records.deck_stats(deck_id, now)
                }
                None => records.stats(now),
            };
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
                OutputFormat::Plain => {
                    let deck_stats = deck_set.stats();
                    println!(
                        "{} decks, {} cards",
                        deck_stats.total_decks, deck_stats.total_cards
                    );
                    println!("  due:      {}", stats.due_count);
                    println!("  new:      {}", stats.new_count);
                    println!("  learning: {}", stats.learning_count);
                    println!("  average ease factor: {:.2}", stats.average_ease_factor);
                }
            }
        }
        Command::Snapshot => {
            let snapshot = records.snapshot(now);
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
                OutputFormat::Plain => {
                    for (label, ids) in [
                        ("due", &snapshot.due_card_ids),
                        ("new", &snapshot.new_card_ids),
                        ("learning", &snapshot.learning_card_ids),
                    ] {
                        let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
                        println!("{label} ({}): {}", ids.len(), ids.join(", "));
                    }
                }
            }
        }
        Command::Next => match (records.next_card(now), cli.format) {
            (Some(record), OutputFormat::Json) => {
                println!("{}", serde_json::to_string_pretty(record)?)
            }
            (Some(record), OutputFormat::Plain) => {
                println!("{} (deck {})", record.card_id(), record.deck_id())
            }
            (None, _) => println!("Nothing to review."),
        },
        Command::Export { out } => {
            export_records_to_path(&records, &out)
                .with_context(|| format!("Failed to export records to {}", out.display()))?;
            println!("Exported {} records to {}", records.len(), out.display());
        }
    }

    Ok(())
}
