use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use reviewrank::config::Config;
use reviewrank::corpus::reader::{discover_projects, read_records};
use reviewrank::corpus::record::Query;
use reviewrank::evaluation::evaluate_archive;
use reviewrank::output::terminal;
use reviewrank::scoring::engine::recommend;
use reviewrank::session::TrainingSession;
use reviewrank::text::stem::StemmingNormalizer;

/// Reviewrank: reviewer recommendation for pull requests.
///
/// Learns who reviews what from resolved pull requests (text similarity
/// plus the collaboration network) and ranks likely reviewers for new ones.
#[derive(Parser)]
#[command(name = "reviewrank", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train and test on every project in the archive, report precision/recall
    Evaluate {
        /// Archive directory (default: REVIEWRANK_ARCHIVE_DIR or ./archive)
        #[arg(long)]
        archive: Option<PathBuf>,

        /// Number of reviewers to predict per pull request
        #[arg(long)]
        top_k: Option<usize>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Train on one export and summarize what was learned
    Train {
        /// Training CSV export
        #[arg(long)]
        file: PathBuf,

        /// How many of the strongest relations to list (default: 10)
        #[arg(long, default_value = "10")]
        relations: usize,
    },

    /// Recommend reviewers for a single pull request
    Recommend {
        /// Training CSV export to learn from
        #[arg(long)]
        training: PathBuf,

        /// Pull request title
        #[arg(long)]
        title: String,

        /// Pull request description
        #[arg(long, default_value = "")]
        body: String,

        /// Comma-separated authors, submitter first (e.g. alice,bob)
        #[arg(long)]
        authors: String,

        /// Number of reviewers to return
        #[arg(long)]
        top_k: Option<usize>,

        /// Print the ranking as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("reviewrank=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let normalizer = StemmingNormalizer::new();

    match cli.command {
        Commands::Evaluate {
            archive,
            top_k,
            json,
        } => {
            let config = Config::load()?.with_top_k(top_k);
            config.validate()?;
            let archive = archive.unwrap_or_else(|| config.archive_dir.clone());

            let projects = discover_projects(&archive)?;
            info!(count = projects.len(), archive = %archive.display(), "Projects found");

            let report =
                evaluate_archive(&projects, &config.scoring, config.test_rows, &normalizer)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                terminal::display_archive_report(&report);
            }
        }

        Commands::Train { file, relations } => {
            let config = Config::load()?;
            config.validate()?;

            let batch = read_records(&file, None)?;
            println!(
                "Training on {} submission records from {}...",
                batch.records.len(),
                file.display()
            );

            let mut session = TrainingSession::new(config.scoring)?;
            session
                .train(&batch.records, &normalizer)
                .with_context(|| format!("Training on {} failed", file.display()))?;

            terminal::display_training_summary(&session, relations);
        }

        Commands::Recommend {
            training,
            title,
            body,
            authors,
            top_k,
            json,
        } => {
            let config = Config::load()?.with_top_k(top_k);
            config.validate()?;

            let query = Query::new(&title, &body, &authors, &normalizer)
                .context("The pull request cannot be scored")?;

            let batch = read_records(&training, None)?;
            let mut session = TrainingSession::new(config.scoring)?;
            session
                .train(&batch.records, &normalizer)
                .with_context(|| format!("Training on {} failed", training.display()))?;

            let recommendations = recommend(&session, &query)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&recommendations)?);
            } else {
                let contributor_known = query
                    .contributor()
                    .is_some_and(|c| session.registry().index_of(c).is_some());
                terminal::display_recommendations(&recommendations, contributor_known);
                println!(
                    "{}",
                    format!(
                        "Learned from {} pull requests by {} authors.",
                        session.submissions().len(),
                        session.registry().len()
                    )
                    .dimmed()
                );
            }
        }
    }

    Ok(())
}
