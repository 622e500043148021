mod config;
mod document;
mod errors;
mod llm_client;
mod matcher;
mod pipeline;
mod profile;
mod roster;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{matcher_config_from_env, profile_book_path_from_env, Config};
use crate::document::load_document;
use crate::llm_client::LlmClient;
use crate::matcher::NameMatcher;
use crate::pipeline::Pipeline;
use crate::profile::ProfileGenerator;

#[derive(Parser)]
#[command(
    name = "roster-profiler",
    version,
    about = "Fill the profile column of a customer roster from a PDF profile book"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate profiles for every customer without one (default)
    Run {
        /// Profile book PDF (overrides PROFILE_BOOK_PATH)
        #[arg(long, value_name = "FILE")]
        profile_book: Option<PathBuf>,

        /// Customer spreadsheet, rewritten in place (overrides ROSTER_PATH)
        #[arg(long, value_name = "FILE")]
        roster: Option<PathBuf>,
    },
    /// Show the profile book passage a name would be matched to, without calling the API
    Match {
        #[arg(long)]
        first: String,

        #[arg(long)]
        last: String,

        /// Profile book PDF (overrides PROFILE_BOOK_PATH)
        #[arg(long, value_name = "FILE")]
        profile_book: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok(); // load .env if present; ignore if missing

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}=info", env!("CARGO_CRATE_NAME")))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let command = cli.command.unwrap_or(Commands::Run {
        profile_book: None,
        roster: None,
    });

    match command {
        Commands::Run {
            profile_book,
            roster,
        } => run(profile_book, roster).await,
        Commands::Match {
            first,
            last,
            profile_book,
        } => show_match(&first, &last, profile_book),
    }
}

async fn run(profile_book: Option<PathBuf>, roster: Option<PathBuf>) -> Result<()> {
    info!("Starting customer profile generation...");

    // Missing credentials end the run here, before any file is touched.
    let config = Config::from_env()?;
    let profile_book = profile_book.unwrap_or(config.profile_book_path);
    let roster = roster.unwrap_or(config.roster_path);

    let llm = LlmClient::new(config.openai_api_key, config.openai_base_url);
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let pipeline = Pipeline::new(
        NameMatcher::new(config.matcher),
        ProfileGenerator::new(Arc::new(llm)),
    );
    let summary = pipeline.run(&profile_book, &roster).await?;

    info!(
        "Profile generation completed: {} customers, {} generated, {} skipped",
        summary.total, summary.generated, summary.skipped
    );
    Ok(())
}

fn show_match(first: &str, last: &str, profile_book: Option<PathBuf>) -> Result<()> {
    let profile_book = profile_book.unwrap_or_else(profile_book_path_from_env);
    let matcher = NameMatcher::new(matcher_config_from_env()?);
    let corpus = load_document(&profile_book)?;

    match matcher.find_best_window(first, last, &corpus.text) {
        Some(window) => {
            info!(
                "Best match for {first} {last}: variant {:?}, score {}, offset {}",
                window.variant, window.score, window.offset
            );
            println!("{}", window.text.trim());
        }
        None => println!("{}", matcher::no_match_placeholder(first, last)),
    }
    Ok(())
}
