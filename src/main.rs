//! Jotter - query-or-write assistant CLI
//!
//! Routes natural-language messages to a document store: statements get
//! saved, questions get answered from what was saved.

use anyhow::Result;
use clap::{Parser, Subcommand};
use jotter::{
    config::{JotterConfig, StoreBackend},
    oracle::{ClassificationOracle, OpenAiOracle},
    router::{ActionOutcome, IntentRouter, QueryOutcome, RunOutcome},
    store::{DocumentStore, MemoryStore, RemoteStore},
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "jotter")]
#[command(version)]
#[command(about = "Query-or-write assistant over a document store")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "JOTTER_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Route a single message
    Route {
        /// The message to classify and dispatch
        #[arg(short, long)]
        message: String,
    },

    /// Interactive loop sharing one in-process store across turns
    Chat,

    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("jotter={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = if let Some(ref config_path) = cli.config {
        JotterConfig::from_file(config_path)?
    } else {
        JotterConfig::default()
    };

    match cli.command {
        Commands::Route { message } => {
            let router = build_router(&config)?;
            let outcome = router.route(&message).await?;
            print_outcome(&outcome);
        }
        Commands::Chat => {
            run_chat(&config).await?;
        }
        Commands::Config { default } => {
            let shown = if default {
                JotterConfig::default()
            } else {
                config
            };
            println!("{}", shown.to_toml()?);
        }
    }

    Ok(())
}

/// Build a router from configuration: OpenAI-compatible oracle plus the
/// configured store backend.
fn build_router(config: &JotterConfig) -> Result<IntentRouter> {
    let oracle: Arc<dyn ClassificationOracle> = Arc::new(OpenAiOracle::from_config(&config.oracle)?);
    let store: Arc<dyn DocumentStore> = match config.store.backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Remote => Arc::new(RemoteStore::from_config(&config.store)?),
    };
    Ok(IntentRouter::with_config(
        oracle,
        store,
        config.router.clone(),
    ))
}

/// Read messages from stdin and route each one, keeping the store alive
/// between turns so saved statements can be asked about later.
async fn run_chat(config: &JotterConfig) -> Result<()> {
    let router = build_router(config)?;

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout
        .write_all(b"jotter chat - type a message, empty line to quit\n> ")
        .await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let message = line.trim();
        if message.is_empty() {
            break;
        }

        match router.route(message).await {
            Ok(outcome) => {
                if outcome.is_empty() {
                    println!("(no action)");
                } else {
                    print_outcome(&outcome);
                }
            }
            Err(e) => eprintln!("error: {e}"),
        }

        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
    }

    Ok(())
}

fn print_outcome(outcome: &RunOutcome) {
    for action_outcome in &outcome.outcomes {
        match action_outcome {
            ActionOutcome::Saved {
                document_id,
                statement,
            } => {
                println!("saved [{document_id}]: {statement}");
            }
            ActionOutcome::WriteFailed { statement, reason } => {
                println!("save failed ({reason}): {statement}");
            }
            ActionOutcome::Asked { results } => {
                for result in results {
                    match result {
                        QueryOutcome::Answered { query, answer } => {
                            println!("{query}\n  {answer}");
                        }
                        QueryOutcome::QueryFailed { query, reason } => {
                            println!("{query}\n  (failed: {reason})");
                        }
                    }
                }
            }
        }
    }
}
