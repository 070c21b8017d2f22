//! Couch Tic-Tac-Toe - CLI
//!
//! Interactive play plus score and history inspection.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use couch_core::{HeuristicOpponent, Mark};
use couch_tictactoe::cli::{Cli, Command};
use couch_tictactoe::{
    AppConfig, GameController, MemoryStorage, Mode, RecordStore, Settings, SqliteStorage, Storage,
    play, render,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Loading config from {}", cli.config.display()))?;
    if let Some(db_path) = cli.db_path {
        config = config.with_db_path(db_path);
    }

    initialize_tracing(&config);
    info!(?config, "Starting couch_tictactoe");

    match cli.command {
        Command::Play {
            mode,
            mark,
            ephemeral,
        } => {
            if ephemeral {
                run_play(MemoryStorage::new(), mode, mark, &config).await
            } else {
                run_play(open_storage(&config)?, mode, mark, &config).await
            }
        }
        Command::Stats => {
            let records = RecordStore::load(open_storage(&config)?);
            let score = records.score();
            println!("{}", render::score(&score));
            println!("Games played: {}", score.total());
            Ok(())
        }
        Command::History { limit } => {
            let records = RecordStore::load(open_storage(&config)?);
            println!("{}", render::history(records.history(), limit));
            Ok(())
        }
        Command::Clear => {
            let mut records = RecordStore::load(open_storage(&config)?);
            records.clear();
            println!("Score and history cleared");
            Ok(())
        }
    }
}

/// Play interactively on `storage`, applying any mode/mark overrides.
#[instrument(skip(storage, config))]
async fn run_play<S: Storage>(
    storage: S,
    mode: Option<Mode>,
    mark: Option<Mark>,
    config: &AppConfig,
) -> Result<()> {
    let mut settings = Settings::load(&storage);
    if let Some(mode) = mode {
        settings.mode = mode;
    }
    if let Some(mark) = mark {
        settings.human_mark = mark;
    }

    let controller = GameController::with_settings(storage, HeuristicOpponent::new(), settings);
    play::run(controller, config.opponent_delay()).await
}

fn open_storage(config: &AppConfig) -> Result<SqliteStorage> {
    SqliteStorage::open(config.db_path())
        .with_context(|| format!("Opening database at {}", config.db_path()))
}

fn initialize_tracing(config: &AppConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();
}
