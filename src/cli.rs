//! Command-line interface for couch_tictactoe.

use clap::{Parser, Subcommand};
use couch_core::Mark;

use crate::settings::Mode;

/// Couch Tic-Tac-Toe - play noughts and crosses in the terminal
#[derive(Parser, Debug)]
#[command(name = "couch_tictactoe")]
#[command(about = "Tic-tac-toe against a heuristic opponent or a friend", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true, default_value = "couch_tictactoe.toml")]
    pub config: std::path::PathBuf,

    /// Override the database path from the config
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively
    Play {
        /// Play mode (defaults to the last one used)
        #[arg(long)]
        mode: Option<Mode>,

        /// Your mark against the computer (defaults to the last one used)
        #[arg(long)]
        mark: Option<Mark>,

        /// Keep score in memory only
        #[arg(long)]
        ephemeral: bool,
    },

    /// Show the score
    Stats,

    /// Show recent games, newest first
    History {
        /// How many games to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Wipe score and history
    Clear,
}
