//! Interactive terminal game loop.
//!
//! Reads commands from stdin and drives a [`GameController`]. When the
//! computer owes a move, the loop waits the configured delay while still
//! listening for input; a command that arrives first is handled first and
//! may void the pending move.

use std::time::Duration;

use anyhow::Result;
use couch_core::{Mark, MovePolicy};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, instrument};

use crate::controller::GameController;
use crate::render;
use crate::settings::Mode;
use crate::storage::Storage;

const HELP: &str = "\
Commands:
  1-9             place your mark on that cell
  new             start a new game
  mode [MODE]     switch mode (vs-opponent, vs-human), toggles if omitted
  mark <x|o>      choose your mark against the computer
  score           show the score
  history         show recent games
  clear           wipe score and history
  help            show this help
  quit            leave";

/// One parsed line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Place a mark at a 0-based cell index.
    Cell(usize),
    /// Start over.
    NewGame,
    /// Switch mode; `None` toggles.
    Mode(Option<Mode>),
    /// Choose the local player's mark.
    Mark(Mark),
    /// Show the score.
    Score,
    /// Show the history.
    History,
    /// Wipe records.
    Clear,
    /// Show help.
    Help,
    /// Leave.
    Quit,
    /// Blank line.
    Nothing,
}

/// Parses one line of input. Cells are numbered 1-9 on screen.
pub fn parse_input(line: &str) -> Result<Input, String> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(Input::Nothing);
    };
    let argument = words.next();

    if let Ok(cell) = command.parse::<usize>() {
        return match cell {
            1..=9 => Ok(Input::Cell(cell - 1)),
            _ => Err(format!("Cells are numbered 1 to 9, not {}", cell)),
        };
    }

    match command.to_ascii_lowercase().as_str() {
        "new" | "n" => Ok(Input::NewGame),
        "mode" => match argument {
            Some(arg) => arg
                .parse::<Mode>()
                .map(|m| Input::Mode(Some(m)))
                .map_err(|_| format!("Unknown mode '{}'", arg)),
            None => Ok(Input::Mode(None)),
        },
        "mark" => match argument {
            Some(arg) => arg
                .parse::<Mark>()
                .map(Input::Mark)
                .map_err(|_| format!("Unknown mark '{}'", arg)),
            None => Err("Usage: mark <x|o>".to_string()),
        },
        "score" | "stats" => Ok(Input::Score),
        "history" => Ok(Input::History),
        "clear" => Ok(Input::Clear),
        "help" | "?" => Ok(Input::Help),
        "quit" | "q" | "exit" => Ok(Input::Quit),
        other => Err(format!("Unknown command '{}', type 'help'", other)),
    }
}

/// Runs the game loop until `quit` or end of input.
#[instrument(skip(controller))]
pub async fn run<S: Storage, P: MovePolicy>(
    mut controller: GameController<S, P>,
    opponent_delay: Duration,
) -> Result<()> {
    info!("Starting interactive game");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", HELP);
    print_game(&controller);

    loop {
        let line = match controller.pending_opponent_move() {
            Some(ticket) => {
                tokio::select! {
                    line = lines.next_line() => line?,
                    () = tokio::time::sleep(opponent_delay) => {
                        if controller.play_opponent_move(ticket) {
                            print_game(&controller);
                        }
                        continue;
                    }
                }
            }
            None => lines.next_line().await?,
        };

        let Some(line) = line else {
            debug!("Input closed");
            break;
        };

        match parse_input(&line) {
            Ok(Input::Quit) => break,
            Ok(input) => handle(&mut controller, input),
            Err(message) => println!("{}", message),
        }
    }

    info!("Leaving interactive game");
    Ok(())
}

fn handle<S: Storage, P: MovePolicy>(controller: &mut GameController<S, P>, input: Input) {
    match input {
        Input::Cell(index) => {
            if controller.apply_move(index) {
                print_game(controller);
            } else {
                println!("{}", controller.status_text());
            }
        }
        Input::NewGame => {
            controller.new_game();
            print_game(controller);
        }
        Input::Mode(mode) => {
            let mode = mode.unwrap_or_else(|| controller.session().mode().toggle());
            controller.set_mode(mode);
            print_game(controller);
        }
        Input::Mark(mark) => {
            controller.set_human_mark(mark);
            print_game(controller);
        }
        Input::Score => println!("{}", render::score(&controller.score())),
        Input::History => println!("{}", render::history(controller.history(), usize::MAX)),
        Input::Clear => {
            controller.clear_records();
            println!("Score and history cleared");
        }
        Input::Help => println!("{}", HELP),
        Input::Quit | Input::Nothing => {}
    }
}

fn print_game<S: Storage, P: MovePolicy>(controller: &GameController<S, P>) {
    let session = controller.session();
    println!();
    println!("{}", render::mode_line(session.mode(), session.human_mark()));
    println!("{}", render::board(session.board(), session.result()));
    println!("{}", controller.status_text());
    if session.result().is_terminal() {
        println!("{}", render::score(&controller.score()));
        println!("Type 'new' to play again");
    }
}
