//! Plain-text rendering for the terminal.

use couch_core::{Board, GameResult, Mark, Position, Square};

use crate::records::{HistoryEntry, Score};
use crate::settings::Mode;

/// Renders the board, numbering empty cells 1-9 and bracketing the
/// winning line.
pub fn board(board: &Board, result: GameResult) -> String {
    let line = result.winning_line();
    let rows: Vec<String> = Position::ALL
        .chunks(3)
        .map(|row| {
            row.iter()
                .map(|&pos| {
                    let symbol = match board.get(pos) {
                        Square::Empty => (pos.to_index() + 1).to_string(),
                        Square::Occupied(mark) => mark.to_string(),
                    };
                    if line.is_some_and(|l| l.contains(pos)) {
                        format!("[{}]", symbol)
                    } else {
                        format!(" {} ", symbol)
                    }
                })
                .collect::<Vec<_>>()
                .join("|")
        })
        .collect();
    rows.join("\n---+---+---\n")
}

/// One-line score summary.
pub fn score(score: &Score) -> String {
    format!(
        "X: {}  O: {}  Draws: {}",
        score.x(),
        score.o(),
        score.draws()
    )
}

/// Header line naming the mode, e.g. `"vs computer (you are X)"`.
pub fn mode_line(mode: Mode, human_mark: Mark) -> String {
    match mode {
        Mode::VsOpponent => format!("{} (you are {})", mode.label(), human_mark),
        Mode::VsHuman => mode.label().to_string(),
    }
}

/// History lines, newest first, at most `limit`.
pub fn history<'a>(entries: impl Iterator<Item = &'a HistoryEntry>, limit: usize) -> String {
    let lines: Vec<String> = entries
        .take(limit)
        .map(|entry| {
            format!(
                "{}  {}",
                entry.timestamp().format("%Y-%m-%d %H:%M"),
                entry.summary()
            )
        })
        .collect();
    if lines.is_empty() {
        "No games played yet".to_string()
    } else {
        lines.join("\n")
    }
}
