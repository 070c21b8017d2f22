//! Property-style checks for the heuristic opponent over reachable boards.

use couch_core::{
    Board, GameResult, HeuristicOpponent, Mark, MovePolicy, Position, Square, evaluate,
};

/// Plays `moves` alternately starting with X.
fn board_after(moves: &[usize]) -> Board {
    let mut board = Board::new();
    let mut mark = Mark::X;
    for index in moves {
        let pos = Position::from_index(*index).expect("index in range");
        board.set(pos, Square::Occupied(mark));
        mark = mark.opponent();
    }
    board
}

/// Walks every ongoing board reachable from the empty board.
fn visit(board: Board, to_move: Mark, out: &mut Vec<(Board, Mark)>) {
    if evaluate(&board).is_terminal() {
        return;
    }
    out.push((board, to_move));
    for pos in board.empty_positions() {
        let mut next = board;
        next.set(pos, Square::Occupied(to_move));
        visit(next, to_move.opponent(), out);
    }
}

#[test]
fn test_policy_returns_empty_square_on_every_ongoing_board() {
    let mut boards = Vec::new();
    visit(Board::new(), Mark::X, &mut boards);
    assert!(!boards.is_empty());

    let mut opponent = HeuristicOpponent::with_seed(7);
    for (board, to_move) in boards.iter().step_by(37) {
        let pos = opponent
            .choose(board, *to_move, to_move.opponent())
            .expect("ongoing board has a move");
        assert!(board.is_empty(pos), "picked occupied {pos:?} on {board:?}");
    }
}

#[test]
fn test_policy_takes_immediate_win_when_available() {
    // X: 0, 1   O: 4, 8   X to move wins at 2.
    let board = board_after(&[0, 4, 1, 8]);
    let mut opponent = HeuristicOpponent::with_seed(1);
    let pos = opponent.choose(&board, Mark::X, Mark::O).unwrap();
    assert_eq!(pos, Position::TopRight);

    let mut after = board;
    after.set(pos, Square::Occupied(Mark::X));
    assert!(matches!(evaluate(&after), GameResult::Won { mark: Mark::X, .. }));
}

#[test]
fn test_policy_blocks_when_no_win() {
    // X: 0, 3   O: 4   O to move must block 6.
    let board = board_after(&[0, 4, 3]);
    let mut opponent = HeuristicOpponent::with_seed(1);
    let pos = opponent.choose(&board, Mark::O, Mark::X).unwrap();
    assert_eq!(pos, Position::BottomLeft);
}
