//! Tests for the game controller driving full games.

use couch_core::{Board, GameResult, HeuristicOpponent, Mark, Position, Square};
use couch_tictactoe::{GameController, MemoryStorage, Mode, SETTINGS_KEY, Settings, Storage};

fn controller(
    storage: MemoryStorage,
    settings: Settings,
) -> GameController<MemoryStorage, HeuristicOpponent> {
    GameController::with_settings(storage, HeuristicOpponent::with_seed(42), settings)
}

fn board_of(cells: [Option<Mark>; 9]) -> Board {
    Board::from_squares(cells.map(|cell| cell.map_or(Square::Empty, Square::Occupied)))
}

#[test]
fn test_opponent_takes_center_then_blocks() {
    let mut game = controller(MemoryStorage::new(), Settings::default());

    assert!(game.apply_move(0));
    assert!(game.run_pending_opponent_move());
    assert_eq!(game.session().board().get(Position::Center), Square::Occupied(Mark::O));

    assert!(game.apply_move(1));
    assert!(game.run_pending_opponent_move());

    let (x, o) = (Some(Mark::X), Some(Mark::O));
    assert_eq!(
        *game.session().board(),
        board_of([x, x, o, None, o, None, None, None, None])
    );
    assert_eq!(game.status_text(), "X to move");
}

#[test]
fn test_finished_game_is_recorded_once() {
    let storage = MemoryStorage::new();
    let mut game = controller(storage.clone(), Settings::new(Mode::VsHuman, Mark::X));

    // X: 0 1 2, O: 3 4
    for index in [0, 3, 1, 4, 2] {
        assert!(game.apply_move(index));
    }
    assert_eq!(game.session().result().winner(), Some(Mark::X));
    assert_eq!(game.score().x(), &1);
    assert_eq!(game.history().len(), 1);

    // Further input on the finished board changes nothing.
    assert!(!game.apply_move(5));
    assert!(!game.run_pending_opponent_move());
    assert_eq!(game.score().total(), 1);
    assert_eq!(game.history().len(), 1);

    let entry = game.history().next().unwrap();
    assert_eq!(*entry.winner(), Some(Mark::X));
    assert_eq!(*entry.mode(), Mode::VsHuman);
}

#[test]
fn test_opponent_game_ends_in_record() {
    let mut game = controller(MemoryStorage::new(), Settings::default());

    // Play the lowest free cell until the game ends.
    while !game.session().result().is_terminal() {
        let free = game.session().board().empty_positions()[0];
        assert!(game.apply_move(free.to_index()));
        game.run_pending_opponent_move();
    }

    assert_eq!(game.score().total(), 1);
    let entry = game.history().next().unwrap();
    assert_eq!(*entry.winner(), game.session().result().winner());
    assert_eq!(entry.board(), game.session().board());
}

#[test]
fn test_new_game_before_opponent_reply_voids_it() {
    let mut game = controller(MemoryStorage::new(), Settings::default());
    game.apply_move(4);
    let stale = game.pending_opponent_move().expect("opponent due");

    game.new_game();
    assert_eq!(game.pending_opponent_move(), None);
    assert!(!game.play_opponent_move(stale));
    assert_eq!(*game.session().board(), Board::new());
    assert_eq!(game.session().result(), GameResult::Ongoing);
}

#[test]
fn test_switching_to_two_players_cancels_reply() {
    let mut game = controller(MemoryStorage::new(), Settings::default());
    game.apply_move(4);
    let stale = game.pending_opponent_move().unwrap();

    game.set_mode(Mode::VsHuman);
    assert!(!game.play_opponent_move(stale));
    assert_eq!(game.pending_opponent_move(), None);
    assert_eq!(game.session().board().occupied_count(), 0);
}

#[test]
fn test_computer_opens_when_human_holds_o() {
    let mut game = controller(MemoryStorage::new(), Settings::new(Mode::VsOpponent, Mark::O));
    assert_eq!(game.session().turn(), Mark::X);
    assert!(!game.apply_move(0), "human must wait for X to open");

    assert!(game.run_pending_opponent_move());
    // An empty board has no win or block, so X opens in the center.
    assert_eq!(game.session().board().get(Position::Center), Square::Occupied(Mark::X));
    assert!(game.apply_move(0));
}

#[test]
fn test_settings_persist_and_reload() {
    let storage = MemoryStorage::new();
    {
        let mut game = controller(storage.clone(), Settings::default());
        game.set_mode(Mode::VsHuman);
        game.set_human_mark(Mark::O);
    }
    assert!(storage.get(SETTINGS_KEY).unwrap().is_some());

    let game = GameController::new(storage, HeuristicOpponent::with_seed(1));
    assert_eq!(game.session().mode(), Mode::VsHuman);
    assert_eq!(game.session().human_mark(), Mark::O);
}

#[test]
fn test_clear_records_keeps_current_board() {
    let mut game = controller(MemoryStorage::new(), Settings::new(Mode::VsHuman, Mark::X));
    for index in [0, 3, 1, 4, 2] {
        game.apply_move(index);
    }
    game.new_game();
    game.apply_move(8);

    game.clear_records();
    assert_eq!(game.score().total(), 0);
    assert_eq!(game.history().len(), 0);
    assert_eq!(game.session().board().occupied_count(), 1);
}
