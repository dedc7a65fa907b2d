//! Game session integration tests

use blockfall::core::{GameSession, Grid, SessionConfig};
use blockfall::types::{Command, Phase, PieceKind, ScoringRules, SpawnCheck};

fn config(fall_interval_ms: u32) -> SessionConfig {
    SessionConfig {
        fall_interval_ms,
        level_speedup: false,
        ..SessionConfig::default()
    }
}

/// A seed whose first piece is an I
fn first_i_seed() -> u32 {
    (1..500)
        .find(|&s| GameSession::new(s).active_piece().kind == PieceKind::I)
        .unwrap()
}

#[test]
fn test_game_lifecycle() {
    let mut game = GameSession::new(12345);
    assert_eq!(game.phase(), Phase::Running);
    assert_eq!(game.session_state().score, 0);

    game.handle_command(Command::TogglePause);
    assert_eq!(game.phase(), Phase::Paused);
    game.handle_command(Command::TogglePause);
    assert_eq!(game.phase(), Phase::Running);

    game.handle_command(Command::EndGame);
    assert!(game.is_game_over());
}

#[test]
fn test_same_seed_same_game() {
    let mut a = GameSession::new(777);
    let mut b = GameSession::new(777);

    for i in 0..40 {
        let cmd = [Command::MoveLeft, Command::RotateCw, Command::HardDrop][i % 3];
        a.handle_command(cmd);
        b.handle_command(cmd);
        a.tick(16);
        b.tick(16);
    }

    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_piece_falls_until_it_locks() {
    let mut game = GameSession::with_config(config(10), 5);
    let first = game.active_piece().kind;

    let mut steps = 0;
    while game.pieces_spawned() == 1 {
        assert!(game.tick(10));
        steps += 1;
        assert!(steps < 40, "piece never locked");
    }

    let event = game.take_last_event().unwrap();
    assert_eq!(event.kind, first);
    assert_eq!(game.grid().occupied_count(), 4);
}

#[test]
fn test_moves_stop_at_walls() {
    let mut game = GameSession::new(42);

    for _ in 0..12 {
        game.handle_command(Command::MoveLeft);
    }
    let cells = game.active_piece().cells();
    let min_col = cells.iter().map(|&(_, c)| c).min().unwrap();
    assert_eq!(min_col, 0);
    assert!(!game.handle_command(Command::MoveLeft));

    for _ in 0..12 {
        game.handle_command(Command::MoveRight);
    }
    let cells = game.active_piece().cells();
    let max_col = cells.iter().map(|&(_, c)| c).max().unwrap();
    assert_eq!(max_col, 9);
}

#[test]
fn test_soft_drop_moves_one_row() {
    let mut game = GameSession::new(42);
    let row = game.active_piece().row;

    assert!(game.handle_command(Command::SoftDrop));
    assert_eq!(game.active_piece().row, row + 1);
}

#[test]
fn test_blocked_soft_drop_is_ignored() {
    let mut game = GameSession::new(42);
    while game.handle_command(Command::SoftDrop) {}

    let resting = game.active_piece();
    assert!(!game.handle_command(Command::SoftDrop));
    assert_eq!(game.active_piece(), resting);
    assert_eq!(game.pieces_spawned(), 1);
}

#[test]
fn test_hard_drop_locks_in_one_call() {
    let mut game = GameSession::new(2024);
    let kind = game.active_piece().kind;

    assert!(game.handle_command(Command::HardDrop));

    assert_eq!(game.pieces_spawned(), 2);
    assert_eq!(game.grid().occupied_count(), 4);
    let event = game.take_last_event().unwrap();
    assert_eq!(event.kind, kind);
    assert_eq!(event.cleared_rows, 0);
}

#[test]
fn test_hard_drop_clears_a_row_and_scores() {
    // Bottom row missing columns 3..7; a flat I fills it exactly.
    let grid = Grid::from_ascii(&["OOO....OOO"]);

    let mut game = GameSession::from_grid(SessionConfig::default(), grid, first_i_seed());
    game.handle_command(Command::HardDrop);

    let event = game.take_last_event().unwrap();
    assert_eq!(event.cleared_rows, 1);
    assert_eq!(event.points, 1);
    let state = game.session_state();
    assert_eq!((state.score, state.lines, state.level), (1, 1, 1));
    assert_eq!(game.grid().occupied_count(), 0);
}

#[test]
fn test_legacy_scoring_table() {
    let grid = Grid::from_ascii(&["OOO....OOO"]);
    let legacy = SessionConfig {
        scoring: ScoringRules::Legacy,
        ..SessionConfig::default()
    };
    let mut game = GameSession::from_grid(legacy, grid, first_i_seed());
    game.handle_command(Command::HardDrop);

    assert_eq!(game.session_state().score, 100);
}

#[test]
fn test_game_over_freezes_everything() {
    // Stack everything up to row 0 so the next lock happens in the buffer.
    let mut rows = vec!["OOOO.OOOOO"; 20];
    rows[0] = "O.O.O.O.O.";
    let grid = Grid::from_ascii(&rows);
    let mut game = GameSession::from_grid(SessionConfig::default(), grid, 3);

    let mut guard = 0;
    while !game.is_game_over() {
        game.advance();
        guard += 1;
        assert!(guard < 10, "game never ended");
    }

    let frozen = game.snapshot();
    assert!(!game.tick(10_000));
    assert!(!game.advance());
    for cmd in [
        Command::MoveLeft,
        Command::MoveRight,
        Command::RotateCw,
        Command::SoftDrop,
        Command::HardDrop,
        Command::TogglePause,
        Command::EndGame,
    ] {
        assert!(!game.handle_command(cmd));
    }
    assert_eq!(game.snapshot(), frozen);
}

/// Only column 6 of the top visible row is filled. A flat I spawns over
/// columns 3 to 6 of that row.
fn grid_blocking_i_spawn() -> Grid {
    let mut grid = Grid::new();
    grid.set(0, 6, Some(PieceKind::O));
    grid
}

#[test]
fn test_immediate_spawn_check_ends_at_spawn() {
    let immediate = SessionConfig {
        spawn_check: SpawnCheck::Immediate,
        ..SessionConfig::default()
    };
    let game = GameSession::from_grid(immediate, grid_blocking_i_spawn(), first_i_seed());

    assert_eq!(game.active_piece().kind, PieceKind::I);
    assert!(game.is_game_over());
}

#[test]
fn test_deferred_spawn_allows_sliding_out_of_overlap() {
    let grid = grid_blocking_i_spawn();
    let mut game = GameSession::from_grid(SessionConfig::default(), grid, first_i_seed());

    assert_eq!(game.active_piece().kind, PieceKind::I);
    assert!(!game.active_piece().fits(game.grid()));
    assert!(!game.is_game_over());

    assert!(game.handle_command(Command::MoveLeft));
    let piece = game.active_piece();
    assert!(piece.fits(game.grid()));
    assert_eq!((piece.row, piece.col), (-1, 2));
    assert!(!game.is_game_over());
}

#[test]
fn test_deferred_spawn_without_escape_ends_on_next_fall() {
    let grid = grid_blocking_i_spawn();
    let config = SessionConfig::default();
    let mut game = GameSession::from_grid(config, grid.clone(), first_i_seed());
    assert!(!game.is_game_over());

    assert!(game.advance());

    assert!(game.is_game_over());
    assert_eq!(game.grid(), &grid);
    assert_eq!(game.grid().occupied_count(), 1);
    assert_eq!(game.pieces_spawned(), 1);
}

#[test]
fn test_pause_rearms_fall_timer() {
    let mut game = GameSession::with_config(config(200), 1);
    let row = game.active_piece().row;

    game.tick(150);
    game.handle_command(Command::TogglePause);
    game.handle_command(Command::TogglePause);

    assert!(!game.tick(150));
    assert_eq!(game.active_piece().row, row);
    assert!(game.tick(50));
    assert_eq!(game.active_piece().row, row + 1);
}

#[test]
fn test_fall_interval_follows_config() {
    let game = GameSession::new(1);
    assert_eq!(game.fall_interval_ms(), 500);

    let flat = GameSession::with_config(config(300), 1);
    assert_eq!(flat.fall_interval_ms(), 300);
}

#[test]
fn test_upcoming_kind_becomes_active() {
    let mut game = GameSession::new(31);
    for _ in 0..15 {
        let upcoming = game.upcoming_piece_kind();
        game.handle_command(Command::HardDrop);
        if game.is_game_over() {
            break;
        }
        assert_eq!(game.active_piece().kind, upcoming);
    }
}

#[test]
fn test_restart_after_game_over() {
    let mut game = GameSession::new(64);
    game.handle_command(Command::HardDrop);
    game.handle_command(Command::EndGame);

    game.restart();

    assert_eq!(game.phase(), Phase::Running);
    assert_eq!(game.grid().occupied_count(), 0);
    assert_eq!(game.session_state().score, 0);
}
