//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every rule of the game and nothing else. It never draws,
//! reads input or sleeps, so any shell (terminal, GUI, headless test) can drive it.
//!
//! - **Deterministic**: the piece sequence comes from a seeded generator
//! - **Time-agnostic**: the host passes elapsed milliseconds into [`GameSession::tick`]
//! - **Allocation-free hot paths**: grid, shapes and the bag live on the stack
//!
//! # Module Structure
//!
//! - [`grid`]: 10x20 playfield plus two hidden spawn rows, with row compaction
//! - [`pieces`]: shape matrices, clockwise rotation, spawn rule, colors
//! - [`collision`]: the single legality gate for every placement
//! - [`lock`]: commits a piece and clears complete rows
//! - [`rng`]: seeded generator and the 7-piece bag sequencer
//! - [`scoring`]: score, lines, level and gravity progression
//! - [`session`]: the Running / Paused / GameOver state machine
//! - [`snapshot`]: plain-data copies for renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameSession;
//! use blockfall_types::{Command, Phase};
//!
//! let mut game = GameSession::new(12345);
//!
//! game.handle_command(Command::MoveRight);
//! game.handle_command(Command::RotateCw);
//! game.handle_command(Command::HardDrop);
//!
//! assert_eq!(game.session_state().phase, Phase::Running);
//! assert!(game.grid().occupied_count() == 4);
//! ```

pub mod collision;
pub mod grid;
pub mod lock;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use collision::is_legal;
pub use grid::Grid;
pub use lock::{lock, LockOutcome};
pub use pieces::{color_of, rotate, shape_of, spawn_position, ActivePiece, Shape};
pub use rng::{Sequencer, SimpleRng};
pub use scoring::{fall_interval_ms, line_points, Progression, ScoreDelta};
pub use session::{GameSession, LockEvent, SessionConfig, SessionState};
pub use snapshot::GameSnapshot;
