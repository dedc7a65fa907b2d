//! Terminal input.
//!
//! Maps `crossterm` key events into [`crate::types::Command`] and turns held
//! movement keys into repeated commands, including on terminals that never
//! report key release.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, is_restart, repeat_key, should_quit, RepeatKey};
