//! Terminal rendering.
//!
//! A small game-oriented rendering layer: the view draws a snapshot into a
//! framebuffer, and the renderer flushes only what changed since the last frame.
//! Board cells are two terminal columns wide to keep them roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
