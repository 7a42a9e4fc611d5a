//! Flappy - a terminal Flappy Bird.
//!
//! The game core (`core`, `game`, `render`) knows nothing about terminals:
//! it is driven by millisecond timestamps and key-code strings and draws
//! through the [`render::RenderSurface`] trait. `ui` and `input` adapt it to
//! ratatui/crossterm.

pub mod build_info;
pub mod core;
pub mod game;
pub mod input;
pub mod render;
pub mod ui;
pub mod utils;

pub use crate::core::game_loop::{GameLoop, LoopReport, LoopTiming};
pub use crate::core::game_state::{GameOverReason, GamePhase, GameSession};
pub use crate::game::logic::{FrameEvents, JumpOutcome};
