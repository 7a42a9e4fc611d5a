//! Terminal host rendering.

pub mod canvas;
pub mod layout;
pub mod scene;

pub use canvas::TerminalCanvas;
pub use scene::{draw_game, HudStats};
