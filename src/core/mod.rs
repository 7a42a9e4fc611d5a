//! Core state, geometry and the loop driver.

pub mod constants;
pub mod game_loop;
pub mod game_state;
pub mod geometry;

pub use constants::*;
pub use game_loop::*;
pub use game_state::*;
pub use geometry::*;
