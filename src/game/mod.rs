//! Flappy game rules.
//!
//! A bird falls under gravity and flaps upward on a key press while pairs of
//! pipes scroll in from the right. Passing a pair scores a point; touching a
//! pipe or dropping off the bottom of the board ends the run, and the next
//! flap starts a fresh one.

pub mod logic;
pub mod spawner;
pub mod types;

pub use logic::*;
pub use spawner::*;
pub use types::*;
