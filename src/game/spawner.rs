//! Periodic pipe-pair generation.

use super::types::{Pipe, PipeVariant};
use crate::core::constants::{PIPE_BASE_Y, PIPE_GAP, PIPE_HEIGHT, PIPE_SPAWN_X};
use crate::core::game_state::GameSession;
use rand::Rng;

/// Random vertical offset for the top pipe of a new pair.
///
/// Always in `(PIPE_BASE_Y - 3/4 * PIPE_HEIGHT, PIPE_BASE_Y - 1/4 * PIPE_HEIGHT]`.
pub fn random_offset<R: Rng>(rng: &mut R) -> f64 {
    PIPE_BASE_Y - PIPE_HEIGHT / 4.0 - rng.gen::<f64>() * (PIPE_HEIGHT / 2.0)
}

/// Append a top/bottom pair at the right edge, top first.
///
/// The bottom pipe sits exactly `PIPE_HEIGHT + PIPE_GAP` below the top pipe,
/// which leaves a constant opening whatever the offset.
pub fn spawn_pipe_pair(session: &mut GameSession, offset: f64) {
    session
        .pipes
        .push_back(Pipe::new(PipeVariant::Top, PIPE_SPAWN_X, offset));
    session.pipes.push_back(Pipe::new(
        PipeVariant::Bottom,
        PIPE_SPAWN_X,
        offset + PIPE_HEIGHT + PIPE_GAP,
    ));
}

/// Spawn timer callback. Does nothing once the run is over.
///
/// Returns the offset used, or `None` if nothing was spawned.
pub fn spawn_pipes<R: Rng>(session: &mut GameSession, rng: &mut R) -> Option<f64> {
    if session.is_game_over() {
        return None;
    }
    let offset = random_offset(rng);
    spawn_pipe_pair(session, offset);
    Some(offset)
}
