//! Per-frame physics and the jump/restart controller.

use crate::core::constants::{BOARD_HEIGHT, GRAVITY, JUMP_KEY_CODES, JUMP_VELOCITY};
use crate::core::game_state::{GameOverReason, GameSession};
use crate::core::geometry::intersects;

/// What happened during one frame update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameEvents {
    /// Pipes whose `passed` flag flipped this frame (half a point each).
    pub pipes_passed: u32,
    /// Bird dropped below the board.
    pub fell: bool,
    /// Bird overlapped at least one pipe.
    pub collided: bool,
    /// Pipes dropped from the front after leaving the board.
    pub pipes_removed: usize,
    /// This frame moved the session into `GameOver`.
    pub ended_run: bool,
}

/// Result of a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOutcome {
    /// Jump accepted while running.
    Jumped,
    /// Jump accepted in `GameOver`; the session was reset first.
    Restarted,
    /// Jump key pressed but the debounce rejected it.
    CoolingDown,
    /// Not a jump key.
    Ignored,
}

/// Advance the session by one frame.
///
/// Returns `None` without touching anything when the run is over. Gravity and
/// velocity are per frame, so the frame rate is the physics rate.
pub fn update_frame(session: &mut GameSession) -> Option<FrameEvents> {
    if session.is_game_over() {
        return None;
    }

    let mut events = FrameEvents::default();

    // Bird
    session.velocity_y += GRAVITY;
    session.bird.y = (session.bird.y + session.velocity_y).max(0.0);

    if session.bird.y > BOARD_HEIGHT {
        events.fell = true;
        session.end_run(GameOverReason::FellOffBoard);
    }

    // Pipes. Every pipe is processed even after the run ends mid-loop.
    let bird_rect = session.bird.rect();
    let velocity_x = session.velocity_x;
    let mut passed = 0;
    let mut collided = false;
    for pipe in session.pipes.iter_mut() {
        pipe.x += velocity_x;

        if !pipe.passed && bird_rect.x > pipe.x + pipe.width {
            pipe.passed = true;
            passed += 1;
        }

        if intersects(&bird_rect, &pipe.rect()) {
            collided = true;
        }
    }
    for _ in 0..passed {
        session.award_half_point();
    }
    if collided {
        session.end_run(GameOverReason::HitPipe);
    }
    events.pipes_passed = passed;
    events.collided = collided;

    // Oldest pipe is always leftmost
    while session.pipes.front().is_some_and(|p| p.is_off_screen()) {
        session.pipes.pop_front();
        events.pipes_removed += 1;
    }

    events.ended_run = session.is_game_over();
    Some(events)
}

/// Whether `code` is one of the jump keys.
pub fn is_jump_key(code: &str) -> bool {
    JUMP_KEY_CODES.contains(&code)
}

/// Handle a key press carrying a key code such as `"Space"`.
///
/// An accepted jump sets the upward impulse and, if the run is over, resets
/// the session in the same step so the first frame after a restart already
/// moves upward.
pub fn process_key(session: &mut GameSession, code: &str, now_ms: u64) -> JumpOutcome {
    if !is_jump_key(code) {
        return JumpOutcome::Ignored;
    }
    if !session.jump.try_accept(now_ms) {
        return JumpOutcome::CoolingDown;
    }

    session.velocity_y = JUMP_VELOCITY;

    if session.is_game_over() {
        session.reset();
        JumpOutcome::Restarted
    } else {
        JumpOutcome::Jumped
    }
}
