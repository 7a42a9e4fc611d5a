//! Authoritative mutable state of one play session.

use crate::core::constants::{JUMP_COOLDOWN_MS, PIPE_VELOCITY_X};
use crate::game::types::{Bird, Pipe};
use std::collections::VecDeque;

/// Two-state session machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Running,
    GameOver,
}

/// Which terminal condition ended the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    /// Bird dropped below the bottom of the board.
    FellOffBoard,
    /// Bird overlapped a pipe.
    HitPipe,
}

/// Jump debounce: a flag plus a timestamp check.
///
/// The flag is cleared on every accepted jump and re-enabled by a one-shot
/// deadline. Nothing cancels the deadline, not even a restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpCooldown {
    pub can_jump: bool,
    pub cooldown_ms: u64,
    /// Timestamp of the last accepted jump. `None` until the first jump.
    pub last_jump_ms: Option<u64>,
    /// Pending re-enable of `can_jump`.
    pub reenable_at_ms: Option<u64>,
}

impl JumpCooldown {
    pub fn new(cooldown_ms: u64) -> Self {
        Self {
            can_jump: true,
            cooldown_ms,
            last_jump_ms: None,
            reenable_at_ms: None,
        }
    }

    /// Fire the pending re-enable if its deadline has arrived.
    /// Returns true if `can_jump` was re-enabled by this call.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.reenable_at_ms {
            Some(at) if now_ms >= at => {
                self.can_jump = true;
                self.reenable_at_ms = None;
                true
            }
            _ => false,
        }
    }

    /// Whether the full cooldown window has elapsed since the last jump.
    pub fn window_elapsed(&self, now_ms: u64) -> bool {
        match self.last_jump_ms {
            Some(last) => now_ms.saturating_sub(last) >= self.cooldown_ms,
            None => true,
        }
    }

    /// Try to accept a jump at `now_ms`. On success the flag is cleared and
    /// the re-enable is armed one cooldown from now.
    pub fn try_accept(&mut self, now_ms: u64) -> bool {
        self.poll(now_ms);
        if !self.can_jump || !self.window_elapsed(now_ms) {
            return false;
        }
        self.last_jump_ms = Some(now_ms);
        self.can_jump = false;
        self.reenable_at_ms = Some(now_ms + self.cooldown_ms);
        true
    }
}

impl Default for JumpCooldown {
    fn default() -> Self {
        Self::new(JUMP_COOLDOWN_MS)
    }
}

/// Everything the update loop, spawner and input controller share.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub phase: GamePhase,
    pub bird: Bird,
    /// Spawn order, which is also left-to-right order.
    pub pipes: VecDeque<Pipe>,
    /// Horizontal pipe velocity per frame (negative = leftward).
    pub velocity_x: f64,
    /// Vertical bird velocity per frame (positive = downward).
    pub velocity_y: f64,
    pub jump: JumpCooldown,
    /// Set alongside `GamePhase::GameOver`; keeps the first cause of the run ending.
    pub game_over_reason: Option<GameOverReason>,
    /// Score kept in half points: each pipe is worth one half.
    score_halves: u32,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Running,
            bird: Bird::new(),
            pipes: VecDeque::new(),
            velocity_x: PIPE_VELOCITY_X,
            velocity_y: 0.0,
            jump: JumpCooldown::default(),
            game_over_reason: None,
            score_halves: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Current score; a full pipe pair is worth 1.
    pub fn score(&self) -> f64 {
        f64::from(self.score_halves) / 2.0
    }

    pub fn score_halves(&self) -> u32 {
        self.score_halves
    }

    /// Add half a point.
    ///
    /// Only the frame update calls this, and it never runs in `GameOver`. A pipe
    /// passed in the same frame that ended the run still counts.
    pub fn award_half_point(&mut self) {
        self.score_halves += 1;
    }

    /// Transition to `GameOver`. Later calls in the same run keep the first reason.
    pub fn end_run(&mut self, reason: GameOverReason) {
        if self.game_over_reason.is_none() {
            self.game_over_reason = Some(reason);
        }
        self.phase = GamePhase::GameOver;
    }

    /// Restart transition: bird back to its start, no pipes, zero score, running.
    ///
    /// Velocity and the jump cooldown are left alone; the caller applies the
    /// jump impulse that triggered the restart.
    pub fn reset(&mut self) {
        self.bird.reset();
        self.pipes.clear();
        self.score_halves = 0;
        self.game_over_reason = None;
        self.phase = GamePhase::Running;
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
