//! Game-loop driver shared by the terminal host and the simulator.
//!
//! Owns the session and runs three logical tasks from a millisecond clock
//! supplied by the host:
//! - frame tick: physics update followed by a redraw (skipped when the run is over)
//! - spawn tick: a pipe pair every [`PIPE_SPAWN_INTERVAL_MS`]
//! - cooldown expiry: re-enables jumping one cooldown after an accepted jump
//!
//! Key presses come in through [`GameLoop::handle_key`]. Everything takes
//! `&mut self`, so a spawn can never land in the middle of a frame update.

use crate::core::constants::{DEFAULT_FRAME_INTERVAL_MS, PIPE_SPAWN_INTERVAL_MS};
use crate::core::game_state::GameSession;
use crate::game::logic::{process_key, update_frame, FrameEvents, JumpOutcome};
use crate::game::spawner::spawn_pipes;
use crate::render::{render_frame, BirdAnimation, RenderSurface};
use rand::Rng;

/// A repeating timer that fires at most once per poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalTimer {
    pub period_ms: u64,
    pub next_due_ms: u64,
}

impl IntervalTimer {
    /// First firing one period after `start_ms`.
    pub fn new(period_ms: u64, start_ms: u64) -> Self {
        let period_ms = period_ms.max(1);
        Self {
            period_ms,
            next_due_ms: start_ms + period_ms,
        }
    }

    /// Returns true if the timer is due, and re-arms it. Missed periods are
    /// dropped rather than replayed.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if now_ms < self.next_due_ms {
            return false;
        }
        self.next_due_ms += self.period_ms;
        if self.next_due_ms <= now_ms {
            self.next_due_ms = now_ms + self.period_ms;
        }
        true
    }
}

/// Timing knobs for the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopTiming {
    pub frame_interval_ms: u64,
    pub spawn_interval_ms: u64,
}

impl Default for LoopTiming {
    fn default() -> Self {
        Self {
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            spawn_interval_ms: PIPE_SPAWN_INTERVAL_MS,
        }
    }
}

/// Everything that happened during one [`GameLoop::advance`] call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoopReport {
    /// The cooldown-expiry task re-enabled jumping.
    pub jump_reenabled: bool,
    /// Offset of the pipe pair spawned this call, if any.
    pub spawned_offset: Option<f64>,
    /// The spawn timer fired (even if the spawn was a no-op in `GameOver`).
    pub spawn_fired: bool,
    /// The frame timer fired.
    pub frame_fired: bool,
    /// Result of the frame update; `None` if it did not fire or was skipped.
    pub frame: Option<FrameEvents>,
}

/// Drives a [`GameSession`] from host time.
pub struct GameLoop<R: Rng> {
    session: GameSession,
    rng: R,
    animation: BirdAnimation,
    frame_timer: IntervalTimer,
    spawn_timer: IntervalTimer,
    frames: u64,
    restarts: u32,
}

impl<R: Rng> GameLoop<R> {
    pub fn new(rng: R, timing: LoopTiming, start_ms: u64) -> Self {
        Self {
            session: GameSession::new(),
            rng,
            animation: BirdAnimation::new(),
            frame_timer: IntervalTimer::new(timing.frame_interval_ms, start_ms),
            spawn_timer: IntervalTimer::new(timing.spawn_interval_ms, start_ms),
            frames: 0,
            restarts: 0,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    /// Frame updates that actually ran (skipped game-over frames excluded).
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    /// Earliest time at which `advance` has work to do.
    pub fn next_deadline(&self) -> u64 {
        let mut deadline = self
            .frame_timer
            .next_due_ms
            .min(self.spawn_timer.next_due_ms);
        if let Some(at) = self.session.jump.reenable_at_ms {
            deadline = deadline.min(at);
        }
        deadline
    }

    /// Run every task that is due at `now_ms`: cooldown expiry, then spawn,
    /// then frame. The frame task redraws `surface` when it updates.
    pub fn advance<S: RenderSurface + ?Sized>(
        &mut self,
        now_ms: u64,
        surface: &mut S,
    ) -> LoopReport {
        let mut report = LoopReport {
            jump_reenabled: self.session.jump.poll(now_ms),
            ..LoopReport::default()
        };

        if self.spawn_timer.poll(now_ms) {
            report.spawn_fired = true;
            report.spawned_offset = spawn_pipes(&mut self.session, &mut self.rng);
            if let Some(offset) = report.spawned_offset {
                log::debug!("spawned pipe pair at offset {:.1}", offset);
            }
        }

        if self.frame_timer.poll(now_ms) {
            report.frame_fired = true;
            report.frame = self.run_frame(now_ms, surface);
        }

        report
    }

    /// Frame task body: update, then redraw. No-op in `GameOver`.
    fn run_frame<S: RenderSurface + ?Sized>(
        &mut self,
        now_ms: u64,
        surface: &mut S,
    ) -> Option<FrameEvents> {
        let events = update_frame(&mut self.session)?;
        self.frames += 1;

        if events.ended_run {
            log::info!(
                "game over ({:?}) with score {} after {} frames",
                self.session.game_over_reason,
                self.session.score(),
                self.frames
            );
        }

        self.animation.advance(now_ms);
        render_frame(&self.session, self.animation.frame(), surface);
        Some(events)
    }

    /// Feed a key press into the jump/restart controller.
    pub fn handle_key(&mut self, code: &str, now_ms: u64) -> JumpOutcome {
        let outcome = process_key(&mut self.session, code, now_ms);
        match outcome {
            JumpOutcome::Restarted => {
                self.restarts += 1;
                log::info!("restarted (run {})", self.restarts + 1);
            }
            JumpOutcome::CoolingDown => {
                log::trace!("jump rejected by cooldown at {}ms", now_ms)
            }
            JumpOutcome::Jumped | JumpOutcome::Ignored => {}
        }
        outcome
    }
}
