//! Bird and pipe entities.

use crate::core::constants::{
    BIRD_HEIGHT, BIRD_START_X, BIRD_START_Y, BIRD_WIDTH, PIPE_HEIGHT, PIPE_WIDTH,
};
use crate::core::geometry::Rect;

/// Which half of a pipe pair this is. Only the renderer cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeVariant {
    Top,
    Bottom,
}

/// The player-controlled bird. Vertical velocity lives in the session.
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    pub x: f64,
    /// Top edge in board coordinates. Never negative after a frame update.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bird {
    pub fn new() -> Self {
        Self {
            x: BIRD_START_X,
            y: BIRD_START_Y,
            width: BIRD_WIDTH,
            height: BIRD_HEIGHT,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Put the bird back at its starting height. The column never changes.
    pub fn reset(&mut self) {
        self.y = BIRD_START_Y;
    }
}

impl Default for Bird {
    fn default() -> Self {
        Self::new()
    }
}

/// One half of a pipe pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    pub variant: PipeVariant,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Set once the bird's leading edge has cleared this pipe (for scoring).
    pub passed: bool,
}

impl Pipe {
    pub fn new(variant: PipeVariant, x: f64, y: f64) -> Self {
        Self {
            variant,
            x,
            y,
            width: PIPE_WIDTH,
            height: PIPE_HEIGHT,
            passed: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// True once the pipe has drifted fully past the left boundary.
    pub fn is_off_screen(&self) -> bool {
        self.x < -PIPE_WIDTH
    }
}
