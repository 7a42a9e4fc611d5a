//! Drawing seam between the game and whatever displays it.
//!
//! The game only issues canvas-style calls against [`RenderSurface`]; hosts
//! decide what a sprite or a font looks like.

use crate::core::constants::{BIRD_FRAME_COUNT, BIRD_FRAME_INTERVAL_MS, BOARD_HEIGHT, BOARD_WIDTH};
use crate::core::game_state::GameSession;
use crate::game::types::PipeVariant;

pub const SCORE_FONT: &str = "35px sans-serif";
pub const SCORE_POS: (f64, f64) = (5.0, 45.0);
pub const GAME_OVER_LINES: [(&str, FillStyle, f64, f64); 3] = [
    ("GAME OVER", FillStyle::Red, 75.0, 90.0),
    ("CLICK SPACEBAR", FillStyle::White, 35.0, 150.0),
    ("TO RESTART", FillStyle::White, 75.0, 180.0),
];

/// Images the game asks the host to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    /// Animated bird, frame index in `0..BIRD_FRAME_COUNT`.
    Bird(usize),
    TopPipe,
    BottomPipe,
}

impl Sprite {
    pub fn for_pipe(variant: PipeVariant) -> Self {
        match variant {
            PipeVariant::Top => Sprite::TopPipe,
            PipeVariant::Bottom => Sprite::BottomPipe,
        }
    }
}

/// Fill colours used for text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillStyle {
    White,
    Red,
}

/// A 2D raster drawing capability in board coordinates.
pub trait RenderSurface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn draw_image(&mut self, sprite: Sprite, x: f64, y: f64, width: f64, height: f64);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
    fn set_fill_style(&mut self, style: FillStyle);
    fn set_font(&mut self, font: &str);
}

/// Discards every call. Used by the headless simulator.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl RenderSurface for NullSurface {
    fn clear_rect(&mut self, _x: f64, _y: f64, _width: f64, _height: f64) {}
    fn draw_image(&mut self, _sprite: Sprite, _x: f64, _y: f64, _width: f64, _height: f64) {}
    fn fill_text(&mut self, _text: &str, _x: f64, _y: f64) {}
    fn set_fill_style(&mut self, _style: FillStyle) {}
    fn set_font(&mut self, _font: &str) {}
}

/// Wall-clock driven bird flap animation, independent of the frame rate.
#[derive(Debug, Clone)]
pub struct BirdAnimation {
    frame: usize,
    last_change_ms: u64,
    interval_ms: u64,
}

impl BirdAnimation {
    pub fn new() -> Self {
        Self {
            frame: 0,
            last_change_ms: 0,
            interval_ms: BIRD_FRAME_INTERVAL_MS,
        }
    }

    /// Step to the next frame if a full interval has passed since the last change.
    pub fn advance(&mut self, now_ms: u64) {
        if now_ms.saturating_sub(self.last_change_ms) >= self.interval_ms {
            self.frame = (self.frame + 1) % BIRD_FRAME_COUNT;
            self.last_change_ms = now_ms;
        }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }
}

impl Default for BirdAnimation {
    fn default() -> Self {
        Self::new()
    }
}

/// Score as shown on screen: `3`, `3.5`.
pub fn format_score(score: f64) -> String {
    format!("{}", score)
}

/// Draw one frame of the session.
pub fn render_frame<S: RenderSurface + ?Sized>(
    session: &GameSession,
    bird_frame: usize,
    surface: &mut S,
) {
    surface.clear_rect(0.0, 0.0, BOARD_WIDTH, BOARD_HEIGHT);

    let bird = &session.bird;
    surface.draw_image(
        Sprite::Bird(bird_frame),
        bird.x,
        bird.y,
        bird.width,
        bird.height,
    );

    for pipe in &session.pipes {
        surface.draw_image(
            Sprite::for_pipe(pipe.variant),
            pipe.x,
            pipe.y,
            pipe.width,
            pipe.height,
        );
    }

    surface.set_fill_style(FillStyle::White);
    surface.set_font(SCORE_FONT);
    surface.fill_text(&format_score(session.score()), SCORE_POS.0, SCORE_POS.1);

    if session.is_game_over() {
        for (text, style, x, y) in GAME_OVER_LINES {
            surface.set_fill_style(style);
            surface.fill_text(text, x, y);
        }
    }
}
