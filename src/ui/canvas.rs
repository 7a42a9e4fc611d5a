//! Terminal implementation of [`RenderSurface`].
//!
//! Draw calls are kept as a display list in board coordinates and rasterised
//! into cells whenever the widget is rendered. A frame that is never redrawn
//! (the frozen game-over screen) keeps showing its last display list.

use crate::core::constants::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::core::geometry::Rect as BoardRect;
use crate::render::{FillStyle, RenderSurface, Sprite};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

// ── Palette ──────────────────────────────────────────────────────────
const SKY_BG: Color = Color::Rgb(78, 192, 202);
const BIRD_COLOR: Color = Color::Yellow;
const PIPE_COLOR: Color = Color::Green;
const PIPE_CAP_COLOR: Color = Color::LightGreen;

const FULL_BLOCK: char = '\u{2588}'; // █
/// Wing up, level, down.
const BIRD_GLYPHS: [char; 3] = ['\u{2580}', FULL_BLOCK, '\u{2584}']; // ▀ █ ▄

const DEFAULT_FONT_PX: f64 = 10.0;

/// One retained draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Image {
        sprite: Sprite,
        rect: BoardRect,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        style: FillStyle,
        font_px: f64,
    },
}

impl DrawOp {
    /// True if the op lies entirely inside `area`.
    fn inside(&self, area: &BoardRect) -> bool {
        match self {
            DrawOp::Image { rect, .. } => {
                rect.x >= area.x
                    && rect.y >= area.y
                    && rect.right() <= area.right()
                    && rect.bottom() <= area.bottom()
            }
            DrawOp::Text { x, y, .. } => {
                *x >= area.x && *y >= area.y && *x <= area.right() && *y <= area.bottom()
            }
        }
    }
}

/// Retained-mode canvas sized to the game board.
#[derive(Debug, Clone)]
pub struct TerminalCanvas {
    ops: Vec<DrawOp>,
    style: FillStyle,
    font_px: f64,
}

impl TerminalCanvas {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            style: FillStyle::White,
            font_px: DEFAULT_FONT_PX,
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }
}

impl Default for TerminalCanvas {
    fn default() -> Self {
        Self::new()
    }
}

/// Pixel size from a CSS-style font string such as `"35px sans-serif"`.
pub fn parse_font_px(font: &str) -> Option<f64> {
    font.split_whitespace()
        .find_map(|part| part.strip_suffix("px"))
        .and_then(|px| px.parse::<f64>().ok())
        .filter(|px| *px > 0.0)
}

impl RenderSurface for TerminalCanvas {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let area = BoardRect::new(x, y, width, height);
        if x <= 0.0 && y <= 0.0 && area.right() >= BOARD_WIDTH && area.bottom() >= BOARD_HEIGHT {
            self.ops.clear();
        } else {
            self.ops.retain(|op| !op.inside(&area));
        }
    }

    fn draw_image(&mut self, sprite: Sprite, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(DrawOp::Image {
            sprite,
            rect: BoardRect::new(x, y, width, height),
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            style: self.style,
            font_px: self.font_px,
        });
    }

    fn set_fill_style(&mut self, style: FillStyle) {
        self.style = style;
    }

    fn set_font(&mut self, font: &str) {
        // Unparseable fonts keep the previous size
        if let Some(px) = parse_font_px(font) {
            self.font_px = px;
        }
    }
}

/// Board span `[start, end)` mapped to cell indices `[0, cells)`.
fn cell_span(start: f64, end: f64, scale: f64, cells: u16) -> Option<(u16, u16)> {
    let first = (start * scale).floor().max(0.0);
    let last = (end * scale).ceil().min(cells as f64);
    if last <= first {
        return None;
    }
    Some((first as u16, last as u16))
}

fn text_color(style: FillStyle) -> Color {
    match style {
        FillStyle::White => Color::White,
        FillStyle::Red => Color::Red,
    }
}

impl Widget for &TerminalCanvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        buf.set_style(area, Style::default().bg(SKY_BG));

        let sx = area.width as f64 / BOARD_WIDTH;
        let sy = area.height as f64 / BOARD_HEIGHT;

        for op in &self.ops {
            match op {
                DrawOp::Image { sprite, rect } => {
                    let Some((col0, col1)) = cell_span(rect.x, rect.right(), sx, area.width) else {
                        continue;
                    };
                    let Some((row0, row1)) = cell_span(rect.y, rect.bottom(), sy, area.height)
                    else {
                        continue;
                    };

                    for row in row0..row1 {
                        let (glyph, color) = match sprite {
                            Sprite::Bird(frame) => {
                                (BIRD_GLYPHS[frame % BIRD_GLYPHS.len()], BIRD_COLOR)
                            }
                            // Cap on the row facing the gap
                            Sprite::TopPipe if row + 1 == row1 => (FULL_BLOCK, PIPE_CAP_COLOR),
                            Sprite::BottomPipe if row == row0 => (FULL_BLOCK, PIPE_CAP_COLOR),
                            Sprite::TopPipe | Sprite::BottomPipe => (FULL_BLOCK, PIPE_COLOR),
                        };
                        for col in col0..col1 {
                            buf.get_mut(area.x + col, area.y + row)
                                .set_char(glyph)
                                .set_fg(color);
                        }
                    }
                }
                DrawOp::Text {
                    text,
                    x,
                    y,
                    style,
                    font_px,
                } => {
                    // `y` is the baseline; place the row mid-glyph
                    let row = ((y - font_px / 2.0) * sy).floor();
                    let col = (x * sx).floor().max(0.0);
                    if row < 0.0 || row >= area.height as f64 || col >= area.width as f64 {
                        continue;
                    }
                    let (row, col) = (row as u16, col as u16);
                    buf.set_stringn(
                        area.x + col,
                        area.y + row,
                        text,
                        (area.width - col) as usize,
                        Style::default()
                            .fg(text_color(*style))
                            .add_modifier(Modifier::BOLD),
                    );
                }
            }
        }
    }
}
