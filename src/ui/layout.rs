//! Screen layout pieces: outer frame, status bar, info panel, board fitting.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Terminal cells are roughly twice as tall as they are wide.
pub const CELL_ASPECT: f64 = 2.0;
const STATUS_BAR_HEIGHT: u16 = 2;
const MIN_PLAY_WIDTH: u16 = 20;

/// Areas of the game screen.
///
/// ```text
/// ┌─ Title ─────────────────────────┬─ Info ──────┐
/// │   [play]                        │  [info]     │
/// │                                 │             │
/// │ [status - 2 lines]              │             │
/// └─────────────────────────────────┴─────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub play: Rect,
    pub status: Rect,
    /// Includes the panel's own border.
    pub info: Rect,
}

impl ScreenLayout {
    /// Clear `area`, draw the titled outer frame and split what is inside it.
    pub fn render_frame(
        frame: &mut Frame,
        area: Rect,
        title: &str,
        accent: Color,
        info_width: u16,
    ) -> Self {
        let outer = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent));
        let inner = outer.inner(area);

        frame.render_widget(Clear, area);
        frame.render_widget(outer, area);

        Self::split(inner, info_width)
    }

    /// Split an already-framed area.
    pub fn split(inner: Rect, info_width: u16) -> Self {
        let [left, info] = columns(inner, info_width);
        let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(STATUS_BAR_HEIGHT)])
            .split(left);
        Self {
            play: rows[0],
            status: rows[1],
            info,
        }
    }
}

fn columns(area: Rect, info_width: u16) -> [Rect; 2] {
    let cols = Layout::horizontal([
        Constraint::Min(MIN_PLAY_WIDTH),
        Constraint::Length(info_width),
    ])
    .split(area);
    [cols[0], cols[1]]
}

/// Largest rectangle inside `area` with the board's proportions, centered.
pub fn fit_board(area: Rect, board_width: f64, board_height: f64) -> Rect {
    if area.width == 0 || area.height == 0 || board_width <= 0.0 || board_height <= 0.0 {
        return area;
    }

    // Board width in cells if the full height is used
    let width_for_height =
        (area.height as f64 * board_width / board_height * CELL_ASPECT).round() as u16;

    let (width, height) = if width_for_height <= area.width {
        (width_for_height.max(1), area.height)
    } else {
        let height_for_width =
            (area.width as f64 * board_height / board_width / CELL_ASPECT).round() as u16;
        (area.width, height_for_width.clamp(1, area.height))
    };

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Key hints such as `[Space] Flap  [Esc] Quit`.
pub fn controls_line(controls: &[(&str, &str)]) -> Line<'static> {
    let key_style = Style::default().fg(Color::White);
    let action_style = Style::default().fg(Color::DarkGray);

    let spans: Vec<Span<'static>> = controls
        .iter()
        .enumerate()
        .flat_map(|(i, (key, action))| {
            let gap = (i > 0).then(|| Span::raw("  "));
            gap.into_iter().chain([
                Span::styled(key.to_string(), key_style),
                Span::styled(format!(" {}", action), action_style),
            ])
        })
        .collect();
    Line::from(spans)
}

/// Status message on the first row, key hints on the second.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    message: &str,
    color: Color,
    controls: &[(&str, &str)],
) {
    let mut lines = vec![Line::styled(message.to_string(), Style::default().fg(color))];
    if !controls.is_empty() {
        lines.push(controls_line(controls));
    }
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Bordered " Info " panel. Returns the area inside the border.
pub fn render_info_panel_frame(frame: &mut Frame, area: Rect) -> Rect {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_board_uses_full_height_when_wide() {
        let area = Rect::new(0, 0, 100, 32);
        let board = fit_board(area, 360.0, 640.0);
        // 32 rows * 360/640 * 2 = 36 columns
        assert_eq!(board.height, 32);
        assert_eq!(board.width, 36);
        assert_eq!(board.x, 32);
        assert_eq!(board.y, 0);
    }

    #[test]
    fn test_fit_board_uses_full_width_when_narrow() {
        let area = Rect::new(2, 3, 18, 40);
        let board = fit_board(area, 360.0, 640.0);
        // 18 columns * 640/360 / 2 = 16 rows
        assert_eq!(board.width, 18);
        assert_eq!(board.height, 16);
        assert_eq!(board.x, 2);
        assert_eq!(board.y, 3 + 12);
    }

    #[test]
    fn test_fit_board_empty_area() {
        let area = Rect::new(0, 0, 0, 10);
        assert_eq!(fit_board(area, 360.0, 640.0), area);
    }

    #[test]
    fn test_split_reserves_status_and_info() {
        let layout = ScreenLayout::split(Rect::new(1, 1, 78, 28), 22);
        assert_eq!(layout.info.width, 22);
        assert_eq!(layout.play.width, 56);
        assert_eq!(layout.status.height, 2);
        assert_eq!(layout.play.height, 26);
        assert_eq!(layout.status.y, layout.play.y + 26);
    }

    #[test]
    fn test_controls_line_spacing() {
        let line = controls_line(&[("[Space]", "Flap"), ("[Esc]", "Quit")]);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "[Space] Flap  [Esc] Quit");
    }
}
