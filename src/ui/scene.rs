//! The full game screen: board, status bar and info panel.

use super::canvas::TerminalCanvas;
use super::layout::{fit_board, render_info_panel_frame, render_status_bar, ScreenLayout};
use crate::core::constants::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::core::game_state::{GameOverReason, GameSession};
use crate::render::format_score;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const CONTROLS: [(&str, &str); 2] = [("[Space/Up/X]", "Flap"), ("[Esc/q]", "Quit")];
const INFO_PANEL_WIDTH: u16 = 22;

/// Numbers the host tracks across runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HudStats {
    pub best_score: f64,
    pub runs: u32,
    pub frame_interval_ms: u64,
}

impl HudStats {
    pub fn new(frame_interval_ms: u64) -> Self {
        Self {
            best_score: 0.0,
            runs: 1,
            frame_interval_ms,
        }
    }

    /// Fold the current session into the stats.
    pub fn observe(&mut self, session: &GameSession, restarts: u32) {
        if session.score() > self.best_score {
            self.best_score = session.score();
        }
        self.runs = restarts + 1;
    }
}

/// Render the whole game screen.
pub fn draw_game(
    frame: &mut Frame,
    canvas: &TerminalCanvas,
    session: &GameSession,
    hud: &HudStats,
) {
    let area = frame.size();
    let layout =
        ScreenLayout::render_frame(frame, area, " Flappy Bird ", Color::Cyan, INFO_PANEL_WIDTH);

    let board = fit_board(layout.play, BOARD_WIDTH, BOARD_HEIGHT);
    frame.render_widget(canvas, board);

    render_status(frame, layout.status, session);
    render_info_panel(frame, layout.info, session, hud);
}

fn render_status(frame: &mut Frame, area: Rect, session: &GameSession) {
    if session.is_game_over() {
        render_status_bar(
            frame,
            area,
            "Game over! Press Space, Up or X to restart",
            Color::Red,
            &CONTROLS,
        );
    } else {
        render_status_bar(
            frame,
            area,
            &format!("Score: {}", format_score(session.score())),
            Color::Green,
            &CONTROLS,
        );
    }
}

fn reason_label(reason: Option<GameOverReason>) -> &'static str {
    match reason {
        Some(GameOverReason::FellOffBoard) => "Fell",
        Some(GameOverReason::HitPipe) => "Hit pipe",
        None => "Crashed",
    }
}

fn stat_line(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {}: ", label), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

fn render_info_panel(frame: &mut Frame, area: Rect, session: &GameSession, hud: &HudStats) {
    let inner = render_info_panel_frame(frame, area);

    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let state = if session.is_running() {
        Span::styled(" Flying", Style::default().fg(Color::Green))
    } else {
        Span::styled(
            format!(" {}", reason_label(session.game_over_reason)),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(" Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format_score(session.score()),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        stat_line("Best", format_score(hud.best_score), Color::Yellow),
        stat_line("Run", hud.runs.to_string(), Color::White),
        Line::from(""),
        Line::from(state),
        stat_line("Pipes", session.pipes.len().to_string(), Color::White),
        stat_line("Frame", format!("{}ms", hud.frame_interval_ms), Color::White),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render_frame;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_hud_tracks_best_and_runs() {
        let mut hud = HudStats::new(16);
        let mut session = GameSession::new();
        session.award_half_point();
        session.award_half_point();
        session.award_half_point();
        hud.observe(&session, 0);
        assert_eq!(hud.best_score, 1.5);
        assert_eq!(hud.runs, 1);

        session.reset();
        hud.observe(&session, 1);
        assert_eq!(hud.best_score, 1.5);
        assert_eq!(hud.runs, 2);
    }

    #[test]
    fn test_draw_running_screen() {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).expect("terminal");
        let session = GameSession::new();
        let mut canvas = TerminalCanvas::new();
        render_frame(&session, 0, &mut canvas);
        let hud = HudStats::new(16);

        terminal
            .draw(|frame| draw_game(frame, &canvas, &session, &hud))
            .expect("draw");

        let text = buffer_text(&terminal);
        assert!(text.contains("Flappy Bird"));
        assert!(text.contains("Score: 0"));
        assert!(text.contains("Flying"));
        assert!(text.contains("16ms"));
    }

    #[test]
    fn test_draw_game_over_screen() {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).expect("terminal");
        let mut session = GameSession::new();
        session.end_run(GameOverReason::HitPipe);
        let canvas = TerminalCanvas::new();
        let hud = HudStats::new(16);

        terminal
            .draw(|frame| draw_game(frame, &canvas, &session, &hud))
            .expect("draw");

        let text = buffer_text(&terminal);
        assert!(text.contains("Game over!"));
        assert!(text.contains("Hit pipe"));
    }
}
