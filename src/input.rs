//! Terminal input mapping.
//!
//! The game understands browser-style key codes (`"Space"`, `"ArrowUp"`,
//! `"KeyX"`). This module turns crossterm events into those codes and peels
//! off the host-only quit keys, which never reach the game.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A key press as seen by the terminal host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostInput {
    /// Leave the game (Esc, `q`, Ctrl-C).
    Quit,
    /// Forward this key code to the game.
    Key(String),
}

/// Browser-style key code for a crossterm key, if it has one.
pub fn key_code(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) if c.is_ascii_alphabetic() => format!("Key{}", c.to_ascii_uppercase()),
        KeyCode::Char(c) if c.is_ascii_digit() => format!("Digit{}", c),
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        _ => return None,
    };
    Some(name)
}

/// Classify a key event. Releases and unmapped keys yield `None`.
pub fn classify(key: &KeyEvent) -> Option<HostInput> {
    // Windows terminals report releases too
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return Some(HostInput::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(HostInput::Quit)
        }
        _ => {}
    }

    key_code(key.code).map(HostInput::Key)
}
