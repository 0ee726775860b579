use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::engine::Command;

/// Words jumped by the arrow keys
pub const SKIP_WORDS: i64 = 10;

/// WPM change per rate keypress
pub const RATE_STEP: i64 = 25;

/// What a keypress asks the host to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Command(Command),
    /// Relative rate change; the host applies its range and persists the result
    StepRate(i64),
}

pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let command = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::Close,
        KeyCode::Char(' ') => Command::TogglePlay,
        KeyCode::Left => Command::Skip(-SKIP_WORDS),
        KeyCode::Right => Command::Skip(SKIP_WORDS),
        KeyCode::Char('r') | KeyCode::Char('R') => Command::Restart,
        KeyCode::Esc | KeyCode::Char('q') => Command::Close,
        KeyCode::Up | KeyCode::Char('+') | KeyCode::Char('=') => {
            return Some(Action::StepRate(RATE_STEP))
        }
        KeyCode::Down | KeyCode::Char('-') => return Some(Action::StepRate(-RATE_STEP)),
        _ => return None,
    };

    Some(Action::Command(command))
}
