//! Input handling - convert key events to viewer commands

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Something the viewer can be asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move on to the next generation run
    Next,
    /// Leave the viewer altogether
    Quit,
    /// Show or hide anchor markers
    ToggleAnchors,
    /// Switch to the next canvas marker style
    CycleMarker,
}

/// Convert a key event to a viewer command.
pub fn key_to_command(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit), // Ctrl+C
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('n') | KeyCode::Char(' ') | KeyCode::Enter => Some(Command::Next),
        KeyCode::Char('a') => Some(Command::ToggleAnchors),
        KeyCode::Char('m') => Some(Command::CycleMarker),
        _ => None,
    }
}
