//! Keybinding definitions for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Prev,
    Next,
    Random,
    ToggleLocale,
    OpenHelp,
    Cancel,
}

pub fn map_key(event: KeyEvent) -> Option<Action> {
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::OpenHelp),
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::Prev),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::Next),
        KeyCode::Char('r') => Some(Action::Random),
        KeyCode::Char('t') => Some(Action::ToggleLocale),
        _ => None,
    }
}
