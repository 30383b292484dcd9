use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// User actions from terminal events
#[derive(Debug, PartialEq)]
pub enum Action {
    Quit,
    /// Cancel the running request, else clear the input, else quit
    Cancel,
    Classify,
    PasteClipboard,
    CopyResult,
    ClearInput,
    InsertChar(char),
    /// Text delivered by a bracketed paste
    InsertText(String),
    DeleteChar,
    None,
}

/// Poll for terminal events and convert to actions
pub fn poll_event(timeout: Duration) -> anyhow::Result<Action> {
    if event::poll(timeout)? {
        return Ok(event_to_action(event::read()?));
    }
    Ok(Action::None)
}

fn event_to_action(event: Event) -> Action {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => key_to_action(key),
        Event::Paste(text) => Action::InsertText(text),
        _ => Action::None,
    }
}

fn key_to_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::Cancel,

        (KeyCode::Char('s'), KeyModifiers::CONTROL) => Action::Classify,
        (KeyCode::Char('v'), KeyModifiers::CONTROL) => Action::PasteClipboard,
        (KeyCode::Char('y'), KeyModifiers::CONTROL) => Action::CopyResult,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::ClearInput,

        // Text input
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Action::InsertChar(c)
        }
        (KeyCode::Enter, _) => Action::InsertChar('\n'),
        (KeyCode::Tab, _) => Action::InsertChar('\t'),
        (KeyCode::Backspace, _) => Action::DeleteChar,

        _ => Action::None,
    }
}
