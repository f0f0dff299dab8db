use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

/// User actions from keyboard events
#[derive(Debug, PartialEq)]
pub enum Action {
    Quit,
    ClearInput,
    Submit,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    CopyReport,
    ExportReport,
    ClearMemory,
    ToggleView,
    InputChar(char),
    DeleteChar,
    None,
}

/// Poll for keyboard events and convert to actions
pub fn poll_event(timeout: Duration) -> anyhow::Result<Action> {
    if event::poll(timeout)?
        && let Event::Key(key) = event::read()?
    {
        return Ok(key_to_action(key));
    }
    Ok(Action::None)
}

/// Control chords carry the report actions; everything else edits the query
/// or navigates.
fn key_to_action(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Action::Quit,
            KeyCode::Char('y') => Action::CopyReport,
            KeyCode::Char('e') => Action::ExportReport,
            KeyCode::Char('l') => Action::ClearMemory,
            KeyCode::Char('t') => Action::ToggleView,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Esc => Action::ClearInput,
        KeyCode::Enter => Action::Submit,
        KeyCode::Up => Action::ScrollUp,
        KeyCode::Down => Action::ScrollDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::Backspace => Action::DeleteChar,
        KeyCode::Char(c) => Action::InputChar(c),
        _ => Action::None,
    }
}
