//! Key event handlers for different UI modes

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, Focus, UiMode};

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    // Force quit with Ctrl+C from any mode
    if key == InputKey::CharCtrl('c') {
        return Some(Message::Quit);
    }

    match state.ui_mode {
        UiMode::Normal => handle_key_normal(state, key),
        UiMode::PathPrompt => handle_key_path_prompt(key),
        UiMode::ConfigViewer => handle_key_config_viewer(key),
    }
}

/// Handle key events in normal mode
fn handle_key_normal(state: &AppState, key: InputKey) -> Option<Message> {
    let is_busy = state.is_loading();

    match key {
        InputKey::Char('q') | InputKey::Esc => Some(Message::Quit),

        InputKey::Tab | InputKey::BackTab => Some(Message::FocusNext),

        // ─────────────────────────────────────────────────────────
        // Navigation (menu or log, depending on focus)
        // ─────────────────────────────────────────────────────────
        InputKey::Up | InputKey::Char('k') => Some(match state.focus {
            Focus::Menu => Message::MenuUp,
            Focus::Log => Message::LogScrollUp,
        }),
        InputKey::Down | InputKey::Char('j') => Some(match state.focus {
            Focus::Menu => Message::MenuDown,
            Focus::Log => Message::LogScrollDown,
        }),

        // ─────────────────────────────────────────────────────────
        // Operations - discarded while a task is outstanding
        // ─────────────────────────────────────────────────────────
        InputKey::Enter | InputKey::Char(' ') if !is_busy => Some(Message::MenuSelect),
        InputKey::Char('r') if !is_busy => Some(Message::RefreshStatus),
        InputKey::Char('t') if !is_busy => Some(Message::InstallTemplates),

        _ => None,
    }
}

/// Handle key events while typing a config path
fn handle_key_path_prompt(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc => Some(Message::ClosePanel),
        InputKey::Enter => Some(Message::PathSubmit),
        InputKey::Backspace => Some(Message::PathBackspace),
        InputKey::CharCtrl('u') => Some(Message::PathClear),
        InputKey::Char(c) => Some(Message::PathInput(c)),
        _ => None,
    }
}

/// Handle key events in the config viewer
fn handle_key_config_viewer(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc | InputKey::Enter | InputKey::Char('q') => Some(Message::ClosePanel),
        InputKey::Up | InputKey::Char('k') => Some(Message::ConfigScrollUp),
        InputKey::Down | InputKey::Char('j') => Some(Message::ConfigScrollDown),
        _ => None,
    }
}
