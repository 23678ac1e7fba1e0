//! Main render/view function (View in TEA pattern)

use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use tdemon_app::state::{AppState, Focus, UiMode};

use crate::theme::palette;
use crate::{layout, widgets};

/// Render the complete UI (View function in TEA)
///
/// Pure: reads state, never modifies it.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    frame.render_widget(
        Block::default().style(Style::default().bg(palette::DEEPEST_BG)),
        area,
    );

    let areas = layout::create(area);

    frame.render_widget(widgets::MainHeader::new(&state.session), areas.header);

    let log_focused = state.ui_mode == UiMode::Normal && state.focus == Focus::Log;
    let menu_focused = state.ui_mode == UiMode::Normal && state.focus == Focus::Menu;

    frame.render_widget(
        widgets::Menu::new(state.menu_index)
            .focused(menu_focused)
            .loading(state.is_loading()),
        areas.menu,
    );
    frame.render_widget(widgets::StatusPanel::new(&state.session), areas.status);
    frame.render_widget(
        widgets::ActivityLogView::new(&state.log).focused(log_focused),
        areas.log,
    );
    frame.render_widget(widgets::StatusLine::new(state), areas.footer);

    // Modal overlays
    match state.ui_mode {
        UiMode::Normal => {}
        UiMode::PathPrompt => {
            frame.render_widget(widgets::PathPrompt::new(&state.path_prompt), area);
        }
        UiMode::ConfigViewer => {
            if let Some(view) = &state.config_view {
                frame.render_widget(widgets::ConfigViewer::new(view), area);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use tdemon_core::{Environment, TunnelSession};

    #[test]
    fn test_normal_view_renders_all_panes() {
        let mut state = AppState::new();
        state.log.info("Tunnel Demon started");

        let mut term = TestTerminal::new();
        term.draw_with(|frame| view(frame, &state));

        assert!(term.buffer_contains("Tunnel Demon"));
        assert!(term.buffer_contains("Start Production"));
        assert!(term.buffer_contains("Disconnected"));
        assert!(term.buffer_contains("Tunnel Demon started"));
    }

    #[test]
    fn test_connected_session_visible() {
        let mut state = AppState::new();
        state.session = TunnelSession::connected("julo-nonprod");

        let mut term = TestTerminal::new();
        term.draw_with(|frame| view(frame, &state));

        assert!(term.buffer_contains("julo-nonprod"));
    }

    #[test]
    fn test_path_prompt_overlay() {
        let mut state = AppState::new();
        state.open_path_prompt();
        state.path_prompt.input = "/tmp/user.conf".to_string();

        let mut term = TestTerminal::new();
        term.draw_with(|frame| view(frame, &state));

        assert!(term.buffer_contains("Enter merge"));
        assert!(term.buffer_contains("/tmp/user.conf"));
    }

    #[test]
    fn test_config_viewer_overlay() {
        let mut state = AppState::new();
        state.show_config(Environment::Production, "[Interface]\nPrivateKey = [HIDDEN]".into());

        let mut term = TestTerminal::new();
        term.draw_with(|frame| view(frame, &state));

        assert!(term.buffer_contains("Production config"));
        assert!(term.buffer_contains("PrivateKey = [HIDDEN]"));
    }

    #[test]
    fn test_compact_terminal_does_not_panic() {
        let mut state = AppState::new();
        state.open_path_prompt();

        let mut term = TestTerminal::compact();
        term.draw_with(|frame| view(frame, &state));

        assert!(!term.content().is_empty());
    }
}
