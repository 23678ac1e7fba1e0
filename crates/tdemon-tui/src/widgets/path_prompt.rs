//! One-line prompt for a user config path

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use tdemon_app::state::PathPromptState;

use super::modal_overlay;
use crate::theme::styles;

const PROMPT_HEIGHT: u16 = 6;
const PROMPT_MAX_WIDTH: u16 = 72;

pub struct PathPrompt<'a> {
    state: &'a PathPromptState,
}

impl<'a> PathPrompt<'a> {
    pub fn new(state: &'a PathPromptState) -> Self {
        Self { state }
    }
}

impl Widget for PathPrompt<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = PROMPT_MAX_WIDTH.min(area.width.saturating_sub(4));
        let modal = modal_overlay::centered_rect(width, PROMPT_HEIGHT, area);
        modal_overlay::prepare_modal(buf, area, modal);

        let block = styles::modal_block(" Update Configuration ");
        let inner_width = block.inner(modal).width as usize;

        // Keep the tail of long paths visible
        let visible_budget = inner_width.saturating_sub(4);
        let input = &self.state.input;
        let shown = match input.char_indices().rev().nth(visible_budget.saturating_sub(1)) {
            Some((start, _)) if input.chars().count() > visible_budget => &input[start..],
            _ => input.as_str(),
        };

        let status = match &self.state.error {
            Some(error) => Line::from(Span::styled(format!(" {error}"), styles::status_red())),
            None => Line::from(Span::styled(
                " WireGuard .conf file from the infrastructure team",
                styles::text_muted(),
            )),
        };

        let lines = vec![
            Line::from(vec![
                Span::styled(" > ", styles::accent()),
                Span::styled(shown, styles::text_primary()),
                Span::styled("█", styles::accent()),
            ]),
            status,
            Line::default(),
            Line::from(Span::styled(
                " Enter merge · Esc cancel · Ctrl+U clear",
                styles::text_muted(),
            )),
        ];

        Paragraph::new(lines).block(block).render(modal, buf);
    }
}
