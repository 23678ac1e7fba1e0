//! Main menu widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use tdemon_app::state::MenuItem;

use crate::theme::styles;

/// Operation menu; items that start work are dimmed while a task runs
pub struct Menu {
    selected: usize,
    focused: bool,
    loading: bool,
}

impl Menu {
    pub fn new(selected: usize) -> Self {
        Self {
            selected,
            focused: true,
            loading: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }
}

impl Widget for Menu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(self.focused).title(" Menu ");

        let lines: Vec<Line> = MenuItem::ALL
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let is_selected = index == self.selected;
                let style = if is_selected && self.focused {
                    styles::focused_selected()
                } else if is_selected {
                    styles::unfocused_selected()
                } else if self.loading && item.is_operation() {
                    styles::text_muted()
                } else {
                    styles::text_secondary()
                };
                let marker = if is_selected { "▸ " } else { "  " };
                Line::from(Span::styled(format!("{marker}{}", item.label()), style))
            })
            .collect();

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
