//! Read-only viewer for a redacted merged config

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use tdemon_app::state::ConfigView;

use super::modal_overlay;
use crate::theme::styles;

pub struct ConfigViewer<'a> {
    view: &'a ConfigView,
}

impl<'a> ConfigViewer<'a> {
    pub fn new(view: &'a ConfigView) -> Self {
        Self { view }
    }

    fn style_line(line: &str) -> Line<'_> {
        if line.starts_with('[') {
            Line::from(Span::styled(line, styles::accent_bold()))
        } else if line.ends_with(tdemon_app::config::viewer::REDACTED) {
            Line::from(Span::styled(line, styles::status_yellow()))
        } else {
            Line::from(Span::styled(line, styles::text_primary()))
        }
    }
}

impl Widget for ConfigViewer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = modal_overlay::centered_rect_percent(80, 80, area);
        modal_overlay::prepare_modal(buf, area, modal);

        let title = format!(" {} config ", self.view.env.display_name());
        let block = styles::modal_block(&title)
            .title_bottom(Line::from(" ↑↓ scroll · Esc close ").centered());

        let lines: Vec<Line> = self.view.contents.lines().map(Self::style_line).collect();
        let scroll = u16::try_from(self.view.scroll).unwrap_or(u16::MAX);

        Paragraph::new(lines)
            .block(block)
            .scroll((scroll, 0))
            .render(modal, buf);
    }
}
