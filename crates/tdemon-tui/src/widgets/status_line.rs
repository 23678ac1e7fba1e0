//! Bottom status line: spinner while loading, else the last outcome

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use tdemon_app::AppState;

use crate::theme::styles;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct StatusLine<'a> {
    state: &'a AppState,
}

impl<'a> StatusLine<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let line = match self.state.in_flight {
            Some(kind) => {
                let frame = SPINNER[self.state.spinner_frame % SPINNER.len()];
                Line::from(vec![
                    Span::styled(format!(" {frame} "), styles::accent()),
                    Span::styled(kind.describe(), styles::text_secondary()),
                ])
            }
            None => {
                let message = self.state.status_message.as_deref().unwrap_or("Ready");
                Line::from(Span::styled(format!(" {message}"), styles::text_secondary()))
            }
        };
        buf.set_line(area.x, area.y, &line, area.width);

        if !self.state.tool_availability.all_available() {
            let warning = Line::from(Span::styled("wireguard-tools missing ", styles::status_red()));
            let width = warning.width() as u16;
            if width + (line.width() as u16) < area.width {
                buf.set_line(area.right() - width, area.y, &warning, width);
            }
        }
    }
}
