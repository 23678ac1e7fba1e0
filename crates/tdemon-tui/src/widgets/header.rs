//! Header bar widget
//!
//! App title with a connection dot, key hints, and an environment pill.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use tdemon_core::TunnelSession;

use crate::theme::{palette, styles};

const SHORTCUTS: [(&str, &str); 4] = [
    ("↑↓", "Move"),
    ("Enter", "Select"),
    ("Tab", "Focus"),
    ("q", "Quit"),
];

/// Main header showing app title, key hints and the active environment
pub struct MainHeader<'a> {
    session: &'a TunnelSession,
}

impl<'a> MainHeader<'a> {
    pub fn new(session: &'a TunnelSession) -> Self {
        Self { session }
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let (dot, dot_style) = if self.session.connected {
            ("●", styles::status_green())
        } else {
            ("○", styles::text_muted())
        };

        let left_line = Line::from(vec![
            Span::raw(" "),
            Span::styled(dot, dot_style),
            Span::raw(" "),
            Span::styled("Tunnel Demon", styles::accent_bold()),
        ]);
        let left_width = left_line.width() as u16;

        let mut hint_spans = Vec::with_capacity(SHORTCUTS.len() * 3);
        for (key, label) in SHORTCUTS {
            hint_spans.push(Span::styled("[", styles::text_muted()));
            hint_spans.push(Span::styled(key, styles::keybinding()));
            hint_spans.push(Span::styled(format!("] {label}  "), styles::text_muted()));
        }
        let hints_line = Line::from(hint_spans);
        let hints_width = hints_line.width() as u16;

        let pill = self.session.environment.filter(|_| self.session.connected).map(|env| {
            Line::from(vec![
                Span::raw(" "),
                Span::styled(env.display_name(), styles::environment(env)),
                Span::raw(" "),
            ])
        });
        let pill_width = pill.as_ref().map(|l| l.width() as u16).unwrap_or(0);

        buf.set_line(inner.x, inner.y, &left_line, inner.width);

        let hints_x = inner.x + left_width + 2;
        if left_width + hints_width + pill_width + 4 <= inner.width {
            buf.set_line(hints_x, inner.y, &hints_line, hints_width);
        }

        if let Some(pill) = pill {
            if left_width + pill_width + 2 <= inner.width {
                let pill_x = inner.x + inner.width - pill_width;
                buf.set_line(pill_x, inner.y, &pill, pill_width);
            }
        }
    }
}
