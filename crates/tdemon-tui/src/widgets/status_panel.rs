//! Tunnel status panel

use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use tdemon_core::{format_bytes, TunnelSession};

use crate::theme::styles;

const LABEL_WIDTH: usize = 12;

/// Connection details from the last probe
pub struct StatusPanel<'a> {
    session: &'a TunnelSession,
    now: DateTime<Local>,
}

impl<'a> StatusPanel<'a> {
    pub fn new(session: &'a TunnelSession) -> Self {
        Self {
            session,
            now: Local::now(),
        }
    }

    /// Reference time for the handshake age
    pub fn at(mut self, now: DateTime<Local>) -> Self {
        self.now = now;
        self
    }
}

fn row<'a>(label: &'a str, value: Span<'a>) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!(" {label:<LABEL_WIDTH$}"), styles::text_muted()),
        value,
    ])
}

/// "45s ago", "3m 12s ago", "2h 5m ago"
pub fn format_age(age: chrono::Duration) -> String {
    let secs = age.num_seconds().max(0);
    if secs < 60 {
        format!("{secs}s ago")
    } else if secs < 3600 {
        format!("{}m {}s ago", secs / 60, secs % 60)
    } else {
        format!("{}h {}m ago", secs / 3600, (secs % 3600) / 60)
    }
}

impl Widget for StatusPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).title(" Status ");
        let session = self.session;

        let lines = if session.connected {
            let environment = match session.environment {
                Some(env) => Span::styled(env.display_name(), styles::environment(env)),
                None => Span::styled("Unknown", styles::text_muted()),
            };
            let endpoint = session.endpoint.as_deref().unwrap_or("-");
            let handshake = session
                .handshake_age(self.now)
                .map(format_age)
                .unwrap_or_else(|| "-".to_string());
            let transfer = format!(
                "↓ {}  ↑ {}",
                format_bytes(session.bytes_received),
                format_bytes(session.bytes_sent)
            );

            vec![
                row("Status", Span::styled("● Connected", styles::status_green())),
                row("Environment", environment),
                row(
                    "Interface",
                    Span::styled(session.interface_name.as_str(), styles::text_primary()),
                ),
                row("Endpoint", Span::styled(endpoint, styles::text_primary())),
                row("Handshake", Span::styled(handshake, styles::text_primary())),
                row("Transfer", Span::styled(transfer, styles::text_primary())),
            ]
        } else {
            vec![
                row("Status", Span::styled("○ Disconnected", styles::status_red())),
                Line::from(Span::styled(
                    " Select an environment to connect",
                    styles::text_muted(),
                )),
            ]
        };

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
