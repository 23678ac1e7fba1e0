//! Activity log widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use tdemon_app::activity_log::ActivityLog;

use crate::theme::styles;

/// Timestamped activity entries, newest at the bottom
///
/// Multi-line entries (captured tool output) continue on indented lines.
pub struct ActivityLogView<'a> {
    log: &'a ActivityLog,
    focused: bool,
}

impl<'a> ActivityLogView<'a> {
    pub fn new(log: &'a ActivityLog) -> Self {
        Self {
            log,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for ActivityLogView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.log.is_following() {
            " Activity ".to_string()
        } else {
            format!(" Activity (↑{}) ", self.log.scroll_back())
        };
        let block = styles::glass_block(self.focused).title(title);
        let height = block.inner(area).height as usize;

        let mut lines: Vec<Line> = Vec::new();
        for entry in self.log.visible(height) {
            let style = styles::activity_level(entry.level);
            let mut text_lines = entry.message.lines();
            let first = text_lines.next().unwrap_or_default();
            lines.push(Line::from(vec![
                Span::styled(
                    entry.timestamp.format("%H:%M:%S ").to_string(),
                    styles::text_muted(),
                ),
                Span::styled(first.to_string(), style),
            ]));
            for rest in text_lines {
                lines.push(Line::from(Span::styled(format!("         {rest}"), style)));
            }
        }

        let skip = lines.len().saturating_sub(height);
        let lines: Vec<Line> = lines.into_iter().skip(skip).collect();

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_renders_entries() {
        let mut log = ActivityLog::new(10);
        log.info("Tunnel Demon started");
        log.error("Failed to start Production\nRTNETLINK answers: File exists");

        let mut term = TestTerminal::new();
        term.render_widget(ActivityLogView::new(&log), Rect::new(0, 0, 60, 8));

        assert!(term.buffer_contains("Tunnel Demon started"));
        assert!(term.buffer_contains("RTNETLINK answers: File exists"));
    }

    #[test]
    fn test_keeps_newest_lines_when_full() {
        let mut log = ActivityLog::new(50);
        for i in 0..20 {
            log.info(format!("entry {i:02}"));
        }

        let mut term = TestTerminal::new();
        // 3 inner rows
        term.render_widget(ActivityLogView::new(&log), Rect::new(0, 0, 40, 5));

        assert!(term.buffer_contains("entry 19"));
        assert!(term.buffer_contains("entry 17"));
        assert!(!term.buffer_contains("entry 16"));
    }

    #[test]
    fn test_scrolled_title() {
        let mut log = ActivityLog::new(10);
        log.info("a");
        log.info("b");
        log.scroll_up();

        let mut term = TestTerminal::new();
        term.render_widget(ActivityLogView::new(&log).focused(true), Rect::new(0, 0, 40, 5));

        assert!(term.buffer_contains("Activity (↑1)"));
    }
}
