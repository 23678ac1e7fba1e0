//! Activity log state - bounded history of user-visible events and scroll
//! position.
//!
//! Shared by the handler layer (appending, scroll commands) and the TUI layer
//! (rendering).

use std::collections::VecDeque;

use chrono::{DateTime, Local};

/// Severity of an activity entry, used for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// One line (or block, for captured tool output) in the activity log
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEntry {
    pub timestamp: DateTime<Local>,
    pub level: ActivityLevel,
    pub message: String,
}

/// Bounded ring of activity entries
///
/// `scroll_back` counts entries hidden below the viewport; zero means the
/// view follows the newest entry.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
    capacity: usize,
    scroll_back: usize,
}

impl ActivityLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            scroll_back: 0,
        }
    }

    pub fn push(&mut self, level: ActivityLevel, message: impl Into<String>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        } else if self.scroll_back > 0 {
            // Keep the viewport on the same entries while scrolled back
            self.scroll_back += 1;
        }
        self.entries.push_back(ActivityEntry {
            timestamp: Local::now(),
            level,
            message: message.into(),
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ActivityLevel::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ActivityLevel::Success, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(ActivityLevel::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ActivityLevel::Error, message);
    }

    pub fn entries(&self) -> &VecDeque<ActivityEntry> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&ActivityEntry> {
        self.entries.back()
    }

    pub fn scroll_back(&self) -> usize {
        self.scroll_back
    }

    pub fn is_following(&self) -> bool {
        self.scroll_back == 0
    }

    /// Scroll towards older entries
    pub fn scroll_up(&mut self) {
        let max = self.entries.len().saturating_sub(1);
        self.scroll_back = (self.scroll_back + 1).min(max);
    }

    /// Scroll towards newer entries
    pub fn scroll_down(&mut self) {
        self.scroll_back = self.scroll_back.saturating_sub(1);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_back = 0;
    }

    /// Entries that fit in `height` rows, oldest first, honouring scroll
    pub fn visible(&self, height: usize) -> impl Iterator<Item = &ActivityEntry> {
        let end = self.entries.len().saturating_sub(self.scroll_back);
        let start = end.saturating_sub(height);
        self.entries.range(start..end)
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(200)
    }
}
