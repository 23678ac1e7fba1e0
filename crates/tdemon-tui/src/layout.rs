//! Screen layout definitions for the TUI

use ratatui::layout::{Constraint, Layout, Rect};

/// Width of the menu column, borders included
pub const MENU_WIDTH: u16 = 32;

/// Height of the status panel, borders included
pub const STATUS_HEIGHT: u16 = 8;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title and key hints
    pub header: Rect,
    pub menu: Rect,
    pub status: Rect,
    pub log: Rect,
    /// One-line status message / spinner
    pub footer: Rect,
}

/// Split the screen: header, a body of menu | (status / log), footer
///
/// On narrow terminals the menu is stacked above the status panel.
pub fn create(area: Rect) -> ScreenAreas {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(6),
        Constraint::Length(1),
    ])
    .areas(area);

    if body.width >= MENU_WIDTH * 2 {
        let [menu, right] =
            Layout::horizontal([Constraint::Length(MENU_WIDTH), Constraint::Min(20)]).areas(body);
        let [status, log] =
            Layout::vertical([Constraint::Length(STATUS_HEIGHT), Constraint::Min(3)]).areas(right);
        ScreenAreas {
            header,
            menu,
            status,
            log,
            footer,
        }
    } else {
        let [menu, status, log] = Layout::vertical([
            Constraint::Length(10),
            Constraint::Length(STATUS_HEIGHT),
            Constraint::Min(0),
        ])
        .areas(body);
        ScreenAreas {
            header,
            menu,
            status,
            log,
            footer,
        }
    }
}
