//! Custom widget components

mod activity_log;
mod config_viewer;
mod header;
mod menu;
pub mod modal_overlay;
mod path_prompt;
mod status_line;
mod status_panel;

pub use activity_log::ActivityLogView;
pub use config_viewer::ConfigViewer;
pub use header::MainHeader;
pub use menu::Menu;
pub use path_prompt::PathPrompt;
pub use status_line::StatusLine;
pub use status_panel::{format_age, StatusPanel};
