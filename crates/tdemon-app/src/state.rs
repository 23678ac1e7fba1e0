//! Application state (Model in TEA pattern)

use std::time::Instant;

use tdemon_core::{AppPhase, Environment, TunnelSession};
use tdemon_daemon::ToolAvailability;

use crate::activity_log::ActivityLog;
use crate::config::{SetupStatus, Settings};
use crate::handler::Task;
use crate::message::Message;

/// Current UI mode/screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// Menu, status panel and activity log
    #[default]
    Normal,

    /// One-line prompt capturing a user config path
    PathPrompt,

    /// Read-only view of a merged config
    ConfigViewer,
}

/// Which pane receives navigation keys in Normal mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Menu,
    Log,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Menu => Focus::Log,
            Focus::Log => Focus::Menu,
        }
    }
}

/// Main menu entries, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    StartProduction,
    StartNonProduction,
    Stop,
    Refresh,
    UpdateConfig,
    ViewProductionConfig,
    ViewNonProductionConfig,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 8] = [
        MenuItem::StartProduction,
        MenuItem::StartNonProduction,
        MenuItem::Stop,
        MenuItem::Refresh,
        MenuItem::UpdateConfig,
        MenuItem::ViewProductionConfig,
        MenuItem::ViewNonProductionConfig,
        MenuItem::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::StartProduction => "Start Production",
            MenuItem::StartNonProduction => "Start Non-Production",
            MenuItem::Stop => "Stop",
            MenuItem::Refresh => "Refresh Status",
            MenuItem::UpdateConfig => "Update Configuration",
            MenuItem::ViewProductionConfig => "View Production Config",
            MenuItem::ViewNonProductionConfig => "View Non-Production Config",
            MenuItem::Quit => "Quit",
        }
    }

    /// Message emitted when this item is selected
    pub fn message(&self) -> Message {
        match self {
            MenuItem::StartProduction => Message::StartSession(Environment::Production),
            MenuItem::StartNonProduction => Message::StartSession(Environment::NonProduction),
            MenuItem::Stop => Message::StopSession,
            MenuItem::Refresh => Message::RefreshStatus,
            MenuItem::UpdateConfig => Message::OpenPathPrompt,
            MenuItem::ViewProductionConfig => Message::ViewConfig(Environment::Production),
            MenuItem::ViewNonProductionConfig => Message::ViewConfig(Environment::NonProduction),
            MenuItem::Quit => Message::Quit,
        }
    }

    /// Whether selecting this item starts background work
    pub fn is_operation(&self) -> bool {
        !matches!(self, MenuItem::Quit)
    }
}

/// Kind of the single outstanding background task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Probe,
    Start(Environment),
    Stop,
    Merge,
    ReadConfig(Environment),
    InstallTemplates,
}

impl TaskKind {
    /// Spinner caption while the task runs
    pub fn describe(&self) -> String {
        match self {
            TaskKind::Probe => "Checking status...".to_string(),
            TaskKind::Start(env) => format!("Starting {}...", env.display_name()),
            TaskKind::Stop => "Stopping session...".to_string(),
            TaskKind::Merge => "Updating configuration...".to_string(),
            TaskKind::ReadConfig(env) => format!("Loading {} config...", env.display_name()),
            TaskKind::InstallTemplates => "Installing templates...".to_string(),
        }
    }
}

impl From<&Task> for TaskKind {
    fn from(task: &Task) -> Self {
        match task {
            Task::Probe => TaskKind::Probe,
            Task::Start(env) => TaskKind::Start(*env),
            Task::Stop => TaskKind::Stop,
            Task::Merge(_) => TaskKind::Merge,
            Task::ReadConfig(env) => TaskKind::ReadConfig(*env),
            Task::InstallTemplates => TaskKind::InstallTemplates,
        }
    }
}

/// Text of the path prompt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathPromptState {
    pub input: String,
    /// Inline validation message shown under the input
    pub error: Option<String>,
}

impl PathPromptState {
    pub fn clear(&mut self) {
        self.input.clear();
        self.error = None;
    }
}

/// Redacted merged config being displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigView {
    pub env: Environment,
    pub contents: String,
    pub scroll: usize,
}

impl ConfigView {
    pub fn new(env: Environment, contents: String) -> Self {
        Self {
            env,
            contents,
            scroll: 0,
        }
    }

    pub fn line_count(&self) -> usize {
        self.contents.lines().count()
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        let max = self.line_count().saturating_sub(1);
        self.scroll = (self.scroll + 1).min(max);
    }
}

/// Complete application state
#[derive(Debug)]
pub struct AppState {
    pub phase: AppPhase,

    /// Current UI mode/screen
    pub ui_mode: UiMode,

    pub focus: Focus,

    /// Index into [`MenuItem::ALL`]
    pub menu_index: usize,

    /// Session from the most recent probe
    pub session: TunnelSession,

    /// When the most recent probe completed
    pub last_probe: Option<Instant>,

    /// Outstanding background task; `Some` means loading
    pub in_flight: Option<TaskKind>,

    /// One-line summary of the last outcome
    pub status_message: Option<String>,

    /// The in-flight status refresh follows a successful operation; its
    /// result leaves `status_message` alone
    pub keep_status_on_refresh: bool,

    pub log: ActivityLog,

    pub path_prompt: PathPromptState,

    pub config_view: Option<ConfigView>,

    pub settings: Settings,

    pub tool_availability: ToolAvailability,

    pub setup_status: Option<SetupStatus>,

    /// Loading spinner frame, advanced on Tick
    pub spinner_frame: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            phase: AppPhase::Running,
            ui_mode: UiMode::Normal,
            focus: Focus::Menu,
            menu_index: 0,
            session: TunnelSession::disconnected(),
            last_probe: None,
            in_flight: None,
            status_message: None,
            keep_status_on_refresh: false,
            log: ActivityLog::new(settings.ui.log_capacity),
            path_prompt: PathPromptState::default(),
            config_view: None,
            settings,
            tool_availability: ToolAvailability::default(),
            setup_status: None,
            spinner_frame: 0,
        }
    }

    // ─────────────────────────────────────────────────────────
    // Single-flight Task Tracking
    // ─────────────────────────────────────────────────────────

    /// Claim the task slot; `false` if a task is already outstanding
    pub fn begin_task(&mut self, kind: TaskKind) -> bool {
        if self.in_flight.is_some() {
            return false;
        }
        self.in_flight = Some(kind);
        self.spinner_frame = 0;
        true
    }

    pub fn finish_task(&mut self) {
        self.in_flight = None;
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    // ─────────────────────────────────────────────────────────
    // Menu Helpers
    // ─────────────────────────────────────────────────────────

    pub fn selected_menu_item(&self) -> MenuItem {
        MenuItem::ALL[self.menu_index.min(MenuItem::ALL.len() - 1)]
    }

    pub fn menu_up(&mut self) {
        self.menu_index = if self.menu_index == 0 {
            MenuItem::ALL.len() - 1
        } else {
            self.menu_index - 1
        };
    }

    pub fn menu_down(&mut self) {
        self.menu_index = (self.menu_index + 1) % MenuItem::ALL.len();
    }

    // ─────────────────────────────────────────────────────────
    // UI Mode Helpers
    // ─────────────────────────────────────────────────────────

    pub fn open_path_prompt(&mut self) {
        self.path_prompt.clear();
        self.ui_mode = UiMode::PathPrompt;
    }

    pub fn show_config(&mut self, env: Environment, contents: String) {
        self.config_view = Some(ConfigView::new(env, contents));
        self.ui_mode = UiMode::ConfigViewer;
    }

    /// Return to Normal mode from any panel
    pub fn close_panel(&mut self) {
        self.path_prompt.clear();
        self.config_view = None;
        self.ui_mode = UiMode::Normal;
    }

    pub fn request_quit(&mut self) {
        self.phase = AppPhase::Quitting;
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_task_is_single_flight() {
        let mut state = AppState::new();
        assert!(state.begin_task(TaskKind::Probe));
        assert!(state.is_loading());
        assert!(!state.begin_task(TaskKind::Stop));
        assert_eq!(state.in_flight, Some(TaskKind::Probe));

        state.finish_task();
        assert!(!state.is_loading());
        assert!(state.begin_task(TaskKind::Stop));
    }

    #[test]
    fn test_menu_wraps() {
        let mut state = AppState::new();
        state.menu_up();
        assert_eq!(state.selected_menu_item(), MenuItem::Quit);
        state.menu_down();
        assert_eq!(state.selected_menu_item(), MenuItem::StartProduction);
    }

    #[test]
    fn test_menu_item_messages() {
        assert_eq!(
            MenuItem::StartNonProduction.message(),
            Message::StartSession(Environment::NonProduction)
        );
        assert_eq!(MenuItem::UpdateConfig.message(), Message::OpenPathPrompt);
        assert!(!MenuItem::Quit.is_operation());
    }

    #[test]
    fn test_log_capacity_from_settings() {
        let mut settings = Settings::default();
        settings.ui.log_capacity = 2;
        let mut state = AppState::with_settings(settings);
        state.log.info("a");
        state.log.info("b");
        state.log.info("c");
        assert_eq!(state.log.len(), 2);
    }

    #[test]
    fn test_close_panel_resets_prompt_and_viewer() {
        let mut state = AppState::new();
        state.open_path_prompt();
        state.path_prompt.input.push_str("/tmp/x");
        state.close_panel();
        assert_eq!(state.ui_mode, UiMode::Normal);
        assert!(state.path_prompt.input.is_empty());

        state.show_config(Environment::Production, "a\nb".into());
        assert_eq!(state.ui_mode, UiMode::ConfigViewer);
        state.close_panel();
        assert!(state.config_view.is_none());
    }

    #[test]
    fn test_config_view_scroll_clamped() {
        let mut view = ConfigView::new(Environment::Production, "a\nb".into());
        view.scroll_up();
        assert_eq!(view.scroll, 0);
        view.scroll_down();
        view.scroll_down();
        assert_eq!(view.scroll, 1);
    }
}
