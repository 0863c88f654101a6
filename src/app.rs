use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::{
    parse_command, Action, CollectionSnapshot, Command, Context, MountId, Mounts, NotifyLevel,
};
use crate::domain::{Document, PanelKind, SummaryState, ViewRouter};
use crate::modules::PanelSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Command,
    /// Typing into the header search box
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warn,
    Error,
}

impl From<NotifyLevel> for StatusLevel {
    fn from(level: NotifyLevel) -> Self {
        match level {
            NotifyLevel::Info => StatusLevel::Info,
            NotifyLevel::Warn => StatusLevel::Warn,
            NotifyLevel::Error => StatusLevel::Error,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct CommandBar {
    pub input: String,
    pub last: Option<String>,
}

/// A panel collection read issued during one mount
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionRequest {
    pub mount: MountId,
    pub collection: String,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub since: Instant,
}

/// Dashboard screen state. Owned and mutated by the UI thread only.
pub struct App {
    /// Shared context for panels
    pub ctx: Context,
    /// Which panel fills the content region
    pub router: ViewRouter,
    pub panels: PanelSet,
    /// Metric cards of the live mount
    pub summary: SummaryState,
    pub input_mode: InputMode,
    pub command: CommandBar,
    /// Header search text. Never filters anything.
    pub search: String,
    /// Header notification badge
    pub notifications: u32,
    /// Where the config was looked up, for the settings popup
    pub config_path: Option<String>,
    pub status: Option<StatusMessage>,
    pub settings_open: bool,
    pub help_open: bool,
    pub should_quit: bool,
    mounts: Mounts,
    pending_summary: Option<MountId>,
    pending_collections: Vec<CollectionRequest>,
}

impl App {
    pub fn new(ctx: Context) -> Self {
        let panels = PanelSet::standard(&ctx.collections);
        Self {
            ctx,
            router: ViewRouter::new(),
            panels,
            summary: SummaryState::Pending,
            input_mode: InputMode::Normal,
            command: CommandBar::default(),
            search: String::new(),
            notifications: 4,
            config_path: None,
            status: None,
            settings_open: false,
            help_open: false,
            should_quit: false,
            mounts: Mounts::new(),
            pending_summary: None,
            pending_collections: Vec::new(),
        }
    }

    pub fn with_notifications(mut self, count: u32) -> Self {
        self.notifications = count;
        self
    }

    pub fn with_config_path(mut self, path: Option<String>) -> Self {
        self.config_path = path;
        self
    }

    // ---- mount lifecycle ----

    /// Show the dashboard: start a new mount and request its one summary fetch.
    pub fn mount_dashboard(&mut self) -> MountId {
        let mount = self.mounts.mount();
        self.summary = SummaryState::Pending;
        self.pending_summary = Some(mount);
        tracing::info!(%mount, "dashboard mounted");
        self.activate_current();
        mount
    }

    /// Tear the dashboard down. Results still in flight are dropped on arrival.
    pub fn unmount_dashboard(&mut self) {
        if let Some(mount) = self.mounts.unmount() {
            tracing::debug!(%mount, "dashboard unmounted");
        }
        self.pending_summary = None;
        self.pending_collections.clear();
    }

    /// Unmount and mount again, reading everything afresh.
    pub fn reload(&mut self) {
        self.unmount_dashboard();
        self.ctx.clear_snapshots();
        self.mount_dashboard();
        self.set_status("Reloading…", StatusLevel::Info);
    }

    pub fn live_mount(&self) -> Option<MountId> {
        self.mounts.live()
    }

    /// Record a summary result. Returns false when `mount` is no longer live.
    pub fn apply_summary(&mut self, mount: MountId, state: SummaryState) -> bool {
        if !self.mounts.is_live(mount) {
            tracing::debug!(%mount, "discarding summary for stale mount");
            return false;
        }
        self.summary = state;
        true
    }

    pub fn take_summary_request(&mut self) -> Option<MountId> {
        self.pending_summary.take()
    }

    pub fn take_collection_requests(&mut self) -> Vec<CollectionRequest> {
        std::mem::take(&mut self.pending_collections)
    }

    // ---- panel collections ----

    /// Record listed documents. Ignored unless `mount` is live and the
    /// collection is awaited.
    pub fn apply_collection(
        &mut self,
        mount: MountId,
        collection: String,
        documents: Vec<Document>,
    ) {
        if !self.awaits_collection(mount, &collection) {
            return;
        }
        self.ctx
            .set_snapshot(collection, CollectionSnapshot::Loaded(documents));
    }

    pub fn apply_collection_failed(
        &mut self,
        mount: MountId,
        collection: String,
        message: String,
    ) {
        if !self.awaits_collection(mount, &collection) {
            return;
        }
        tracing::warn!(%collection, error = %message, "panel collection failed");
        self.set_status(
            format!("Could not load {collection}: {message}"),
            StatusLevel::Warn,
        );
        self.ctx
            .set_snapshot(collection, CollectionSnapshot::Failed(message));
    }

    fn awaits_collection(&self, mount: MountId, collection: &str) -> bool {
        if !self.mounts.is_live(mount) {
            tracing::debug!(%mount, %collection, "discarding collection for stale mount");
            return false;
        }
        self.ctx.snapshot(collection) == Some(&CollectionSnapshot::Loading)
    }

    fn request_collection(&mut self, collection: String) {
        let Some(mount) = self.mounts.live() else {
            return;
        };
        if self.ctx.snapshot(&collection).is_some() {
            return;
        }
        self.ctx
            .set_snapshot(collection.clone(), CollectionSnapshot::Loading);
        self.pending_collections
            .push(CollectionRequest { mount, collection });
    }

    // ---- view routing ----

    pub fn active_panel(&self) -> PanelKind {
        self.router.active()
    }

    pub fn select_panel(&mut self, index: i64) {
        self.router.select_panel(index);
        self.activate_current();
    }

    pub fn open_profile(&mut self) {
        self.router.open_profile();
        self.activate_current();
    }

    fn activate_current(&mut self) {
        let kind = self.router.active();
        let action = self.panels.get_mut(kind).activate(&self.ctx);
        self.apply_action(action);
    }

    // ---- status line ----

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    pub fn status_text(&self) -> Option<(&str, StatusLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }

    pub fn on_tick(&mut self) {
        if let Some(status) = self.status.as_ref() {
            if status.since.elapsed() > Duration::from_secs(3) {
                self.status = None;
            }
        }
    }

    // ---- command bar ----

    pub fn enter_command(&mut self) {
        self.input_mode = InputMode::Command;
        self.command.input.clear();
    }

    pub fn exit_command(&mut self) {
        self.input_mode = InputMode::Normal;
        self.command.input.clear();
    }

    pub fn apply_command(&mut self) {
        let input = self.command.input.trim().to_string();
        self.exit_command();
        if input.is_empty() {
            return;
        }
        let cmd = parse_command(&input);
        self.command.last = Some(input);
        let action = self.execute_command(&cmd);
        self.apply_action(action);
    }

    /// Execute a parsed command
    pub fn execute_command(&mut self, cmd: &Command) -> Action {
        match cmd {
            Command::Floors => Action::SelectPanel(0),
            Command::Zones => Action::SelectPanel(1),
            Command::Seats => Action::SelectPanel(2),
            Command::Admins => Action::SelectPanel(3),
            Command::Tab(index) => Action::SelectPanel(*index),
            Command::Profile => Action::OpenProfile,
            Command::Reload => Action::Reload,
            Command::Settings => Action::OpenSettings,
            Command::Help => Action::OpenHelp,
            Command::Quit => Action::Quit,
            Command::Unknown(s) => Action::Notify(format!("Unknown command: {}", s), NotifyLevel::Warn),
        }
    }

    /// Apply an action returned by a command or panel
    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::SelectPanel(index) => self.select_panel(index),
            Action::OpenProfile => self.open_profile(),
            Action::Reload => self.reload(),
            Action::LoadCollection(collection) => self.request_collection(collection),
            Action::Notify(msg, level) => self.set_status(msg, level.into()),
            Action::OpenHelp => self.help_open = true,
            Action::OpenSettings => self.settings_open = true,
            Action::Quit => self.should_quit = true,
        }
    }

    // ---- keyboard ----

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.help_open {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
                self.help_open = false;
            }
            return;
        }

        if self.settings_open {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('s') | KeyCode::Char('q')) {
                self.settings_open = false;
            }
            return;
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Command => self.handle_command_key(key),
            InputMode::Search => self.handle_search_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Char('?') => self.help_open = true,
            KeyCode::Char(':') => self.enter_command(),
            KeyCode::Char('/') => self.input_mode = InputMode::Search,
            KeyCode::Char('s') => self.settings_open = true,
            KeyCode::Char('r') => self.reload(),
            KeyCode::Char('p') => self.open_profile(),
            KeyCode::Char(ch @ '1'..='4') => self.select_panel(i64::from(ch as u8 - b'1')),
            KeyCode::Char('[') => {
                self.router.previous_tab();
                self.activate_current();
            }
            KeyCode::Char(']') | KeyCode::Tab => {
                self.router.next_tab();
                self.activate_current();
            }
            _ => {
                let kind = self.router.active();
                let action = self.panels.get_mut(kind).handle_key(key, &mut self.ctx);
                self.apply_action(action);
            }
        }
    }

    fn handle_command_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.exit_command(),
            KeyCode::Enter => self.apply_command(),
            KeyCode::Backspace => {
                self.command.input.pop();
            }
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return;
                }
                self.command.input.push(ch);
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.input_mode = InputMode::Normal,
            KeyCode::Backspace => {
                self.search.pop();
            }
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return;
                }
                self.search.push(ch);
            }
            _ => {}
        }
    }
}
