//! Actions that modules can return to communicate with the app

/// Actions returned by modules to communicate state changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action needed
    None,

    /// Show a management tab by index
    SelectPanel(i64),

    /// Show profile settings
    OpenProfile,

    /// Tear the dashboard down and mount it again
    Reload,

    /// Ask the store for a collection's documents
    LoadCollection(String),

    /// Show notification in status bar
    Notify(String, NotifyLevel),

    /// Open the help popup
    OpenHelp,

    /// Open the settings popup
    OpenSettings,

    /// Request quit
    Quit,
}

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Warn,
    Error,
}
