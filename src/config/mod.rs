use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::Profile;
use crate::domain::CollectionNames;

/// Which document store the dashboard reads from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Firestore,
    #[default]
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: Backend,
    /// Firestore project id
    pub project_id: Option<String>,
    /// Firestore database id, `(default)` when unset
    pub database: Option<String>,
    pub api_key: Option<String>,
    /// Override for the Firestore REST root, e.g. a local emulator
    pub base_url: Option<String>,
    /// SQLite file, `<data_dir>/seatdesk.sqlite3` when unset
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Count shown on the header notification badge
    pub notifications: u32,
    pub tick_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notifications: 4,
            tick_ms: 200,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub collections: CollectionNames,

    #[serde(default)]
    pub profile: Profile,

    #[serde(default)]
    pub ui: UiConfig,
}

/// Load from `path`, or from the resolved config location. Missing or
/// malformed files give the defaults.
pub fn load(path: Option<&Path>) -> Config {
    let Some(path) = path.map(Path::to_path_buf).or_else(config_path) else {
        return Config::default();
    };
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    match toml::from_str::<Config>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "ignoring malformed config");
            Config::default()
        }
    }
}

pub fn parse(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(content)
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("SEATDESK_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("seatdesk").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("seatdesk").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "seatdesk", "seatdesk")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("seatdesk"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("seatdesk"));
    }
    directories::ProjectDirs::from("io", "seatdesk", "seatdesk")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn database_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("seatdesk.sqlite3"))
}

pub fn log_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("seatdesk.log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config.store.backend, Backend::Sqlite);
        assert_eq!(config.collections.seats, "seats");
        assert_eq!(config.ui.notifications, 4);
        assert_eq!(config.profile.name, "Administrator");
    }

    #[test]
    fn test_sections() {
        let config = parse(
            r#"
            [store]
            backend = "firestore"
            project_id = "office-seats"

            [collections]
            seats = "desks"

            [profile]
            name = "Dana"
            email = "dana@example.com"

            [ui]
            notifications = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.store.backend, Backend::Firestore);
        assert_eq!(config.store.project_id.as_deref(), Some("office-seats"));
        assert_eq!(config.collections.seats, "desks");
        assert_eq!(config.collections.floors, "floors");
        assert_eq!(config.profile.email, "dana@example.com");
        assert_eq!(config.profile.role, "admin");
        assert_eq!(config.ui.notifications, 0);
        assert_eq!(config.ui.tick_ms, 200);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = load(Some(Path::new("/nonexistent/seatdesk/config.toml")));
        assert_eq!(config.store.backend, Backend::Sqlite);
    }
}
