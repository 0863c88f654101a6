//! Shared context passed to modules

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::{CollectionNames, Document};

/// What a panel currently knows about its collection
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionSnapshot {
    Loading,
    Loaded(Vec<Document>),
    Failed(String),
}

/// Administrator shown on the profile panel
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub role: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Administrator".to_string(),
            email: String::new(),
            role: "admin".to_string(),
        }
    }
}

/// Shared context available to all modules
#[derive(Debug, Default)]
pub struct Context {
    /// Collection names in use
    pub collections: CollectionNames,

    /// Documents listed per collection, keyed by collection name
    pub snapshots: BTreeMap<String, CollectionSnapshot>,

    /// Signed-in administrator
    pub profile: Profile,

    /// Store backend display name
    pub backend: String,
}

impl Context {
    pub fn new(collections: CollectionNames, profile: Profile, backend: impl Into<String>) -> Self {
        Self {
            collections,
            snapshots: BTreeMap::new(),
            profile,
            backend: backend.into(),
        }
    }

    pub fn snapshot(&self, collection: &str) -> Option<&CollectionSnapshot> {
        self.snapshots.get(collection)
    }

    /// Loaded documents of `collection`, empty unless loaded
    pub fn documents(&self, collection: &str) -> &[Document] {
        match self.snapshots.get(collection) {
            Some(CollectionSnapshot::Loaded(docs)) => docs,
            _ => &[],
        }
    }

    pub fn set_snapshot(&mut self, collection: impl Into<String>, snapshot: CollectionSnapshot) {
        self.snapshots.insert(collection.into(), snapshot);
    }

    /// Drop every listed collection so panels read again on next activation
    pub fn clear_snapshots(&mut self) {
        self.snapshots.clear();
    }
}
