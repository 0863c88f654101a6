use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::json;

use super::{DocumentStore, StoreError};
use crate::domain::{CollectionNames, Document};

/// In-process document store
///
/// Can be switched into a failing mode to simulate an unreachable backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<BTreeMap<String, Vec<Document>>>,
    failing: AtomicBool,
    reads: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collection(self, collection: &str, documents: Vec<Document>) -> Self {
        self.replace(collection, documents);
        self
    }

    pub fn replace(&self, collection: &str, documents: Vec<Document>) {
        if let Ok(mut collections) = self.collections.write() {
            collections.insert(collection.to_string(), documents);
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of `list` calls served so far, failed ones included
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// A small building used by `--demo`.
    pub fn demo(names: &CollectionNames) -> Self {
        let floors = (1..=3)
            .map(|n| {
                Document::from_value(
                    format!("floor-{n}"),
                    json!({ "name": format!("Floor {n}"), "number": n }),
                )
            })
            .collect();
        let zones = [("A", 1), ("B", 1), ("C", 2), ("D", 2), ("E", 3)]
            .iter()
            .map(|(zone, floor)| {
                Document::from_value(
                    format!("zone-{}", zone.to_lowercase()),
                    json!({ "name": format!("Zone {zone}"), "floorId": format!("floor-{floor}") }),
                )
            })
            .collect();
        let seats = (0..10)
            .map(|n| {
                Document::from_value(
                    format!("seat-{:02}", n + 1),
                    json!({
                        "seatNumber": format!("S{:02}", n + 1),
                        "zoneId": format!("zone-{}", ["a", "b", "c", "d", "e"][n % 5]),
                        "isOccupied": (n % 5 < 2),
                    }),
                )
            })
            .collect();
        let admins = vec![Document::from_value(
            "admin-1",
            json!({ "name": "Facilities Admin", "email": "facilities@example.com" }),
        )];

        Self::new()
            .with_collection(&names.floors, floors)
            .with_collection(&names.zones, zones)
            .with_collection(&names.seats, seats)
            .with_collection(&names.admins, admins)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!(
                "simulated network error reading {collection}"
            )));
        }
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::Unavailable("memory store poisoned".to_string()))?;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
