use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use async_trait::async_trait;
use rusqlite::{params, Connection};
use serde_json::{Map, Value};

use super::{DocumentStore, StoreError};
use crate::domain::Document;

/// SQLite-backed document store
///
/// Documents are kept as JSON text keyed by `(collection, id)`.
#[derive(Debug, Clone)]
pub struct SqliteDocumentStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteDocumentStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).with_context(|| format!("open db {}", path.display()))?;
        Self::from_connection(conn)
    }

    pub fn in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory().context("open in-memory db")?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init()?;
        Ok(store)
    }

    pub fn put(&self, collection: &str, document: &Document) -> Result<()> {
        let data = serde_json::to_string(&document.fields)?;
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO documents(collection, id, data) VALUES (?1, ?2, ?3)
             ON CONFLICT(collection, id) DO UPDATE SET data=excluded.data",
            params![collection, document.id, data],
        )?;
        Ok(())
    }

    /// Import a fixture of the form `{ "<collection>": [ { "id": .., ... }, .. ] }`.
    ///
    /// Entries without an `id` get one from their position. Returns the number
    /// of documents written.
    pub fn import_fixture(&self, fixture: &Value) -> Result<usize> {
        let Some(collections) = fixture.as_object() else {
            anyhow::bail!("fixture must be a JSON object of collections");
        };
        let mut written = 0;
        for (collection, entries) in collections {
            let Some(entries) = entries.as_array() else {
                anyhow::bail!("collection {collection} must be an array");
            };
            for (idx, entry) in entries.iter().enumerate() {
                let mut fields = entry.as_object().cloned().unwrap_or_default();
                let id = match fields.remove("id") {
                    Some(Value::String(id)) => id,
                    Some(other) => other.to_string(),
                    None => format!("{collection}-{idx}"),
                };
                self.put(collection, &Document::new(id, fields))?;
                written += 1;
            }
        }
        Ok(written)
    }

    fn load_collection(conn: &Connection, collection: &str) -> Result<Vec<Document>, StoreError> {
        let mut stmt =
            conn.prepare("SELECT id, data FROM documents WHERE collection = ?1 ORDER BY id")?;
        let mut rows = stmt.query(params![collection])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let id: String = row.get(0)?;
            let data: String = row.get(1)?;
            let fields: Map<String, Value> =
                serde_json::from_str(&data).map_err(|err| StoreError::Decode {
                    id: id.clone(),
                    reason: err.to_string(),
                })?;
            out.push(Document::new(id, fields));
        }
        Ok(out)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("sqlite connection poisoned"))
    }

    fn init(&self) -> Result<()> {
        self.lock()?.execute_batch(
            "CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                id         TEXT NOT NULL,
                data       TEXT NOT NULL,
                PRIMARY KEY (collection, id)
            );",
        )?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let conn = Arc::clone(&self.conn);
        let collection = collection.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|_| StoreError::Unavailable("sqlite connection poisoned".to_string()))?;
            Self::load_collection(&conn, &collection)
        })
        .await?
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_put_and_list() {
        let store = SqliteDocumentStore::in_memory().unwrap();
        store
            .put("seats", &Document::from_value("s2", json!({ "isOccupied": true })))
            .unwrap();
        store
            .put("seats", &Document::from_value("s1", json!({ "isOccupied": false })))
            .unwrap();
        store
            .put("floors", &Document::from_value("f1", json!({ "name": "Ground" })))
            .unwrap();

        let seats = store.list("seats").await.unwrap();
        assert_eq!(seats.len(), 2);
        assert_eq!(seats[0].id, "s1");
        assert!(seats[1].is_occupied());

        assert!(store.list("zones").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upsert_replaces_by_id() {
        let store = SqliteDocumentStore::in_memory().unwrap();
        store
            .put("seats", &Document::from_value("s1", json!({ "isOccupied": false })))
            .unwrap();
        store
            .put("seats", &Document::from_value("s1", json!({ "isOccupied": true })))
            .unwrap();
        let seats = store.list("seats").await.unwrap();
        assert_eq!(seats.len(), 1);
        assert!(seats[0].is_occupied());
        assert!(store.list("zones").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_import_fixture() {
        let store = SqliteDocumentStore::in_memory().unwrap();
        let fixture = json!({
            "floors": [{ "id": "f1", "name": "Ground" }, { "name": "First" }],
            "seats": [{ "id": 7, "isOccupied": true }]
        });
        assert_eq!(store.import_fixture(&fixture).unwrap(), 3);

        let floors = store.list("floors").await.unwrap();
        let ids: Vec<&str> = floors.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["f1", "floors-1"]);
        assert!(!floors[0].fields.contains_key("id"));

        let seats = store.list("seats").await.unwrap();
        assert_eq!(seats[0].id, "7");
    }

    #[test]
    fn test_import_rejects_non_object() {
        let store = SqliteDocumentStore::in_memory().unwrap();
        assert!(store.import_fixture(&json!([1, 2])).is_err());
        assert!(store.import_fixture(&json!({ "seats": 3 })).is_err());
    }
}
