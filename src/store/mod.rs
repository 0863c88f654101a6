//! Document store abstraction and local backends
//!
//! The dashboard only ever lists whole collections. Backends:
//! - `SqliteDocumentStore`: local rusqlite file
//! - `MemoryStore`: in-process, for demo mode and tests
//! - `FirestoreStore` (in `infrastructure::firestore`): remote REST API

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteDocumentStore;

use async_trait::async_trait;

use crate::domain::Document;

/// Failures reading from a document store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed document {id}: {reason}")]
    Decode { id: String, reason: String },

    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store task aborted: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Read access to a collection-oriented document store
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// List every document in `collection`. No filters, no ordering guarantees.
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Short backend name for the settings popup and logs
    fn backend(&self) -> &'static str;
}
