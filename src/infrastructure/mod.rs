//! Infrastructure layer - External service integrations
//!
//! This layer contains:
//! - Cloud Firestore REST backend for the document store
//! - Summary aggregation and the Tokio runtime bridge

pub mod firestore;
pub mod runtime;

pub use firestore::{FirestoreConfig, FirestoreStore};
pub use runtime::{RuntimeBridge, RuntimeCommand, RuntimeEvent, SummaryAggregator};
