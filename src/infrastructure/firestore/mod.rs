//! Cloud Firestore backend over the REST API

mod client;
mod value;

pub use client::{FirestoreConfig, FirestoreStore};
pub use value::{decode_document, decode_fields, decode_value};
