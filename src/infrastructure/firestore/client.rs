use std::future::Future;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::value::decode_document;
use crate::domain::Document;
use crate::store::{DocumentStore, StoreError};

const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";
const PAGE_SIZE: u32 = 300;

/// Connection settings for a Firestore database
#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    pub project_id: String,
    /// Database id, `(default)` unless configured
    pub database: String,
    /// Web API key appended as `key=`
    pub api_key: Option<String>,
    /// REST root, overridable for the local emulator
    pub base_url: Option<String>,
}

impl FirestoreConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            database: "(default)".to_string(),
            api_key: None,
            base_url: None,
        }
    }

    /// URL of a collection's `documents.list` endpoint
    pub fn collection_url(&self, collection: &str) -> String {
        let base = self
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/');
        format!(
            "{}/projects/{}/databases/{}/documents/{}",
            base, self.project_id, self.database, collection
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<Value>,
    #[serde(default)]
    next_page_token: Option<String>,
}

/// Follow `nextPageToken` until a page comes back without one (or with an
/// empty one), decoding every document on the way.
async fn collect_pages<F, Fut>(mut fetch: F) -> Result<Vec<Document>, StoreError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<ListDocumentsResponse, StoreError>>,
{
    let mut documents = Vec::new();
    let mut page_token: Option<String> = None;
    loop {
        let page = fetch(page_token.take()).await?;
        for raw in &page.documents {
            documents.push(decode_document(raw)?);
        }
        match page.next_page_token.filter(|token| !token.is_empty()) {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }
    Ok(documents)
}

/// Firestore REST client implementing `DocumentStore`
pub struct FirestoreStore {
    http: reqwest::Client,
    config: FirestoreConfig,
}

impl FirestoreStore {
    pub fn new(config: FirestoreConfig) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("seatdesk/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    async fn fetch_page(
        &self,
        collection: &str,
        page_token: Option<&str>,
    ) -> Result<ListDocumentsResponse, StoreError> {
        let mut query: Vec<(&str, String)> = vec![("pageSize", PAGE_SIZE.to_string())];
        if let Some(token) = page_token {
            query.push(("pageToken", token.to_string()));
        }
        if let Some(key) = self.config.api_key.as_deref() {
            query.push(("key", key.to_string()));
        }

        let response = self
            .http
            .get(self.config.collection_url(collection))
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<ListDocumentsResponse>().await?)
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let documents = collect_pages(move |token: Option<String>| async move {
            self.fetch_page(collection, token.as_deref()).await
        })
        .await?;
        tracing::debug!(collection, count = documents.len(), "firestore list");
        Ok(documents)
    }

    fn backend(&self) -> &'static str {
        "firestore"
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use serde_json::json;

    use super::*;

    fn page(ids: &[&str], next: Option<&str>) -> ListDocumentsResponse {
        ListDocumentsResponse {
            documents: ids
                .iter()
                .map(|id| {
                    json!({
                        "name": format!("projects/p/databases/(default)/documents/zones/{id}"),
                        "fields": { "name": { "stringValue": id } }
                    })
                })
                .collect(),
            next_page_token: next.map(str::to_string),
        }
    }

    #[test]
    fn test_collection_url() {
        let config = FirestoreConfig::new("seat-booking");
        assert_eq!(
            config.collection_url("seats"),
            "https://firestore.googleapis.com/v1/projects/seat-booking/databases/(default)/documents/seats"
        );
    }

    #[test]
    fn test_collection_url_emulator() {
        let mut config = FirestoreConfig::new("demo");
        config.base_url = Some("http://localhost:8080/v1/".to_string());
        assert_eq!(
            config.collection_url("floors"),
            "http://localhost:8080/v1/projects/demo/databases/(default)/documents/floors"
        );
    }

    #[test]
    fn test_list_response_shape() {
        let raw = r#"{"documents":[{"name":"projects/p/databases/(default)/documents/zones/z1"}],"nextPageToken":"abc"}"#;
        let page: ListDocumentsResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(page.documents.len(), 1);
        assert_eq!(page.next_page_token.as_deref(), Some("abc"));

        let empty: ListDocumentsResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.documents.is_empty());
        assert!(empty.next_page_token.is_none());
    }

    #[tokio::test]
    async fn test_list_follows_page_tokens() {
        let mut pages = VecDeque::from(vec![page(&["z1"], Some("p2")), page(&["z2"], Some(""))]);
        let mut tokens = Vec::new();

        let documents = collect_pages(|token| {
            tokens.push(token);
            let next = pages.pop_front().ok_or_else(|| {
                StoreError::Unavailable("read past the last page".to_string())
            });
            std::future::ready(next)
        })
        .await
        .unwrap();

        let ids: Vec<&str> = documents.iter().map(|doc| doc.id.as_str()).collect();
        assert_eq!(ids, vec!["z1", "z2"]);
        // An empty token ends the listing.
        assert_eq!(tokens, vec![None, Some("p2".to_string())]);
        assert!(pages.is_empty());
    }

    #[tokio::test]
    async fn test_list_stops_on_page_error() {
        let mut calls = 0;
        let err = collect_pages(|_| {
            calls += 1;
            std::future::ready(Err(StoreError::Status {
                status: 403,
                body: "denied".to_string(),
            }))
        })
        .await
        .unwrap_err();

        assert!(matches!(err, StoreError::Status { status: 403, .. }));
        assert_eq!(calls, 1);
    }
}
