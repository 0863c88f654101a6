//! Summary aggregation over the document store

use std::sync::Arc;

use crate::domain::{CollectionNames, Document, SummaryMetrics, SummaryState};
use crate::store::{DocumentStore, StoreError};

/// The one failure kind of a summary fetch
#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    #[error("failed to read collection {collection}: {source}")]
    Fetch {
        collection: String,
        #[source]
        source: StoreError,
    },
}

/// Reads the floors, zones and seats collections and derives `SummaryMetrics`.
///
/// The store is injected, so any `DocumentStore` (including a fake) works.
#[derive(Clone)]
pub struct SummaryAggregator {
    store: Arc<dyn DocumentStore>,
    collections: CollectionNames,
}

impl SummaryAggregator {
    pub fn new(store: Arc<dyn DocumentStore>, collections: CollectionNames) -> Self {
        Self { store, collections }
    }

    /// One list per collection, issued concurrently. No writes.
    pub async fn fetch(&self) -> Result<SummaryMetrics, AggregateError> {
        let (floors, zones, seats) = futures::try_join!(
            self.read(&self.collections.floors),
            self.read(&self.collections.zones),
            self.read(&self.collections.seats),
        )?;
        Ok(SummaryMetrics::from_documents(&floors, &zones, &seats))
    }

    /// Fetch and fold the outcome into a `SummaryState`. Failures are logged
    /// and never propagated.
    pub async fn run(&self) -> SummaryState {
        match self.fetch().await {
            Ok(metrics) => {
                tracing::info!(
                    floors = metrics.total_floors,
                    zones = metrics.total_zones,
                    seats = metrics.total_seats,
                    available = metrics.available_seats,
                    occupancy = %metrics.occupancy_rate,
                    "dashboard summary loaded"
                );
                SummaryState::Ready(metrics)
            }
            Err(err) => {
                tracing::error!(error = %err, backend = self.store.backend(), "error fetching dashboard data");
                SummaryState::Failed(err.to_string())
            }
        }
    }

    async fn read(&self, collection: &str) -> Result<Vec<Document>, AggregateError> {
        self.store
            .list(collection)
            .await
            .map_err(|source| AggregateError::Fetch {
                collection: collection.to_string(),
                source,
            })
    }
}
