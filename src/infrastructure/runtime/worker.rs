//! Async worker - runs in the Tokio runtime and serves store reads

use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::domain::CollectionNames;
use crate::infrastructure::runtime::aggregator::SummaryAggregator;
use crate::infrastructure::runtime::bridge::{RuntimeCommand, RuntimeEvent};
use crate::store::DocumentStore;

/// Run the async worker loop until `Shutdown` or the TUI hangs up
pub async fn run_async_worker(
    store: Arc<dyn DocumentStore>,
    collections: CollectionNames,
    cmd_rx: Receiver<RuntimeCommand>,
    evt_tx: Sender<RuntimeEvent>,
) -> Result<()> {
    let aggregator = SummaryAggregator::new(Arc::clone(&store), collections);
    tracing::debug!(backend = store.backend(), "runtime worker started");

    loop {
        loop {
            let cmd = match cmd_rx.try_recv() {
                Ok(cmd) => cmd,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Ok(()),
            };

            match cmd {
                RuntimeCommand::Shutdown => {
                    tracing::debug!("runtime worker shutting down");
                    return Ok(());
                }

                RuntimeCommand::FetchSummary { mount } => {
                    // Reads run off the command loop; the app drops the result
                    // if this mount is gone by the time it lands.
                    let aggregator = aggregator.clone();
                    let evt_tx = evt_tx.clone();
                    tokio::spawn(async move {
                        let state = aggregator.run().await;
                        let _ = evt_tx.send(RuntimeEvent::SummaryReady { mount, state });
                    });
                }

                RuntimeCommand::LoadCollection { mount, collection } => {
                    let store = Arc::clone(&store);
                    let evt_tx = evt_tx.clone();
                    tokio::spawn(async move {
                        let event = match store.list(&collection).await {
                            Ok(documents) => RuntimeEvent::CollectionReady {
                                mount,
                                collection,
                                documents,
                            },
                            Err(err) => {
                                tracing::warn!(%collection, error = %err, "collection load failed");
                                RuntimeEvent::CollectionFailed {
                                    mount,
                                    collection,
                                    message: err.to_string(),
                                }
                            }
                        };
                        let _ = evt_tx.send(event);
                    });
                }
            }
        }

        // Small yield to prevent busy loop
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
