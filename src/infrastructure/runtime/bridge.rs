//! Runtime bridge - connects the sync TUI thread with the async Tokio runtime
//!
//! Store reads run on a Tokio runtime owned by a background thread. The TUI
//! sends commands and drains events once per frame, so all application state
//! is only ever touched from the UI thread.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use tokio::runtime::Runtime;

use crate::core::MountId;
use crate::domain::{CollectionNames, Document, SummaryState};
use crate::infrastructure::runtime::worker::run_async_worker;
use crate::store::DocumentStore;

/// Commands sent from the TUI to the async worker
#[derive(Debug, Clone)]
pub enum RuntimeCommand {
    /// Compute the dashboard summary for one mount
    FetchSummary { mount: MountId },
    /// List a collection for a management panel shown during `mount`
    LoadCollection { mount: MountId, collection: String },
    /// Shutdown the worker
    Shutdown,
}

/// Events sent from the async worker to the TUI
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// Summary fetch resolved (successfully or not) for `mount`
    SummaryReady { mount: MountId, state: SummaryState },
    /// Panel collection listed
    CollectionReady {
        mount: MountId,
        collection: String,
        documents: Vec<Document>,
    },
    /// Panel collection could not be read
    CollectionFailed {
        mount: MountId,
        collection: String,
        message: String,
    },
    /// Error occurred
    Error { message: String },
}

/// Bridge between sync TUI thread and async Tokio runtime
pub struct RuntimeBridge {
    cmd_tx: Sender<RuntimeCommand>,
    evt_rx: Receiver<RuntimeEvent>,
}

impl RuntimeBridge {
    /// Start the worker thread reading from `store`
    pub fn new(store: Arc<dyn DocumentStore>, collections: CollectionNames) -> anyhow::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<RuntimeCommand>();
        let (evt_tx, evt_rx) = mpsc::channel::<RuntimeEvent>();

        thread::Builder::new()
            .name("seatdesk-runtime".to_string())
            .spawn(move || {
                let rt = match Runtime::new() {
                    Ok(rt) => rt,
                    Err(err) => {
                        tracing::error!(error = %err, "failed to create Tokio runtime");
                        let _ = evt_tx.send(RuntimeEvent::Error {
                            message: format!("Failed to create Tokio runtime: {err}"),
                        });
                        return;
                    }
                };
                rt.block_on(async {
                    if let Err(err) = run_async_worker(store, collections, cmd_rx, evt_tx.clone()).await {
                        tracing::error!(error = %err, "runtime worker exited");
                        let _ = evt_tx.send(RuntimeEvent::Error {
                            message: format!("Worker exited: {:#}", err),
                        });
                    }
                });
            })?;

        Ok(Self { cmd_tx, evt_rx })
    }

    /// Send a command to the async worker
    pub fn send(&self, cmd: RuntimeCommand) -> anyhow::Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| anyhow::anyhow!("Worker channel closed"))
    }

    /// Poll for events (non-blocking)
    pub fn poll_events(&self) -> Vec<RuntimeEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.evt_rx.try_recv() {
            events.push(evt);
        }
        events
    }
}

impl Drop for RuntimeBridge {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(RuntimeCommand::Shutdown);
    }
}
