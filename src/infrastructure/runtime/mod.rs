//! Runtime infrastructure - Tokio runtime bridge for async store reads

mod aggregator;
mod bridge;
mod worker;

pub use aggregator::{AggregateError, SummaryAggregator};
pub use bridge::{RuntimeBridge, RuntimeCommand, RuntimeEvent};
pub use worker::run_async_worker;
