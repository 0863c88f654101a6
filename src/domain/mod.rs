//! Seat-booking domain models
//!
//! This module defines the dashboard's value types, independent of the
//! document store backend and of the terminal UI.

mod document;
mod metrics;
mod view;

pub use document::{CollectionNames, Document};
pub use metrics::{OccupancyRate, SummaryMetrics, SummaryState};
pub use view::{PanelKind, ViewRouter, ViewSelection};
