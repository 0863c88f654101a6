//! Dashboard summary metrics

use std::fmt;

use super::Document;

/// Whole-number percentage of seats currently occupied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct OccupancyRate(u8);

impl OccupancyRate {
    /// Occupied share of `total`, rounded half up. Zero seats is 0%.
    pub fn from_counts(occupied: usize, total: usize) -> Self {
        if total == 0 {
            return Self(0);
        }
        let occupied = occupied.min(total) as u128;
        let total = total as u128;
        // round(occupied / total * 100) == floor((200 * occupied + total) / (2 * total))
        let percent = (200 * occupied + total) / (2 * total);
        Self(percent as u8)
    }

    pub fn percent(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for OccupancyRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Summary shown on the metric cards
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryMetrics {
    pub total_floors: usize,
    pub total_zones: usize,
    pub total_seats: usize,
    /// Seats not flagged occupied, never more than `total_seats`
    pub available_seats: usize,
    pub occupancy_rate: OccupancyRate,
}

impl SummaryMetrics {
    /// Derive the metrics from the full contents of the three collections.
    pub fn from_documents(floors: &[Document], zones: &[Document], seats: &[Document]) -> Self {
        let total_seats = seats.len();
        let available_seats = seats.iter().filter(|seat| !seat.is_occupied()).count();
        Self {
            total_floors: floors.len(),
            total_zones: zones.len(),
            total_seats,
            available_seats,
            occupancy_rate: OccupancyRate::from_counts(total_seats - available_seats, total_seats),
        }
    }

    pub fn occupied_seats(&self) -> usize {
        self.total_seats.saturating_sub(self.available_seats)
    }
}

/// Outcome of one summary fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryState {
    /// Fetch outstanding
    Pending,
    /// Fetch resolved
    Ready(SummaryMetrics),
    /// Fetch failed; the message is for logs and diagnostics only
    Failed(String),
}

impl SummaryState {
    pub fn is_pending(&self) -> bool {
        matches!(self, SummaryState::Pending)
    }

    /// Metrics to render. Failed fetches keep the all-zero defaults.
    pub fn metrics(&self) -> SummaryMetrics {
        match self {
            SummaryState::Ready(metrics) => metrics.clone(),
            SummaryState::Pending | SummaryState::Failed(_) => SummaryMetrics::default(),
        }
    }
}

impl Default for SummaryState {
    fn default() -> Self {
        SummaryState::Pending
    }
}
