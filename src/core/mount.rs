//! Dashboard mount identities

use std::fmt;

/// Identity of one mount of the dashboard screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MountId(u64);

impl fmt::Display for MountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mount#{}", self.0)
    }
}

/// Tracks which mount, if any, is live.
///
/// Results tagged with anything but the live mount are stale.
#[derive(Debug, Default)]
pub struct Mounts {
    next: u64,
    live: Option<MountId>,
}

impl Mounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new mount, retiring the previous one.
    pub fn mount(&mut self) -> MountId {
        self.next += 1;
        let id = MountId(self.next);
        self.live = Some(id);
        id
    }

    pub fn unmount(&mut self) -> Option<MountId> {
        self.live.take()
    }

    pub fn live(&self) -> Option<MountId> {
        self.live
    }

    pub fn is_live(&self, id: MountId) -> bool {
        self.live == Some(id)
    }
}
