//! UI Modules
//!
//! Each panel implements the Module trait and handles its own:
//! - Key input processing
//! - Collection loading
//! - Rendering
//!
//! Panels:
//! - floors, zones, seats, admins: read-only collection lists
//! - profile: the signed-in administrator

pub mod collection;
pub mod profile;

use crate::core::Module;
use crate::domain::{CollectionNames, PanelKind};

pub use collection::{Cell, CollectionPanel, Column};
pub use profile::ProfilePanel;

const NAME: &[&str] = &["name", "title", "label"];

/// The five panels the view router chooses between
pub struct PanelSet {
    floors: Box<dyn Module>,
    zones: Box<dyn Module>,
    seats: Box<dyn Module>,
    admins: Box<dyn Module>,
    profile: Box<dyn Module>,
}

impl PanelSet {
    /// Assemble a set from externally supplied panels
    pub fn new(
        floors: Box<dyn Module>,
        zones: Box<dyn Module>,
        seats: Box<dyn Module>,
        admins: Box<dyn Module>,
        profile: Box<dyn Module>,
    ) -> Self {
        Self {
            floors,
            zones,
            seats,
            admins,
            profile,
        }
    }

    /// Default panels over the given collections
    pub fn standard(names: &CollectionNames) -> Self {
        Self::new(
            Box::new(floor_panel(&names.floors)),
            Box::new(zone_panel(&names.zones)),
            Box::new(seat_panel(&names.seats)),
            Box::new(admin_panel(&names.admins)),
            Box::new(ProfilePanel::new()),
        )
    }

    pub fn get(&self, kind: PanelKind) -> &dyn Module {
        match kind {
            PanelKind::Floors => self.floors.as_ref(),
            PanelKind::Zones => self.zones.as_ref(),
            PanelKind::Seats => self.seats.as_ref(),
            PanelKind::Admins => self.admins.as_ref(),
            PanelKind::Profile => self.profile.as_ref(),
        }
    }

    pub fn get_mut(&mut self, kind: PanelKind) -> &mut dyn Module {
        match kind {
            PanelKind::Floors => self.floors.as_mut(),
            PanelKind::Zones => self.zones.as_mut(),
            PanelKind::Seats => self.seats.as_mut(),
            PanelKind::Admins => self.admins.as_mut(),
            PanelKind::Profile => self.profile.as_mut(),
        }
    }
}

pub fn floor_panel(collection: &str) -> CollectionPanel {
    CollectionPanel::new(
        "floors",
        "FLOORS",
        collection,
        vec![
            Column::new("Id", Cell::Id, 18),
            Column::new("Name", Cell::Field(NAME), 24),
            Column::new("Number", Cell::Field(&["number", "level", "floorNumber"]), 8),
        ],
    )
}

pub fn zone_panel(collection: &str) -> CollectionPanel {
    CollectionPanel::new(
        "zones",
        "ZONES",
        collection,
        vec![
            Column::new("Id", Cell::Id, 18),
            Column::new("Name", Cell::Field(NAME), 24),
            Column::new("Floor", Cell::Field(&["floorId", "floor"]), 18),
        ],
    )
}

pub fn seat_panel(collection: &str) -> CollectionPanel {
    CollectionPanel::new(
        "seats",
        "SEATS",
        collection,
        vec![
            Column::new("Id", Cell::Id, 18),
            Column::new("Seat", Cell::Field(&["seatNumber", "name", "label"]), 10),
            Column::new("Zone", Cell::Field(&["zoneId", "zone"]), 18),
            Column::new("Status", Cell::Occupancy, 10),
        ],
    )
}

pub fn admin_panel(collection: &str) -> CollectionPanel {
    CollectionPanel::new(
        "admins",
        "ADMINS",
        collection,
        vec![
            Column::new("Id", Cell::Id, 18),
            Column::new("Name", Cell::Field(&["name", "displayName"]), 24),
            Column::new("Email", Cell::Field(&["email"]), 32),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_a_panel() {
        let set = PanelSet::standard(&CollectionNames::default());
        assert_eq!(set.get(PanelKind::Floors).id(), "floors");
        assert_eq!(set.get(PanelKind::Zones).id(), "zones");
        assert_eq!(set.get(PanelKind::Seats).id(), "seats");
        assert_eq!(set.get(PanelKind::Admins).id(), "admins");
        assert_eq!(set.get(PanelKind::Profile).id(), "profile");
    }
}
