//! Dashboard view selection and panel routing

/// Panels that can fill the content region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    Floors,
    Zones,
    Seats,
    Admins,
    Profile,
}

impl PanelKind {
    /// Management panels in tab-strip order
    pub const TABS: [PanelKind; 4] = [
        PanelKind::Floors,
        PanelKind::Zones,
        PanelKind::Seats,
        PanelKind::Admins,
    ];

    /// Total lookup from a tab index. Unrecognized indices map to the first tab.
    pub fn from_index(index: i64) -> Self {
        match index {
            0 => PanelKind::Floors,
            1 => PanelKind::Zones,
            2 => PanelKind::Seats,
            3 => PanelKind::Admins,
            _ => PanelKind::Floors,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PanelKind::Floors => "Floors",
            PanelKind::Zones => "Zones",
            PanelKind::Seats => "Seats",
            PanelKind::Admins => "Admins",
            PanelKind::Profile => "Profile",
        }
    }

    pub fn shortcut(&self) -> Option<char> {
        match self {
            PanelKind::Floors => Some('1'),
            PanelKind::Zones => Some('2'),
            PanelKind::Seats => Some('3'),
            PanelKind::Admins => Some('4'),
            PanelKind::Profile => None,
        }
    }
}

/// What the content region shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewSelection {
    /// A management panel by tab index (any integer; see `PanelKind::from_index`)
    Panel(i64),
    /// Profile settings, overriding the tabs
    Profile,
}

/// Selection state machine for the content region.
///
/// Starts at the Floors tab. Transitions happen only on user input and there
/// is no terminal state.
#[derive(Debug, Clone)]
pub struct ViewRouter {
    selection: ViewSelection,
}

impl Default for ViewRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewRouter {
    pub fn new() -> Self {
        Self {
            selection: ViewSelection::Panel(0),
        }
    }

    pub fn selection(&self) -> ViewSelection {
        self.selection
    }

    /// Select a management tab, clearing any profile override.
    pub fn select_panel(&mut self, index: i64) {
        self.selection = ViewSelection::Panel(index);
    }

    pub fn open_profile(&mut self) {
        self.selection = ViewSelection::Profile;
    }

    pub fn is_profile(&self) -> bool {
        self.selection == ViewSelection::Profile
    }

    /// Panel to render. Always resolves.
    pub fn active(&self) -> PanelKind {
        match self.selection {
            ViewSelection::Profile => PanelKind::Profile,
            ViewSelection::Panel(index) => PanelKind::from_index(index),
        }
    }

    /// Highlighted tab, if the selection names one of the four tabs.
    pub fn selected_tab(&self) -> Option<usize> {
        match self.selection {
            ViewSelection::Panel(index) if (0..PanelKind::TABS.len() as i64).contains(&index) => {
                Some(index as usize)
            }
            _ => None,
        }
    }

    /// Move to the next tab (wrapping). From the profile this lands on the first tab.
    pub fn next_tab(&mut self) {
        let len = PanelKind::TABS.len();
        let next = self.selected_tab().map(|idx| (idx + 1) % len).unwrap_or(0);
        self.select_panel(next as i64);
    }

    /// Move to the previous tab (wrapping). From the profile this lands on the last tab.
    pub fn previous_tab(&mut self) {
        let len = PanelKind::TABS.len();
        let prev = self
            .selected_tab()
            .map(|idx| (idx + len - 1) % len)
            .unwrap_or(len - 1);
        self.select_panel(prev as i64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_floors() {
        let router = ViewRouter::new();
        assert_eq!(router.active(), PanelKind::Floors);
        assert_eq!(router.selected_tab(), Some(0));
        assert!(!router.is_profile());
    }

    #[test]
    fn test_profile_then_tab_clears_override() {
        let mut router = ViewRouter::new();
        router.select_panel(1);
        assert_eq!(router.active(), PanelKind::Zones);
        router.open_profile();
        assert_eq!(router.active(), PanelKind::Profile);
        assert_eq!(router.selected_tab(), None);
        router.select_panel(2);
        assert_eq!(router.active(), PanelKind::Seats);
        assert!(!router.is_profile());
    }

    #[test]
    fn test_every_index_resolves() {
        let mut router = ViewRouter::new();
        for index in [-1, 4, 5, 99, i64::MIN, i64::MAX] {
            router.select_panel(index);
            assert_eq!(router.active(), PanelKind::Floors);
            assert_eq!(router.selected_tab(), None);
        }
        for index in -50..50 {
            router.select_panel(index);
            let _ = router.active();
        }
    }

    #[test]
    fn test_tab_cycling() {
        let mut router = ViewRouter::new();
        router.previous_tab();
        assert_eq!(router.active(), PanelKind::Admins);
        router.next_tab();
        assert_eq!(router.active(), PanelKind::Floors);
        router.open_profile();
        router.next_tab();
        assert_eq!(router.active(), PanelKind::Floors);
    }
}
