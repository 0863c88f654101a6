use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::domain::PanelKind;

/// Height of the metric card row
pub const CARD_HEIGHT: u16 = 5;

#[derive(Debug, Clone, Copy)]
pub struct UiAreas {
    pub size: Rect,
    pub header: Rect,
    pub header_title: Rect,
    pub search: Rect,
    pub notifications: Rect,
    pub settings: Rect,
    pub profile: Rect,
    pub page_title: Rect,
    /// Empty while the profile is shown
    pub cards: Rect,
    /// Empty while the profile is shown
    pub tabs: Rect,
    pub content: Rect,
    pub footer: Rect,
    pub status_line: Rect,
    pub command_line: Rect,
}

/// Split the screen. `profile` hides the cards and the tab strip.
pub fn areas(size: Rect, profile: bool) -> UiAreas {
    let (cards, tabs) = if profile { (0, 0) } else { (CARD_HEIGHT, 3) };
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(cards),
            Constraint::Length(tabs),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(size);

    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(22),
            Constraint::Length(28),
            Constraint::Length(7),
            Constraint::Length(12),
            Constraint::Length(14),
        ])
        .split(vertical[0]);

    UiAreas {
        size,
        header: vertical[0],
        header_title: header_chunks[0],
        search: header_chunks[1],
        notifications: header_chunks[2],
        settings: header_chunks[3],
        profile: header_chunks[4],
        page_title: vertical[1],
        cards: vertical[2],
        tabs: vertical[3],
        content: vertical[4],
        footer: vertical[5],
        status_line: vertical[6],
        command_line: vertical[7],
    }
}

/// Card slots, left to right
pub fn card_areas(cards: Rect) -> [Rect; 4] {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(cards);
    [chunks[0], chunks[1], chunks[2], chunks[3]]
}

/// Text drawn for one tab of the strip
pub fn tab_label(kind: PanelKind) -> String {
    match kind.shortcut() {
        Some(key) => format!("{key}:{}", kind.title()),
        None => kind.title().to_string(),
    }
}

/// Width of the divider drawn between tabs
pub const TAB_DIVIDER: &str = " │ ";

/// Clickable cell of every tab, in tab order.
///
/// Mirrors how the tab strip lays its titles out inside a bordered block:
/// one column of padding each side, divider in between.
pub fn tab_hit_areas(tabs: Rect) -> Vec<(usize, Rect)> {
    if tabs.height < 3 || tabs.width < 2 {
        return Vec::new();
    }
    let inner_right = tabs.x + tabs.width - 1;
    let row = tabs.y + 1;
    let divider = TAB_DIVIDER.chars().count() as u16;
    let mut x = tabs.x + 1;
    let mut hits = Vec::new();
    for (idx, kind) in PanelKind::TABS.iter().enumerate() {
        let width = tab_label(*kind).chars().count() as u16 + 2;
        if x >= inner_right {
            break;
        }
        let width = width.min(inner_right - x);
        hits.push((
            idx,
            Rect {
                x,
                y: row,
                width,
                height: 1,
            },
        ));
        x = x.saturating_add(width + divider);
    }
    hits
}

pub fn rect_contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x
        && col < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Tab index under the given cell, if any
pub fn tab_at(areas: &UiAreas, col: u16, row: u16) -> Option<usize> {
    tab_hit_areas(areas.tabs)
        .into_iter()
        .find(|(_, rect)| rect_contains(*rect, col, row))
        .map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Rect {
        Rect::new(0, 0, 120, 40)
    }

    #[test]
    fn test_profile_hides_cards_and_tabs() {
        let areas = areas(screen(), true);
        assert_eq!(areas.cards.height, 0);
        assert_eq!(areas.tabs.height, 0);
        assert!(tab_hit_areas(areas.tabs).is_empty());

        let areas = super::areas(screen(), false);
        assert_eq!(areas.cards.height, CARD_HEIGHT);
        assert_eq!(areas.tabs.height, 3);
    }

    #[test]
    fn test_tab_hits_in_order() {
        let areas = areas(screen(), false);
        let hits = tab_hit_areas(areas.tabs);
        assert_eq!(hits.len(), 4);
        for (idx, rect) in &hits {
            assert_eq!(tab_at(&areas, rect.x, rect.y), Some(*idx));
        }
        let (_, first) = hits[0];
        let (_, second) = hits[1];
        assert!(first.x + first.width < second.x);
        assert_eq!(tab_at(&areas, first.x + first.width + 1, first.y), None);
    }
}
