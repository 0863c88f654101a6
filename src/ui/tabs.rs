//! Management tab strip

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Tabs as RataTabs};
use ratatui::Frame;

use super::layout::{tab_label, TAB_DIVIDER};
use crate::app::App;
use crate::domain::PanelKind;

/// Draw the four management tabs. Nothing is highlighted when the router
/// holds an index outside the strip.
pub fn draw_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    if area.height == 0 {
        return;
    }
    let titles: Vec<Line> = PanelKind::TABS
        .iter()
        .map(|kind| {
            let label = tab_label(*kind);
            match label.split_once(':') {
                Some((key, title)) => Line::from(vec![
                    Span::styled(format!("{key}:"), Style::default().fg(Color::DarkGray)),
                    Span::raw(title.to_string()),
                ]),
                None => Line::from(label),
            }
        })
        .collect();

    let tabs = RataTabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .select(app.router.selected_tab().unwrap_or(usize::MAX))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(TAB_DIVIDER);

    f.render_widget(tabs, area);
}
