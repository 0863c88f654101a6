use chrono::Datelike;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub mod layout;
pub mod tabs;
pub mod widgets;

use crate::app::{App, InputMode, StatusLevel};
use crate::core::Module;
use crate::domain::{PanelKind, SummaryState};
use widgets::MetricCard;

pub const APP_TITLE: &str = "Seat Booking System";
pub const DASHBOARD_TITLE: &str = "Seat Booking Admin Dashboard";
pub const PROFILE_TITLE: &str = "Profile Settings";

pub fn draw(f: &mut Frame, app: &App) {
    let profile = app.router.is_profile();
    let areas = layout::areas(f.size(), profile);

    draw_header(f, &areas, app);
    draw_page_title(f, areas.page_title, profile);
    if !profile {
        draw_cards(f, areas.cards, &app.summary);
        tabs::draw_tab_bar(f, areas.tabs, app);
    }
    app.panels
        .get(app.active_panel())
        .render(f, areas.content, &app.ctx);
    draw_footer(f, areas.footer);
    draw_status_line(f, areas.status_line, app);
    draw_command_line(f, areas.command_line, app);

    if app.help_open {
        draw_help_popup(f, areas.size);
    }
    if app.settings_open {
        draw_settings_popup(f, areas.size, app);
    }
}

fn draw_header(f: &mut Frame, areas: &layout::UiAreas, app: &App) {
    let title = Paragraph::new(Line::from(Span::styled(
        APP_TITLE,
        Style::default()
            .fg(Color::LightCyan)
            .add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Left);
    f.render_widget(title, areas.header_title);

    let searching = app.input_mode == InputMode::Search;
    let search_line = if app.search.is_empty() && !searching {
        Line::from(Span::styled("Search…", Style::default().fg(Color::DarkGray)))
    } else {
        Line::from(vec![
            Span::raw(app.search.as_str()),
            Span::styled(
                if searching { "▏" } else { "" },
                Style::default().fg(Color::Yellow),
            ),
        ])
    };
    let search_border = if searching { Color::Yellow } else { Color::DarkGray };
    let search = Paragraph::new(search_line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(search_border))
            .title("/"),
    );
    f.render_widget(search, areas.search);

    let badge_color = if app.notifications > 0 {
        Color::LightRed
    } else {
        Color::DarkGray
    };
    let badge = Paragraph::new(Line::from(Span::styled(
        format!("🔔{}", app.notifications),
        Style::default().fg(badge_color),
    )))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center);
    f.render_widget(badge, areas.notifications);

    let settings_style = if app.settings_open {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };
    let settings = Paragraph::new(Line::from(vec![
        Span::styled("s ", Style::default().fg(Color::DarkGray)),
        Span::styled("Settings", settings_style),
    ]))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center);
    f.render_widget(settings, areas.settings);

    let profile_style = if app.router.is_profile() {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let profile = Paragraph::new(Line::from(vec![
        Span::styled("p ", Style::default().fg(Color::DarkGray)),
        Span::styled(initials(&app.ctx.profile.name), profile_style),
    ]))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center);
    f.render_widget(profile, areas.profile);
}

fn draw_page_title(f: &mut Frame, area: Rect, profile: bool) {
    let text = page_title(profile);
    let paragraph = Paragraph::new(Line::from(Span::styled(
        format!(" {text}"),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )));
    f.render_widget(paragraph, area);
}

pub fn page_title(profile: bool) -> &'static str {
    if profile {
        PROFILE_TITLE
    } else {
        DASHBOARD_TITLE
    }
}

fn draw_cards(f: &mut Frame, area: Rect, summary: &SummaryState) {
    if area.height == 0 {
        return;
    }
    if summary.is_pending() {
        let spinner = Paragraph::new(Line::from(Span::styled(
            "Loading summary…",
            Style::default().fg(Color::DarkGray),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .alignment(Alignment::Center);
        f.render_widget(spinner, area);
        return;
    }

    let slots = layout::card_areas(area);
    for (card, slot) in metric_cards(summary).into_iter().zip(slots) {
        f.render_widget(card, slot);
    }
}

/// The four summary cards. Failed fetches show all-zero values.
pub fn metric_cards(summary: &SummaryState) -> [MetricCard<'static>; 4] {
    let metrics = summary.metrics();
    [
        MetricCard::new("Floors", metrics.total_floors.to_string())
            .caption("Total floors in the building"),
        MetricCard::new("Zones", metrics.total_zones.to_string())
            .caption("Total zones across all floors"),
        MetricCard::new("Seats", metrics.total_seats.to_string())
            .caption(format!("{} seats available", metrics.available_seats)),
        MetricCard::new("Occupancy", metrics.occupancy_rate.to_string())
            .caption("Current occupancy rate")
            .accent(Color::LightGreen),
    ]
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let year = chrono::Local::now().year();
    let paragraph = Paragraph::new(Line::from(Span::styled(
        footer_text(year),
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

pub fn footer_text(year: i32) -> String {
    format!("© {year} {DASHBOARD_TITLE}")
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let view = match app.active_panel() {
        PanelKind::Profile => "Profile".to_string(),
        kind => match app.router.selected_tab() {
            Some(_) => kind.title().to_string(),
            None => format!("{} (default)", kind.title()),
        },
    };
    let summary = match &app.summary {
        SummaryState::Pending => "loading",
        SummaryState::Ready(_) => "loaded",
        SummaryState::Failed(_) => "loaded",
    };
    let mount = app
        .live_mount()
        .map(|mount| mount.to_string())
        .unwrap_or_else(|| "--".to_string());
    let line = Line::from(vec![
        Span::styled("Store ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", app.ctx.backend)),
        Span::styled("View ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", view)),
        Span::styled("Summary ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", summary)),
        Span::styled("Mount ", Style::default().fg(Color::DarkGray)),
        Span::raw(mount),
    ]);

    let paragraph = Paragraph::new(line)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Left);

    f.render_widget(paragraph, area);
}

/// Get command hint for autocompletion
fn command_hint(input: &str) -> Option<&'static str> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }

    let commands = [
        ("floors", "Show floors"),
        ("zones", "Show zones"),
        ("seats", "Show seats"),
        ("admins", "Show admins"),
        ("profile", "Profile settings"),
        ("tab", "Select tab by index: tab <n>"),
        ("reload", "Reload the dashboard"),
        ("settings", "Open settings"),
        ("help", "Show help"),
        ("quit", "Quit"),
    ];

    for (cmd, desc) in commands {
        if cmd.starts_with(&input) {
            return Some(desc);
        }
    }
    None
}

fn draw_command_line(f: &mut Frame, area: Rect, app: &App) {
    let content = match app.input_mode {
        InputMode::Command => {
            let hint = command_hint(&app.command.input);
            let hint_text = hint.unwrap_or("floors | zones | seats | admins | profile | reload");
            Line::from(vec![
                Span::styled(": ", Style::default().fg(Color::Yellow)),
                Span::raw(&app.command.input),
                Span::styled(
                    format!("  {}", hint_text),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        }
        InputMode::Search => Line::from(Span::styled(
            "typing in search (Enter/Esc to leave)",
            Style::default().fg(Color::DarkGray),
        )),
        InputMode::Normal => {
            if let Some((text, level)) = app.status_text() {
                let color = match level {
                    StatusLevel::Info => Color::LightGreen,
                    StatusLevel::Warn => Color::LightYellow,
                    StatusLevel::Error => Color::LightRed,
                };
                Line::from(vec![
                    Span::styled("msg: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(text, Style::default().fg(color)),
                ])
            } else {
                action_hints()
            }
        }
    };

    let paragraph = Paragraph::new(content).style(Style::default().fg(Color::White));
    f.render_widget(paragraph, area);
}

fn action_hints() -> Line<'static> {
    let key = Style::default().fg(Color::Yellow);
    let text = Style::default().fg(Color::DarkGray);
    Line::from(vec![
        Span::styled("1-4", key),
        Span::styled(" tabs  ", text),
        Span::styled("p", key),
        Span::styled(" profile  ", text),
        Span::styled("r", key),
        Span::styled(" reload  ", text),
        Span::styled(":", key),
        Span::styled(" command  ", text),
        Span::styled("?", key),
        Span::styled(" help  ", text),
        Span::styled("q", key),
        Span::styled(" quit", text),
    ])
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(64, 64, area);
    f.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from("Navigation"),
        Line::from("  1-4        Floors / Zones / Seats / Admins"),
        Line::from("  [ / ]      Prev/Next tab"),
        Line::from("  p          Profile settings"),
        Line::from("  j / k      Move selection (vim)"),
        Line::from("  g / G      Top / bottom"),
        Line::from("  Mouse      Click a tab or the profile"),
        Line::from(""),
        Line::from("Actions"),
        Line::from("  /          Search box"),
        Line::from("  :          Command"),
        Line::from("  r          Reload"),
        Line::from("  s          Settings"),
        Line::from("  ?          Toggle help"),
        Line::from("  q          Quit"),
        Line::from(""),
        Line::from("Commands"),
        Line::from("  :floors :zones :seats :admins :profile"),
        Line::from("  :tab <n> :reload :settings :quit"),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Help").borders(Borders::ALL))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, popup_area);
}

fn draw_settings_popup(f: &mut Frame, area: Rect, app: &App) {
    let popup_area = centered_rect(70, 50, area);
    f.render_widget(Clear, popup_area);

    let config_path = app
        .config_path
        .clone()
        .unwrap_or_else(|| "(unknown)".to_string());
    let names = &app.ctx.collections;

    let lines = vec![
        Line::from(Span::styled(
            "Settings",
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Config:   {}", config_path)),
        Line::from(format!("Store:    {}", app.ctx.backend)),
        Line::from(""),
        Line::from(Span::styled(
            "Collections",
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("  floors  {}", names.floors)),
        Line::from(format!("  zones   {}", names.zones)),
        Line::from(format!("  seats   {}", names.seats)),
        Line::from(format!("  admins  {}", names.admins)),
        Line::from(""),
        Line::from("Keys: Esc close"),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Settings").borders(Borders::ALL))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, popup_area);
}

fn initials(name: &str) -> String {
    let initials: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    if initials.is_empty() {
        "Me".to_string()
    } else {
        initials
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titles() {
        assert_eq!(page_title(false), "Seat Booking Admin Dashboard");
        assert_eq!(page_title(true), "Profile Settings");
        assert_eq!(footer_text(2024), "© 2024 Seat Booking Admin Dashboard");
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("dana scully"), "DS");
        assert_eq!(initials("Administrator"), "A");
        assert_eq!(initials("  "), "Me");
    }

    #[test]
    fn test_command_hint() {
        assert_eq!(command_hint("sea"), Some("Show seats"));
        assert_eq!(command_hint(""), None);
        assert_eq!(command_hint("book"), None);
    }
}
