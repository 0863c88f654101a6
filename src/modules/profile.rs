//! Profile settings panel

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::core::{Action, Context, Module};

#[derive(Debug, Clone, Default)]
pub struct ProfilePanel;

impl ProfilePanel {
    pub fn new() -> Self {
        Self
    }
}

fn row(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label:<10}"), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

impl Module for ProfilePanel {
    fn id(&self) -> &'static str {
        "profile"
    }

    fn handle_key(&mut self, _key: KeyEvent, _ctx: &mut Context) -> Action {
        Action::None
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &Context) {
        let profile = &ctx.profile;
        let email = if profile.email.trim().is_empty() {
            "(not set)".to_string()
        } else {
            profile.email.clone()
        };
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                " Account",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            row("Name", profile.name.clone()),
            row("Email", email),
            row("Role", profile.role.clone()),
            Line::from(""),
            Line::from(Span::styled(
                " Store",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            row("Backend", ctx.backend.clone()),
            Line::from(""),
            Line::from(vec![
                Span::raw(" Press "),
                Span::styled("1-4", Style::default().fg(Color::Yellow)),
                Span::raw(" to return to a management tab"),
            ]),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title("PROFILE");
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
