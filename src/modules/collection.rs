//! Read-only list panel over one store collection

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use crate::core::{Action, CollectionSnapshot, Context, Module};
use crate::domain::Document;

/// How a table column gets its cell text
#[derive(Debug, Clone, Copy)]
pub enum Cell {
    Id,
    /// First present field among the keys
    Field(&'static [&'static str]),
    /// Seat occupancy flag
    Occupancy,
}

#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub header: &'static str,
    pub cell: Cell,
    pub width: u16,
}

impl Column {
    pub const fn new(header: &'static str, cell: Cell, width: u16) -> Self {
        Self {
            header,
            cell,
            width,
        }
    }

    fn text(&self, doc: &Document) -> String {
        match self.cell {
            Cell::Id => doc.id.clone(),
            Cell::Field(keys) => doc.display_field(keys).unwrap_or_else(|| "-".to_string()),
            Cell::Occupancy => {
                if doc.is_occupied() {
                    "occupied".to_string()
                } else {
                    "available".to_string()
                }
            }
        }
    }
}

/// A management panel listing the documents of one collection
#[derive(Debug, Clone)]
pub struct CollectionPanel {
    id: &'static str,
    title: &'static str,
    collection: String,
    columns: Vec<Column>,
    selected: usize,
}

impl CollectionPanel {
    pub fn new(
        id: &'static str,
        title: &'static str,
        collection: impl Into<String>,
        columns: Vec<Column>,
    ) -> Self {
        Self {
            id,
            title,
            collection: collection.into(),
            columns,
            selected: 0,
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    fn render_message(&self, frame: &mut Frame, area: Rect, text: &str, color: Color) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(self.title);
        let paragraph = Paragraph::new(Line::styled(format!(" {text}"), Style::default().fg(color)))
            .block(block);
        frame.render_widget(paragraph, area);
    }
}

impl Module for CollectionPanel {
    fn id(&self) -> &'static str {
        self.id
    }

    fn activate(&mut self, ctx: &Context) -> Action {
        match ctx.snapshot(&self.collection) {
            None => Action::LoadCollection(self.collection.clone()),
            Some(_) => Action::None,
        }
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &mut Context) -> Action {
        let len = ctx.documents(&self.collection).len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = self.selected.saturating_add(1);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => self.selected = len.saturating_sub(1),
            _ => return Action::None,
        }
        self.clamp(len);
        Action::None
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &Context) {
        let documents = match ctx.snapshot(&self.collection) {
            None | Some(CollectionSnapshot::Loading) => {
                self.render_message(frame, area, "Loading…", Color::DarkGray);
                return;
            }
            Some(CollectionSnapshot::Failed(message)) => {
                self.render_message(frame, area, &format!("Could not load: {message}"), Color::LightRed);
                return;
            }
            Some(CollectionSnapshot::Loaded(documents)) => documents,
        };
        if documents.is_empty() {
            self.render_message(frame, area, "No documents yet", Color::DarkGray);
            return;
        }

        let header = Row::new(self.columns.iter().map(|c| c.header))
            .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD));
        let rows = documents
            .iter()
            .map(|doc| Row::new(self.columns.iter().map(|c| c.text(doc))));
        let widths: Vec<Constraint> = self
            .columns
            .iter()
            .map(|c| Constraint::Length(c.width))
            .collect();

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(format!("{} ({})", self.title, documents.len())),
            )
            .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan))
            .highlight_symbol("> ");

        let mut state = TableState::default();
        state.select(Some(self.selected.min(documents.len() - 1)));
        frame.render_stateful_widget(table, area, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use serde_json::json;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn panel() -> CollectionPanel {
        CollectionPanel::new("seats", "Seats", "seats", vec![Column::new("Seat", Cell::Id, 10)])
    }

    #[test]
    fn test_activate_requests_collection_once() {
        let mut panel = panel();
        let mut ctx = Context::default();
        assert_eq!(
            panel.activate(&ctx),
            Action::LoadCollection("seats".to_string())
        );
        ctx.set_snapshot("seats", CollectionSnapshot::Loading);
        assert_eq!(panel.activate(&ctx), Action::None);
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut panel = panel();
        let mut ctx = Context::default();
        let docs = (0..3)
            .map(|i| Document::from_value(format!("s{i}"), json!({})))
            .collect();
        ctx.set_snapshot("seats", CollectionSnapshot::Loaded(docs));

        panel.handle_key(key(KeyCode::Char('k')), &mut ctx);
        assert_eq!(panel.selected(), 0);
        for _ in 0..5 {
            panel.handle_key(key(KeyCode::Char('j')), &mut ctx);
        }
        assert_eq!(panel.selected(), 2);
        panel.handle_key(key(KeyCode::Char('g')), &mut ctx);
        assert_eq!(panel.selected(), 0);
    }

    #[test]
    fn test_occupancy_cell() {
        let column = Column::new("Status", Cell::Occupancy, 10);
        let seat = Document::from_value("s1", json!({ "isOccupied": true }));
        assert_eq!(column.text(&seat), "occupied");
        let free = Document::from_value("s2", json!({}));
        assert_eq!(column.text(&free), "available");
    }
}
