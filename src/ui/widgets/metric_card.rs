//! Bordered card showing one summary metric

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Title, large value and a one-line caption
pub struct MetricCard<'a> {
    title: &'a str,
    value: String,
    caption: String,
    accent: Color,
}

impl<'a> MetricCard<'a> {
    pub fn new(title: &'a str, value: impl Into<String>) -> Self {
        Self {
            title,
            value: value.into(),
            caption: String::new(),
            accent: Color::Cyan,
        }
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    pub fn accent(mut self, accent: Color) -> Self {
        self.accent = accent;
        self
    }
}

impl<'a> Widget for MetricCard<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 3 {
            return;
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(Color::Gray),
            ));
        let lines = vec![
            Line::from(Span::styled(
                format!(" {}", self.value),
                Style::default()
                    .fg(self.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(" {}", self.caption),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        Paragraph::new(lines).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.get(x, y).symbol().to_string())
            .collect()
    }

    #[test]
    fn test_renders_value_and_caption() {
        let area = Rect::new(0, 0, 36, 4);
        let mut buf = Buffer::empty(area);
        MetricCard::new("Occupancy", "40%")
            .caption("Current occupancy rate")
            .render(area, &mut buf);
        assert!(row_text(&buf, 0).contains("Occupancy"));
        assert!(row_text(&buf, 1).contains("40%"));
        assert!(row_text(&buf, 2).contains("Current occupancy rate"));
    }

    #[test]
    fn test_too_small_draws_nothing() {
        let area = Rect::new(0, 0, 3, 2);
        let mut buf = Buffer::empty(area);
        MetricCard::new("Seats", "10").render(area, &mut buf);
        assert_eq!(row_text(&buf, 0).trim(), "");
    }
}
