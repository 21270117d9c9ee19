//! Framed placeholder standing in for the record image.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub struct ArtworkFrame<'a> {
    pub number: String,
    pub name: &'a str,
    pub accent: Style,
}

impl<'a> ArtworkFrame<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let padding = area.height.saturating_sub(4) / 2;
        let mut lines: Vec<Line> = (0..padding).map(|_| Line::raw("")).collect();
        lines.push(Line::from(Span::styled(
            self.number.clone(),
            self.accent.add_modifier(Modifier::DIM),
        )));
        lines.push(Line::from(Span::styled(
            self.name.to_string(),
            self.accent.add_modifier(Modifier::BOLD),
        )));

        let widget = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(self.accent),
        );
        f.render_widget(widget, area);
    }
}
