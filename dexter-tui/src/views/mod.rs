//! View rendering dispatch.

pub mod record;

use crate::notifications::NotificationLevel;
use crate::state::{help_text, App};
use crate::theme::{lock_color, notification_color};
use dexter_core::RandomSource;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render_view<R: RandomSource>(f: &mut Frame<'_>, app: &App<R>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    f.render_widget(
        Block::default().style(Style::default().bg(app.theme.bg)),
        f.size(),
    );
    render_header(f, app, layout[0]);
    record::render(f, app, layout[1]);
    render_footer(f, app, layout[2]);

    if let Some(modal) = &app.modal {
        render_modal(f, app, &modal.title, &modal.message);
    }
}

fn render_header<R: RandomSource>(f: &mut Frame<'_>, app: &App<R>, area: Rect) {
    let snapshot = app.session.snapshot();
    let lock = if snapshot.locked { "LOCKED" } else { "READY" };
    let line = Line::from(vec![
        Span::styled("DEXTER", Style::default().fg(app.theme.primary)),
        Span::raw(" | "),
        Span::styled(
            format!("Voice: {}", snapshot.locale),
            Style::default().fg(app.theme.tertiary),
        ),
        Span::raw(" | "),
        Span::styled(lock, Style::default().fg(lock_color(snapshot.locked, &app.theme))),
        Span::raw(" | "),
        Span::styled(
            format!("Frame {}", snapshot.epoch),
            Style::default().fg(app.theme.text_dim),
        ),
    ]);
    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(header, area);
}

fn render_footer<R: RandomSource>(f: &mut Frame<'_>, app: &App<R>, area: Rect) {
    let (text, style) = if let Some(note) = app.notifications.last() {
        let label = match note.level {
            NotificationLevel::Info => "INFO",
            NotificationLevel::Warning => "WARN",
            NotificationLevel::Error => "ERROR",
        };
        (
            format!("{}: {}", label, note.message),
            Style::default().fg(notification_color(note.level, &app.theme)),
        )
    } else {
        (help_text().to_string(), Style::default().fg(app.theme.text_dim))
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(footer, area);
}

fn render_modal<R: RandomSource>(f: &mut Frame<'_>, app: &App<R>, title: &str, message: &str) {
    let area = centered(f.size(), 60, 30);
    let modal = Paragraph::new(message.to_string())
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(app.theme.text))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border_focus)),
        );
    f.render_widget(Clear, area);
    f.render_widget(modal, area);
}

/// Rectangle of `percent_x` × `percent_y` centered in `area`.
pub fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
