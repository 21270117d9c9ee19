//! Record panel: loading, failure, or the current record.

use crate::state::App;
use crate::theme::{epoch_accent, record_view_color};
use crate::widgets::{ArtworkFrame, DetailPanel, StatusIndicator};
use dexter_core::{RandomSource, RecordView};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    Frame,
};

/// Every fetch error renders as this one message; details go to the log.
pub const FETCH_FAILED: &str = "Fetch failed";

pub fn render<R: RandomSource>(f: &mut Frame<'_>, app: &App<R>, area: Rect) {
    let view = app.session.view();
    let color = record_view_color(view, &app.theme);
    match view {
        RecordView::Loading { id } => StatusIndicator {
            title: id.padded(),
            status: "Loading…".to_string(),
            style: Style::default().fg(color),
        }
        .render(f, area),
        RecordView::Failed { id, .. } => StatusIndicator {
            title: id.padded(),
            status: FETCH_FAILED.to_string(),
            style: Style::default().fg(color),
        }
        .render(f, area),
        RecordView::Ready(record) => {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(area);

            let accent = Style::default().fg(epoch_accent(app.session.snapshot().epoch, &app.theme));
            let name = record.display_name();
            ArtworkFrame {
                number: record.id.padded(),
                name: &name,
                accent,
            }
            .render(f, chunks[0]);

            DetailPanel {
                title: "Record",
                fields: vec![
                    ("Number", record.id.padded()),
                    ("Name", name.clone()),
                    ("Image", record.image_url.clone()),
                ],
                style: Style::default().fg(app.theme.secondary),
                border_style: Style::default().fg(app.theme.border),
            }
            .render(f, chunks[1]);
        }
    }
}
