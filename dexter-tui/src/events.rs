//! Event types for the TUI event loop.

use crossterm::event::KeyEvent;
use dexter_core::{CatalogError, Record, RecordId};

#[derive(Debug, Clone)]
pub enum TuiEvent {
    Input(KeyEvent),
    Resize { width: u16, height: u16 },
    /// A load of `id` finished; it may no longer be current.
    RecordResolved {
        id: RecordId,
        result: Result<Record, CatalogError>,
    },
}
