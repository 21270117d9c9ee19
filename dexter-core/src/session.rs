//! Browsing session: the view-facing state.
//!
//! The session owns the navigation controller, the record cache and the
//! announcer. Views read [`BrowsingSession::view`] and
//! [`BrowsingSession::snapshot`]; all mutation goes through the four actions.
//! Loading is driven by the caller: after an accepted action it spawns
//! [`BrowsingSession::resolve_current`] and feeds the outcome back through
//! [`BrowsingSession::apply_resolution`], which drops anything resolved for an
//! identifier that is no longer current.

use crate::cache::RecordCache;
use crate::error::{CatalogError, NavError};
use crate::locale::Locale;
use crate::nav::{NavAction, NavSnapshot, NavigationController};
use crate::random::RandomSource;
use crate::record::{Record, RecordId};
use crate::speech::Announcer;
use std::future::Future;

/// What the record panel shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordView {
    Loading { id: RecordId },
    Failed { id: RecordId, message: String },
    Ready(Record),
}

impl RecordView {
    pub fn id(&self) -> RecordId {
        match self {
            RecordView::Loading { id } | RecordView::Failed { id, .. } => *id,
            RecordView::Ready(record) => record.id,
        }
    }

    pub fn record(&self) -> Option<&Record> {
        match self {
            RecordView::Ready(record) => Some(record),
            _ => None,
        }
    }
}

pub struct BrowsingSession<R: RandomSource> {
    nav: NavigationController<R>,
    cache: RecordCache,
    announcer: Announcer,
    view: RecordView,
}

impl<R: RandomSource> BrowsingSession<R> {
    pub fn new(nav: NavigationController<R>, cache: RecordCache, announcer: Announcer) -> Self {
        let view = RecordView::Loading { id: nav.current() };
        Self {
            nav,
            cache,
            announcer,
            view,
        }
    }

    pub fn view(&self) -> &RecordView {
        &self.view
    }

    pub fn snapshot(&self) -> NavSnapshot {
        self.nav.snapshot()
    }

    pub fn nav(&self) -> &NavigationController<R> {
        &self.nav
    }

    pub fn announcer(&self) -> &Announcer {
        &self.announcer
    }

    pub fn current(&self) -> RecordId {
        self.nav.current()
    }

    pub fn locale(&self) -> Locale {
        self.nav.locale()
    }

    pub fn is_locked(&self) -> bool {
        self.nav.is_locked()
    }

    pub fn prev(&mut self) -> Result<RecordId, NavError> {
        self.navigate(NavAction::Prev)
    }

    pub fn next(&mut self) -> Result<RecordId, NavError> {
        self.navigate(NavAction::Next)
    }

    pub fn random(&mut self) -> Result<RecordId, NavError> {
        self.navigate(NavAction::Random)
    }

    pub fn navigate(&mut self, action: NavAction) -> Result<RecordId, NavError> {
        let id = self.nav.navigate(action)?;
        self.announcer.cancel();
        self.view = RecordView::Loading { id };
        Ok(id)
    }

    /// Flip the locale and re-announce the displayed record in it.
    pub fn toggle_locale(&mut self) -> Locale {
        let locale = self.nav.toggle_locale();
        if let RecordView::Ready(record) = &self.view {
            self.announcer.schedule(record.name.clone(), locale);
        }
        locale
    }

    /// Load the current record. The future owns everything it needs.
    pub fn resolve_current(
        &self,
    ) -> impl Future<Output = (RecordId, Result<Record, CatalogError>)> + Send + 'static
    where
        R: 'static,
    {
        let cache = self.cache.clone();
        let id = self.nav.current();
        async move {
            let result = cache.ensure_loaded(id).await;
            (id, result)
        }
    }

    /// Apply a finished load. Returns `false` when `id` is stale.
    pub fn apply_resolution(&mut self, id: RecordId, result: Result<Record, CatalogError>) -> bool {
        if id != self.nav.current() {
            tracing::debug!(%id, current = %self.nav.current(), "discarding stale record");
            return false;
        }
        match result {
            Ok(record) => {
                self.announcer.schedule(record.name.clone(), self.nav.locale());
                self.view = RecordView::Ready(record);
            }
            Err(err) => {
                tracing::warn!(%id, error = %err, "record fetch failed");
                self.announcer.cancel();
                self.view = RecordView::Failed {
                    id,
                    message: err.to_string(),
                };
            }
        }
        true
    }
}
