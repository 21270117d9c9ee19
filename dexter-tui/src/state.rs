//! Application state.

use crate::config::TuiConfig;
use crate::keys::Action;
use crate::notifications::{Notification, NotificationLevel};
use crate::theme::SynthBruteTheme;
use chrono::{DateTime, Utc};
use dexter_core::{
    BrowsingSession, CatalogError, NavAction, NavError, RandomSource, Record, RecordId,
    SeededRandom,
};

/// How long a notification stays in the footer.
const NOTIFICATION_TTL_MS: i64 = 4_000;

#[derive(Debug, Clone)]
pub struct Modal {
    pub title: String,
    pub message: String,
}

/// What the event loop must do after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Spawn a load of the current record.
    LoadCurrent,
    Quit,
}

pub struct App<R: RandomSource = SeededRandom> {
    pub config: TuiConfig,
    pub theme: SynthBruteTheme,
    pub session: BrowsingSession<R>,
    pub notifications: Vec<Notification>,
    pub modal: Option<Modal>,
}

impl<R: RandomSource> App<R> {
    pub fn new(config: TuiConfig, session: BrowsingSession<R>) -> Self {
        Self {
            config,
            theme: SynthBruteTheme::synthbrute(),
            session,
            notifications: Vec::new(),
            modal: None,
        }
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification::new(level, message));
    }

    /// Drop notifications older than the footer TTL.
    pub fn prune_notifications(&mut self, now: DateTime<Utc>) {
        self.notifications
            .retain(|note| !note.is_expired(now, NOTIFICATION_TTL_MS));
    }

    pub fn handle_action(&mut self, action: Action) -> Effect {
        match action {
            Action::Quit => Effect::Quit,
            Action::Prev => self.navigate(NavAction::Prev),
            Action::Next => self.navigate(NavAction::Next),
            Action::Random => self.navigate(NavAction::Random),
            Action::ToggleLocale => {
                let locale = self.session.toggle_locale();
                self.notify(NotificationLevel::Info, format!("Voice locale: {}", locale));
                Effect::None
            }
            Action::OpenHelp => {
                self.modal = Some(Modal {
                    title: "Keybindings".to_string(),
                    message: help_text().to_string(),
                });
                Effect::None
            }
            Action::Cancel => {
                self.modal = None;
                Effect::None
            }
        }
    }

    fn navigate(&mut self, action: NavAction) -> Effect {
        match self.session.navigate(action) {
            Ok(_) => Effect::LoadCurrent,
            Err(NavError::Locked { remaining }) => {
                self.notify(
                    NotificationLevel::Info,
                    format!("Cooling down ({:.1}s)", remaining.as_secs_f32()),
                );
                Effect::None
            }
        }
    }

    /// Feed a finished load back into the session.
    pub fn apply_resolution(&mut self, id: RecordId, result: Result<Record, CatalogError>) {
        self.session.apply_resolution(id, result);
    }
}

pub fn help_text() -> &'static str {
    "←/h previous • →/l next • r random • t toggle voice locale • ? help • Esc close • q quit"
}
