//! Speech announcer over an injectable host speech backend.

use crate::error::SpeechError;
use crate::locale::Locale;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Voice reported by the host speech backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    /// Locale tag as the host reports it (`cs-CZ`, `en_US`, `cs`).
    pub locale: String,
}

impl Voice {
    pub fn new(name: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locale: locale.into(),
        }
    }
}

/// Host text-to-speech capability.
pub trait SpeechBackend: Send + Sync {
    fn voices(&self) -> Vec<Voice>;

    /// Start speaking `text`. `None` selects the host default voice.
    /// Must not wait for playback to finish.
    fn speak(&self, text: &str, voice: Option<&Voice>) -> Result<(), SpeechError>;
}

fn normalize(tag: &str) -> String {
    tag.trim().replace('_', "-").to_ascii_lowercase()
}

/// Pick the voice for `locale`: full-tag prefix first, then language subtag.
pub fn select_voice(voices: &[Voice], locale: Locale) -> Option<&Voice> {
    let tag = normalize(locale.tag());
    let language = locale.language();
    voices
        .iter()
        .find(|voice| normalize(&voice.locale).starts_with(&tag))
        .or_else(|| {
            voices
                .iter()
                .find(|voice| normalize(&voice.locale).starts_with(language))
        })
}

/// Debounced, cancellable announcements.
///
/// At most one announcement is pending; scheduling a new one or calling
/// [`Announcer::cancel`] aborts the previous timer before it fires.
pub struct Announcer {
    backend: Arc<dyn SpeechBackend>,
    debounce: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Announcer {
    pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

    pub fn new(backend: Arc<dyn SpeechBackend>, debounce: Duration) -> Self {
        Self {
            backend,
            debounce,
            pending: None,
        }
    }

    /// Announce `text` after the debounce window unless superseded.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, text: impl Into<String>, locale: Locale) {
        self.cancel();
        let backend = Arc::clone(&self.backend);
        let debounce = self.debounce;
        let text = text.into();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            speak_with(backend.as_ref(), &text, locale);
        }));
    }

    /// Drop the pending announcement, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            if !handle.is_finished() {
                tracing::debug!("pending announcement cancelled");
            }
            handle.abort();
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Speak immediately, bypassing the debounce.
    pub fn announce_now(&self, text: &str, locale: Locale) {
        speak_with(self.backend.as_ref(), text, locale);
    }
}

impl Drop for Announcer {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn speak_with(backend: &dyn SpeechBackend, text: &str, locale: Locale) {
    let voices = backend.voices();
    let voice = select_voice(&voices, locale);
    if voice.is_none() {
        tracing::warn!(locale = %locale, "no voice for locale, using default voice");
    }
    if let Err(err) = backend.speak(text, voice) {
        tracing::warn!(error = %err, "speech playback failed");
    }
}
