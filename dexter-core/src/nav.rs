//! Navigation controller.
//!
//! Holds the current identifier, the next random-jump target, the locale and
//! the post-action lockout. Every accepted navigation locks input for the
//! cooldown window, bumps the render epoch and warms the cache for the two
//! likely next targets (`current + 1` and the random candidate).

use crate::cache::RecordCache;
use crate::error::NavError;
use crate::locale::Locale;
use crate::random::RandomSource;
use crate::record::RecordId;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Prev,
    Next,
    Random,
}

/// Tunables for the controller.
#[derive(Debug, Clone)]
pub struct NavSettings {
    /// Lockout after each accepted navigation.
    pub cooldown: Duration,
    /// Inclusive lower bound of random-jump targets.
    random_low: u32,
    /// Exclusive upper bound of random-jump targets.
    random_high: u32,
    pub start: RecordId,
    pub locale: Locale,
}

impl Default for NavSettings {
    fn default() -> Self {
        Self {
            cooldown: Duration::from_millis(2500),
            random_low: 1,
            random_high: 1000,
            start: RecordId::FIRST,
            locale: Locale::default(),
        }
    }
}

impl NavSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn with_start(mut self, start: RecordId) -> Self {
        self.start = start;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Set the random-jump range `[low, high)`. `low` is raised to 1 and
    /// `high` kept above `low`.
    pub fn with_random_range(mut self, low: u32, high: u32) -> Self {
        self.random_low = low.clamp(1, u32::MAX - 1);
        self.random_high = high.max(self.random_low + 1);
        self
    }

    /// Random-jump range as `(low, high)`; always `1 <= low < high`.
    pub fn random_range(&self) -> (u32, u32) {
        (self.random_low, self.random_high)
    }
}

/// Read-only copy of the navigation state for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavSnapshot {
    pub current: RecordId,
    pub random_candidate: RecordId,
    pub locked: bool,
    pub locale: Locale,
    pub epoch: u64,
}

pub struct NavigationController<R: RandomSource> {
    current: RecordId,
    random_candidate: RecordId,
    locked_until: Option<Instant>,
    locale: Locale,
    epoch: u64,
    settings: NavSettings,
    rng: R,
    cache: RecordCache,
}

impl<R: RandomSource> NavigationController<R> {
    /// Draws the first random candidate and warms the cache ahead of the
    /// start identifier. Must be called from within a tokio runtime.
    pub fn new(settings: NavSettings, mut rng: R, cache: RecordCache) -> Self {
        let random_candidate = draw(&mut rng, &settings);
        let controller = Self {
            current: settings.start,
            random_candidate,
            locked_until: None,
            locale: settings.locale,
            epoch: 0,
            settings,
            rng,
            cache,
        };
        controller.warm_ahead();
        controller
    }

    pub fn current(&self) -> RecordId {
        self.current
    }

    pub fn random_candidate(&self) -> RecordId {
        self.random_candidate
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn settings(&self) -> &NavSettings {
        &self.settings
    }

    /// Time left in the cooldown, `None` when idle.
    pub fn remaining_lock(&self) -> Option<Duration> {
        let until = self.locked_until?;
        let now = Instant::now();
        (until > now).then(|| until - now)
    }

    pub fn is_locked(&self) -> bool {
        self.remaining_lock().is_some()
    }

    pub fn snapshot(&self) -> NavSnapshot {
        NavSnapshot {
            current: self.current,
            random_candidate: self.random_candidate,
            locked: self.is_locked(),
            locale: self.locale,
            epoch: self.epoch,
        }
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

    /// Apply `action` unless locked. Returns the new current identifier.
    pub fn navigate(&mut self, action: NavAction) -> Result<RecordId, NavError> {
        if let Some(remaining) = self.remaining_lock() {
            tracing::debug!(?action, ?remaining, "navigation rejected, cooling down");
            return Err(NavError::Locked { remaining });
        }

        self.current = match action {
            NavAction::Prev => self.current.pred(),
            NavAction::Next => self.current.succ(),
            NavAction::Random => {
                let target = self.random_candidate;
                self.random_candidate = draw(&mut self.rng, &self.settings);
                target
            }
        };
        self.epoch += 1;
        self.locked_until = Some(Instant::now() + self.settings.cooldown);
        tracing::info!(
            ?action,
            current = %self.current,
            random_candidate = %self.random_candidate,
            epoch = self.epoch,
            "navigated"
        );
        self.warm_ahead();
        Ok(self.current)
    }

    /// Flip the locale. Leaves lockout and epoch untouched.
    pub fn toggle_locale(&mut self) -> Locale {
        self.locale = self.locale.toggled();
        tracing::info!(locale = %self.locale, "locale toggled");
        self.locale
    }

    fn warm_ahead(&self) {
        self.cache.prefetch(self.current.succ());
        self.cache.prefetch(self.random_candidate);
    }
}

fn draw<R: RandomSource>(rng: &mut R, settings: &NavSettings) -> RecordId {
    let value = rng.next_in(settings.random_low, settings.random_high);
    RecordId::new(value).unwrap_or(RecordId::FIRST)
}
