//! Dexter TUI library exports.

pub mod config;
pub mod error;
pub mod events;
pub mod keys;
pub mod logging;
pub mod notifications;
pub mod speech;
pub mod state;
pub mod theme;
pub mod views;
pub mod widgets;

use config::TuiConfig;
use dexter_core::{
    Announcer, BrowsingSession, CatalogClient, NavigationController, RecordCache, SeededRandom,
    SpeechBackend,
};
use std::sync::Arc;

/// Wire the session from config. Must be called from within a tokio runtime.
pub fn build_session(
    config: &TuiConfig,
    client: Arc<dyn CatalogClient>,
    speech: Arc<dyn SpeechBackend>,
) -> BrowsingSession<SeededRandom> {
    let rng = match config.random_seed {
        Some(seed) => SeededRandom::from_seed(seed),
        None => SeededRandom::from_entropy(),
    };
    let cache = RecordCache::new(client);
    let nav = NavigationController::new(config.nav_settings(), rng, cache.clone());
    let announcer = Announcer::new(speech, config.announce_debounce());
    BrowsingSession::new(nav, cache, announcer)
}
