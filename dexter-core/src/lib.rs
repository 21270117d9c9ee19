//! Dexter Core
//!
//! Everything behind the browser view: the record model, the remote catalog
//! client, the deduplicating record cache, navigation state and the speech
//! announcer. Rendering lives in `dexter-tui`.

pub mod cache;
pub mod catalog;
pub mod error;
pub mod locale;
pub mod nav;
pub mod random;
pub mod record;
pub mod session;
pub mod speech;

pub use cache::{CacheStats, RecordCache};
pub use catalog::{CatalogClient, HttpCatalogClient, DEFAULT_CATALOG_URL};
pub use error::{CatalogError, NavError, SpeechError};
pub use locale::Locale;
pub use nav::{NavAction, NavSettings, NavSnapshot, NavigationController};
pub use random::{RandomSource, SeededRandom};
pub use record::{Record, RecordId};
pub use session::{BrowsingSession, RecordView};
pub use speech::{select_voice, Announcer, SpeechBackend, Voice};
