//! Dexter Test Utilities
//!
//! Shared test infrastructure for the Dexter workspace:
//! - A scripted catalog that counts and optionally holds fetches
//! - A speech backend that records what it was asked to say
//! - Scripted randomness
//! - Proptest generators and fixtures
//! - A one-shot local HTTP responder for exercising the real client

pub use dexter_core::{
    CatalogClient, CatalogError, Locale, RandomSource, Record, RecordId, SpeechBackend,
    SpeechError, Voice,
};

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

// ============================================================================
// SCRIPTED CATALOG
// ============================================================================

/// In-memory [`CatalogClient`].
///
/// Every identifier resolves to a fixture record unless it was marked
/// missing or failing. When gated, each fetch waits for a permit released
/// with [`ScriptedCatalog::release`], which lets tests hold requests in
/// flight.
pub struct ScriptedCatalog {
    missing: Mutex<Vec<RecordId>>,
    failing: Mutex<HashMap<RecordId, CatalogError>>,
    requests: Mutex<Vec<RecordId>>,
    gated: AtomicBool,
    gate: Semaphore,
}

impl ScriptedCatalog {
    pub fn new() -> Self {
        Self {
            missing: Mutex::new(Vec::new()),
            failing: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
            gated: AtomicBool::new(false),
            gate: Semaphore::new(0),
        }
    }

    /// Hold every fetch until released.
    pub fn gated() -> Self {
        let catalog = Self::new();
        catalog.gated.store(true, Ordering::SeqCst);
        catalog
    }

    pub fn with_missing(self, id: u32) -> Self {
        self.missing.lock().unwrap().push(fixtures::id(id));
        self
    }

    /// Fail the next fetches of `id` with a transport error until cleared.
    pub fn fail(&self, id: u32) {
        let id = fixtures::id(id);
        self.failing.lock().unwrap().insert(
            id,
            CatalogError::Transport {
                id,
                reason: "scripted failure".to_string(),
            },
        );
    }

    pub fn clear_failure(&self, id: u32) {
        self.failing.lock().unwrap().remove(&fixtures::id(id));
    }

    /// Let `count` held fetches proceed.
    pub fn release(&self, count: usize) {
        self.gate.add_permits(count);
    }

    /// Every requested identifier, in request order.
    pub fn requests(&self) -> Vec<RecordId> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self, id: u32) -> usize {
        let id = fixtures::id(id);
        self.requests.lock().unwrap().iter().filter(|r| **r == id).count()
    }
}

impl Default for ScriptedCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogClient for ScriptedCatalog {
    async fn fetch_record(&self, id: RecordId) -> Result<Record, CatalogError> {
        self.requests.lock().unwrap().push(id);
        if self.gated.load(Ordering::SeqCst) {
            if let Ok(permit) = self.gate.acquire().await {
                permit.forget();
            }
        } else {
            tokio::task::yield_now().await;
        }

        if let Some(err) = self.failing.lock().unwrap().get(&id) {
            return Err(err.clone());
        }
        if self.missing.lock().unwrap().contains(&id) {
            return Err(CatalogError::NotFound { id });
        }
        Ok(fixtures::record(id.get()))
    }
}

// ============================================================================
// RECORDING SPEECH
// ============================================================================

/// One call to [`SpeechBackend::speak`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub text: String,
    /// Voice name, `None` for the host default.
    pub voice: Option<String>,
}

/// [`SpeechBackend`] that records utterances instead of playing them.
#[derive(Default)]
pub struct RecordingSpeech {
    voices: Vec<Voice>,
    spoken: Mutex<Vec<Utterance>>,
}

impl RecordingSpeech {
    pub fn new(voices: Vec<Voice>) -> Self {
        Self {
            voices,
            spoken: Mutex::new(Vec::new()),
        }
    }

    /// Czech and US English voices.
    pub fn bilingual() -> Self {
        Self::new(vec![
            Voice::new("zuzana", "cs-CZ"),
            Voice::new("samantha", "en-US"),
        ])
    }

    pub fn spoken(&self) -> Vec<Utterance> {
        self.spoken.lock().unwrap().clone()
    }

    pub fn spoken_texts(&self) -> Vec<String> {
        self.spoken().into_iter().map(|u| u.text).collect()
    }
}

impl SpeechBackend for RecordingSpeech {
    fn voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }

    fn speak(&self, text: &str, voice: Option<&Voice>) -> Result<(), SpeechError> {
        self.spoken.lock().unwrap().push(Utterance {
            text: text.to_string(),
            voice: voice.map(|v| v.name.clone()),
        });
        Ok(())
    }
}

// ============================================================================
// SCRIPTED RANDOMNESS
// ============================================================================

/// [`RandomSource`] replaying fixed values; falls back to `low` when empty.
#[derive(Debug, Clone, Default)]
pub struct SequenceRandom {
    values: VecDeque<u32>,
}

impl SequenceRandom {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }
}

impl RandomSource for SequenceRandom {
    fn next_in(&mut self, low: u32, high: u32) -> u32 {
        self.values
            .pop_front()
            .map(|value| value.clamp(low, high.saturating_sub(1)))
            .unwrap_or(low)
    }
}

/// Shared handle so a test can keep a scripted catalog after handing it over.
pub fn shared_catalog(catalog: ScriptedCatalog) -> (Arc<ScriptedCatalog>, Arc<dyn CatalogClient>) {
    let catalog = Arc::new(catalog);
    let client: Arc<dyn CatalogClient> = catalog.clone();
    (catalog, client)
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for Dexter types.

    use super::*;
    use proptest::prelude::*;

    /// Any valid identifier.
    pub fn arb_record_id() -> impl Strategy<Value = RecordId> {
        (1u32..=u32::MAX).prop_map(fixtures::id)
    }

    /// Identifier in the range the catalog actually serves.
    pub fn arb_catalog_id() -> impl Strategy<Value = RecordId> {
        (1u32..1000).prop_map(fixtures::id)
    }

    pub fn arb_locale() -> impl Strategy<Value = Locale> {
        prop_oneof![Just(Locale::Czech), Just(Locale::English)]
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built records and catalog payloads.

    use super::*;

    /// Identifier from a literal. Panics on zero.
    pub fn id(value: u32) -> RecordId {
        RecordId::new(value).expect("record ids start at 1")
    }

    pub fn name_for(id: u32) -> String {
        match id {
            1 => "bulbasaur".to_string(),
            2 => "ivysaur".to_string(),
            3 => "venusaur".to_string(),
            4 => "charmander".to_string(),
            25 => "pikachu".to_string(),
            _ => format!("creature-{id}"),
        }
    }

    pub fn image_url(id: u32) -> String {
        format!("https://img.example/official-artwork/{id}.png")
    }

    pub fn record(id_value: u32) -> Record {
        Record::new(id(id_value), name_for(id_value), image_url(id_value))
    }

    /// Catalog JSON body for `id`, shaped like the live service.
    pub fn record_json(id: u32) -> String {
        serde_json::json!({
            "id": id,
            "name": name_for(id),
            "base_experience": 64,
            "sprites": {
                "front_default": format!("https://img.example/{id}.png"),
                "other": {
                    "official-artwork": { "front_default": image_url(id) }
                }
            }
        })
        .to_string()
    }
}

// ============================================================================
// LOCAL HTTP
// ============================================================================

pub mod http {
    //! One-shot HTTP responder on localhost.

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve a single response, then close. Returns the base URL and a
    /// handle yielding the raw request line.
    pub async fn serve_once(status: u16, body: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind local listener");
        let addr = listener.local_addr().expect("local addr");
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept");
            let mut buf = vec![0u8; 4096];
            let read = socket.read(&mut buf).await.unwrap_or(0);
            let request = String::from_utf8_lossy(&buf[..read]).to_string();
            let response = format!(
                "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {len}\r\nConnection: close\r\n\r\n{body}",
                reason = reason(status),
                len = body.len(),
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
            request.lines().next().unwrap_or_default().to_string()
        });
        (format!("http://{addr}/api/v2/pokemon"), handle)
    }

    /// Accept one connection and never answer it. The socket stays open
    /// until the returned handle is aborted or the runtime shuts down.
    pub async fn serve_never() -> (String, JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind local listener");
        let addr = listener.local_addr().expect("local addr");
        let handle = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.expect("accept");
            std::future::pending::<()>().await;
        });
        (format!("http://{addr}/api/v2/pokemon"), handle)
    }

    fn reason(status: u16) -> &'static str {
        match status {
            200 => "OK",
            404 => "Not Found",
            500 => "Internal Server Error",
            503 => "Service Unavailable",
            _ => "Status",
        }
    }
}

// ============================================================================
// ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertions for Dexter results.

    use super::*;

    #[track_caller]
    pub fn assert_not_found<T: std::fmt::Debug>(result: &Result<T, CatalogError>) {
        match result {
            Err(CatalogError::NotFound { .. }) => {}
            other => panic!("Expected NotFound, got: {:?}", other),
        }
    }

    #[track_caller]
    pub fn assert_transport<T: std::fmt::Debug>(result: &Result<T, CatalogError>) {
        match result {
            Err(CatalogError::Transport { .. }) => {}
            other => panic!("Expected Transport error, got: {:?}", other),
        }
    }

    #[track_caller]
    pub fn assert_malformed<T: std::fmt::Debug>(result: &Result<T, CatalogError>) {
        match result {
            Err(CatalogError::MalformedResponse { .. }) => {}
            other => panic!("Expected MalformedResponse, got: {:?}", other),
        }
    }
}
