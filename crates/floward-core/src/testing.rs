//! Test doubles for every port, and a [`Harness`] wiring them into a controller.
//!
//! Available to this crate's tests and, behind the `test-util` feature, to
//! other crates' tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::config::ClientConfig;
use crate::controller::{AuthController, Ports};
use crate::domain::Notification;
use crate::ports::{
    CanvasSpec, Clock, EnvironmentProbe, HttpClient, HttpResponse, KeyValueStore,
    NavigationError, Navigator, Notifier, ProbeError, StorageError, TransportError, WebGlProbe,
};

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

enum Canned {
    Respond(HttpResponse),
    Unreachable(String),
}

/// HTTP client answering from per-path queues of canned responses.
/// A path with no queued response fails like an unreachable server.
#[derive(Default)]
pub struct MockHttpClient {
    canned: Mutex<HashMap<String, VecDeque<Canned>>>,
    requests: Mutex<Vec<(String, Value)>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with `status` and JSON `body` for `path`.
    pub fn respond(&self, path: &str, status: u16, body: Value) {
        self.enqueue(path, Canned::Respond(HttpResponse::new(status, body)));
    }

    /// Queue a transport failure for `path`.
    pub fn fail(&self, path: &str, reason: &str) {
        self.enqueue(path, Canned::Unreachable(reason.to_string()));
    }

    fn enqueue(&self, path: &str, canned: Canned) {
        locked(&self.canned)
            .entry(path.to_string())
            .or_default()
            .push_back(canned);
    }

    /// Requests received so far, as `(path, body)`.
    pub fn requests(&self) -> Vec<(String, Value)> {
        locked(&self.requests).clone()
    }

    pub fn request_count(&self) -> usize {
        locked(&self.requests).len()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn post_json(&self, path: &str, body: Value) -> Result<HttpResponse, TransportError> {
        locked(&self.requests).push((path.to_string(), body));

        let next = locked(&self.canned)
            .get_mut(path)
            .and_then(VecDeque::pop_front);
        match next {
            Some(Canned::Respond(response)) => Ok(response),
            Some(Canned::Unreachable(reason)) => Err(TransportError::Request(reason)),
            None => Err(TransportError::Request(format!("no response queued for {path}"))),
        }
    }
}

/// In-memory store whose writes can be made to fail.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, key: &str) -> Option<String> {
        locked(&self.entries).get(key).cloned()
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.value(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Io("quota exceeded".to_string()));
        }
        locked(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        locked(&self.entries).remove(key);
        Ok(())
    }
}

/// Records every navigation. External opens can be made to fail.
#[derive(Default)]
pub struct RecordingNavigator {
    external: Mutex<Vec<Url>>,
    visited: Mutex<Vec<String>>,
    refuse_external: AtomicBool,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `open_external` fail, as when no app handles the scheme.
    pub fn refuse_external(&self) {
        self.refuse_external.store(true, Ordering::SeqCst);
    }

    /// External URIs attempted, including refused ones.
    pub fn external(&self) -> Vec<Url> {
        locked(&self.external).clone()
    }

    pub fn visited(&self) -> Vec<String> {
        locked(&self.visited).clone()
    }
}

impl Navigator for RecordingNavigator {
    fn open_external(&self, uri: &Url) -> Result<(), NavigationError> {
        locked(&self.external).push(uri.clone());
        if self.refuse_external.load(Ordering::SeqCst) {
            return Err(NavigationError::Open(format!("no handler for {}", uri.scheme())));
        }
        Ok(())
    }

    fn navigate(&self, path: &str) -> Result<(), NavigationError> {
        locked(&self.visited).push(path.to_string());
        Ok(())
    }
}

/// Records notifications instead of showing them.
#[derive(Default)]
pub struct RecordingNotifier {
    shown: Mutex<Vec<Notification>>,
    hidden: AtomicUsize,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> Vec<Notification> {
        locked(&self.shown).clone()
    }

    pub fn last(&self) -> Option<Notification> {
        locked(&self.shown).last().cloned()
    }

    pub fn hide_count(&self) -> usize {
        self.hidden.load(Ordering::SeqCst)
    }
}

impl Notifier for RecordingNotifier {
    fn show(&self, notification: Notification) {
        locked(&self.shown).push(notification);
    }

    fn hide(&self) {
        self.hidden.fetch_add(1, Ordering::SeqCst);
    }
}

/// Clock whose sleeps return immediately and are recorded.
#[derive(Default)]
pub struct InstantClock {
    sleeps: Mutex<Vec<Duration>>,
}

impl InstantClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        locked(&self.sleeps).clone()
    }
}

#[async_trait]
impl Clock for InstantClock {
    async fn sleep(&self, duration: Duration) {
        locked(&self.sleeps).push(duration);
    }
}

/// Probe returning fixed signals. `None` for `canvas`/`webgl` makes that probe fail.
#[derive(Debug, Clone)]
pub struct FixedProbe {
    pub user_agent: String,
    pub screen: (u32, u32),
    pub timezone: String,
    pub languages: Vec<String>,
    pub hardware_concurrency: Option<u32>,
    pub device_memory: Option<f64>,
    pub platform: Option<String>,
    pub canvas: Option<Vec<u8>>,
    pub webgl: Option<WebGlProbe>,
}

impl Default for FixedProbe {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36"
                .to_string(),
            screen: (1920, 1080),
            timezone: "Asia/Shanghai".to_string(),
            languages: vec!["zh-CN".to_string(), "en".to_string()],
            hardware_concurrency: Some(8),
            device_memory: Some(8.0),
            platform: Some("Win32".to_string()),
            canvas: Some(vec![0, 0, 0, 0, 12, 34, 56, 255]),
            webgl: Some(WebGlProbe::Renderer {
                vendor: "Google Inc. (NVIDIA)".to_string(),
                renderer: "ANGLE (NVIDIA GeForce RTX 3060)".to_string(),
            }),
        }
    }
}

#[async_trait]
impl EnvironmentProbe for FixedProbe {
    fn user_agent(&self) -> String {
        self.user_agent.clone()
    }

    fn screen_size(&self) -> (u32, u32) {
        self.screen
    }

    fn timezone(&self) -> String {
        self.timezone.clone()
    }

    fn languages(&self) -> Vec<String> {
        self.languages.clone()
    }

    fn hardware_concurrency(&self) -> Option<u32> {
        self.hardware_concurrency
    }

    fn device_memory(&self) -> Option<f64> {
        self.device_memory
    }

    fn platform(&self) -> Option<String> {
        self.platform.clone()
    }

    async fn canvas_pixels(&self, _spec: &CanvasSpec) -> Result<Vec<u8>, ProbeError> {
        self.canvas
            .clone()
            .ok_or_else(|| ProbeError::Unavailable("no 2d context".to_string()))
    }

    async fn webgl(&self) -> Result<WebGlProbe, ProbeError> {
        self.webgl
            .clone()
            .ok_or_else(|| ProbeError::Failed("context lost".to_string()))
    }
}

/// A controller wired to test doubles, with handles to inspect them.
pub struct Harness {
    pub controller: AuthController,
    pub http: Arc<MockHttpClient>,
    pub storage: Arc<MemoryStore>,
    pub navigator: Arc<RecordingNavigator>,
    pub notifier: Arc<RecordingNotifier>,
    pub clock: Arc<InstantClock>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(ClientConfig::default(), FixedProbe::default())
    }

    pub fn with(config: ClientConfig, probe: FixedProbe) -> Self {
        let http = Arc::new(MockHttpClient::new());
        let storage = Arc::new(MemoryStore::new());
        let navigator = Arc::new(RecordingNavigator::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let clock = Arc::new(InstantClock::new());

        let ports = Ports {
            http: http.clone(),
            storage: storage.clone(),
            navigator: navigator.clone(),
            notifier: notifier.clone(),
            clock: clock.clone(),
            probe: Arc::new(probe),
        };

        Self {
            controller: AuthController::new(ports, config),
            http,
            storage,
            navigator,
            notifier,
            clock,
        }
    }

    /// A harness whose fingerprint has already been computed.
    pub async fn initialized() -> Self {
        let harness = Self::new();
        harness.controller.initialize().await;
        harness
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}
