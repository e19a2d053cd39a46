//! Shared test doubles for integration tests
//!
//! Sleepers that record instead of waiting, transports with scripted failures, and
//! content stores that fail on demand.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::thread::ThreadId;
use std::time::Duration;

use async_trait::async_trait;
use curricula::error::{ApiError, StorageError};
use curricula::pacing::{ItemPacer, Sleeper};
use curricula::provider::{ContentTransport, GeneratedContent, GenerationRequest, GenerationResult};
use curricula::store::{CurriculumRecord, CurriculumStore, GeneratedContentStore};
use parking_lot::Mutex;
use tokio::sync::Semaphore;

/// Serializes tests that read or write process environment variables
pub static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Records requested delays and returns immediately.
#[derive(Default)]
pub struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().push(duration);
    }
}

/// Pacer that records its pauses instead of sleeping.
pub fn recording_pacer() -> (ItemPacer, Arc<RecordingSleeper>) {
    let sleeper = RecordingSleeper::new();
    let pacer = ItemPacer::new(ItemPacer::DEFAULT_INTERVAL, sleeper.clone());
    (pacer, sleeper)
}

/// Fails the first `failures` calls, then succeeds.
pub struct FlakyTransport {
    failures: u32,
    error: fn(String) -> ApiError,
    calls: AtomicU32,
}

impl FlakyTransport {
    pub fn new(failures: u32) -> Arc<Self> {
        Self::with_error(failures, ApiError::ProviderRequestFailed)
    }

    pub fn with_error(failures: u32, error: fn(String) -> ApiError) -> Arc<Self> {
        Arc::new(Self {
            failures,
            error,
            calls: AtomicU32::new(0),
        })
    }

    pub fn always_failing() -> Arc<Self> {
        Self::new(u32::MAX)
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentTransport for FlakyTransport {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedContent, ApiError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call <= self.failures {
            return Err((self.error)(format!("scripted failure {}", call)));
        }
        Ok(GeneratedContent {
            id: Some(format!("remote-{}", call)),
            title: None,
            content: format!("Generated body for {}", request.topic),
        })
    }

    fn name(&self) -> &str {
        "flaky"
    }
}

/// Blocks every call until the test releases permits.
pub struct GatedTransport {
    gate: Semaphore,
    calls: AtomicU32,
}

impl GatedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            gate: Semaphore::new(0),
            calls: AtomicU32::new(0),
        })
    }

    pub fn release_all(&self) {
        self.gate.add_permits(Semaphore::MAX_PERMITS / 2);
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentTransport for GatedTransport {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedContent, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| ApiError::ProviderError(e.to_string()))?;
        permit.forget();
        Ok(GeneratedContent {
            id: None,
            title: None,
            content: format!("Gated body for {}", request.topic),
        })
    }

    fn name(&self) -> &str {
        "gated"
    }
}

/// In-memory content store that rejects writes for selected keys.
#[derive(Default)]
pub struct FailingStore {
    failing_keys: HashSet<String>,
    saved: Mutex<HashMap<String, GenerationResult>>,
    writer_threads: Mutex<HashSet<ThreadId>>,
}

impl FailingStore {
    pub fn failing_on(keys: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            failing_keys: keys.iter().map(|k| k.to_string()).collect(),
            saved: Mutex::new(HashMap::new()),
            writer_threads: Mutex::new(HashSet::new()),
        })
    }

    pub fn saved_keys(&self) -> usize {
        self.saved.lock().len()
    }

    /// Threads that `save_generated` ran on.
    pub fn writer_threads(&self) -> HashSet<ThreadId> {
        self.writer_threads.lock().clone()
    }
}

impl GeneratedContentStore for FailingStore {
    fn save_generated(&self, key: &str, result: &GenerationResult) -> Result<(), StorageError> {
        self.writer_threads.lock().insert(std::thread::current().id());
        if self.failing_keys.contains(key) {
            return Err(StorageError::IoError(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("disk full while writing {}", key),
            )));
        }
        self.saved.lock().insert(key.to_string(), result.clone());
        Ok(())
    }

    fn load_generated(&self, key: &str) -> Result<Option<GenerationResult>, StorageError> {
        Ok(self.saved.lock().get(key).cloned())
    }

    fn generated_count(&self) -> Result<usize, StorageError> {
        Ok(self.saved.lock().len())
    }
}

/// Curriculum store whose writes always fail.
#[derive(Default)]
pub struct FailingCurriculumStore {
    attempts: AtomicU32,
}

impl FailingCurriculumStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl CurriculumStore for FailingCurriculumStore {
    fn save_curriculum(&self, record: &CurriculumRecord) -> Result<(), StorageError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::IoError(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("read-only volume rejected {}", record.id),
        )))
    }

    fn load_curriculum(&self, _id: &str) -> Result<Option<CurriculumRecord>, StorageError> {
        Ok(None)
    }
}
