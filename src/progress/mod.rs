//! Progress observability primitives.

pub mod event;

pub use event::{BulkProgress, BulkRunReport, ItemFailure};

use parking_lot::Mutex;

/// Callback invoked after every processed lesson of a bulk run.
pub type ProgressCallback = dyn Fn(&BulkProgress) + Send + Sync;

/// Collects progress updates in arrival order.
#[derive(Debug, Default)]
pub struct ProgressLog {
    updates: Mutex<Vec<BulkProgress>>,
}

impl ProgressLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, progress: &BulkProgress) {
        self.updates.lock().push(progress.clone());
    }

    pub fn snapshot(&self) -> Vec<BulkProgress> {
        self.updates.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.updates.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.lock().is_empty()
    }

    pub fn last(&self) -> Option<BulkProgress> {
        self.updates.lock().last().cloned()
    }
}
