//! Event schema for bulk progress reporting.

use serde::{Deserialize, Serialize};

/// Reported once per processed lesson during a bulk run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkProgress {
    /// 0..=100
    pub progress_percent: f64,
    pub level_label: String,
    /// 1-based position in the catalog
    pub current_lesson_ordinal: u32,
    pub total_lessons: u32,
}

/// Per-item failure recorded during a bulk run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFailure {
    pub level_label: String,
    pub week: u32,
    pub lesson_in_week: u32,
    pub ordinal: u32,
    pub error: String,
}

/// Outcome of a bulk run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkRunReport {
    pub total_lessons: u32,
    pub completed: u32,
    pub failed: u32,
    /// Completed items whose content came from the local fallback renderer
    pub fallback_count: u32,
    pub failures: Vec<ItemFailure>,
    pub cancelled: bool,
    pub duration_ms: u64,
}

impl BulkRunReport {
    pub fn new(total_lessons: u32) -> Self {
        Self {
            total_lessons,
            completed: 0,
            failed: 0,
            fallback_count: 0,
            failures: Vec::new(),
            cancelled: false,
            duration_ms: 0,
        }
    }

    pub fn processed(&self) -> u32 {
        self.completed + self.failed
    }
}
