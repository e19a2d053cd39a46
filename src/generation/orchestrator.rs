//! Bulk generation orchestrator: drives one generation call per catalog lesson.
//!
//! Runs are single-flight and strictly sequential. Each item goes through the resilient
//! client (which owns all retrying), is optionally written to a content store, reports
//! progress, and is followed by a fixed pause. A failed item is logged and recorded in the
//! report; the run carries on to the end.

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, warn};

use crate::error::ApiError;
use crate::generation::plan::{BulkItem, CatalogWorkList};
use crate::generation::state::{CancellationToken, OrchestratorStatus, RunState};
use crate::pacing::ItemPacer;
use crate::progress::{BulkProgress, BulkRunReport, ItemFailure, ProgressCallback};
use crate::provider::{GenerationResult, ResilientContentClient};
use crate::store::GeneratedContentStore;

pub struct BulkGenerationOrchestrator {
    client: ResilientContentClient,
    pacer: ItemPacer,
    store: Option<Arc<dyn GeneratedContentStore>>,
    state: Arc<RunState>,
}

impl BulkGenerationOrchestrator {
    pub fn new(client: ResilientContentClient) -> Self {
        Self {
            client,
            pacer: ItemPacer::default(),
            store: None,
            state: RunState::new(CatalogWorkList::total()),
        }
    }

    pub fn with_pacer(mut self, pacer: ItemPacer) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn with_store(mut self, store: Arc<dyn GeneratedContentStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn status(&self) -> OrchestratorStatus {
        self.state.status()
    }

    /// Ask the in-flight run to stop after its current item. Returns false when idle.
    pub fn cancel(&self) -> bool {
        let cancelled = self.state.cancel_active();
        if cancelled {
            info!("bulk generation cancellation requested");
        }
        cancelled
    }

    /// Generate every lesson of the catalog.
    ///
    /// Fails only with [`ApiError::AlreadyRunning`] when another run is in progress.
    pub async fn run_full_catalog(
        &self,
        on_progress: Option<&ProgressCallback>,
    ) -> Result<BulkRunReport, ApiError> {
        self.run_full_catalog_with_token(on_progress, CancellationToken::new())
            .await
    }

    pub async fn run_full_catalog_with_token(
        &self,
        on_progress: Option<&ProgressCallback>,
        token: CancellationToken,
    ) -> Result<BulkRunReport, ApiError> {
        let guard = self.state.start(token.clone())?;
        let total = CatalogWorkList::total();
        let started = Instant::now();
        let mut report = BulkRunReport::new(total);

        info!(
            total_lessons = total,
            endpoint_configured = self.client.is_configured(),
            "bulk generation started"
        );

        for item in CatalogWorkList::new() {
            if token.is_cancelled() {
                warn!(
                    processed = report.processed(),
                    total_lessons = total,
                    "bulk generation cancelled"
                );
                report.cancelled = true;
                break;
            }

            self.state.set_current(item.level, item.ordinal);

            match self.process_item(&item).await {
                Ok(result) => {
                    report.completed += 1;
                    if result.metadata.is_mock() {
                        report.fallback_count += 1;
                    }
                }
                Err(err) => {
                    error!(
                        level = %item.level,
                        week = item.week,
                        lesson = item.lesson_in_week,
                        error = %err,
                        "bulk item failed"
                    );
                    report.failed += 1;
                    report.failures.push(ItemFailure {
                        level_label: item.level.to_string(),
                        week: item.week,
                        lesson_in_week: item.lesson_in_week,
                        ordinal: item.ordinal,
                        error: err.to_string(),
                    });
                }
            }

            let percent = report.processed() as f64 / total as f64 * 100.0;
            self.state.record_progress(percent);
            if let Some(callback) = on_progress {
                callback(&BulkProgress {
                    progress_percent: percent,
                    level_label: item.level.to_string(),
                    current_lesson_ordinal: item.ordinal,
                    total_lessons: total,
                });
            }

            self.pacer.after_item().await;
        }

        report.duration_ms = started.elapsed().as_millis() as u64;
        drop(guard);

        info!(
            completed = report.completed,
            failed = report.failed,
            fallback = report.fallback_count,
            cancelled = report.cancelled,
            duration_ms = report.duration_ms,
            "bulk generation finished"
        );
        Ok(report)
    }

    async fn process_item(&self, item: &BulkItem) -> Result<GenerationResult, ApiError> {
        item.validate()?;
        let request = item.request();
        let result = self.client.generate(&request).await;
        if let Some(store) = &self.store {
            let store = Arc::clone(store);
            let key = item.storage_key();
            let record = result.clone();
            tokio::task::spawn_blocking(move || store.save_generated(&key, &record))
                .await
                .map_err(|e| ApiError::ProviderError(format!("store write task failed: {}", e)))??;
        }
        Ok(result)
    }
}
