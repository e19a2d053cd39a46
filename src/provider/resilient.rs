//! Resilient content client: transport + retry policy + fallback policy.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{info, warn};

use crate::pacing::{Sleeper, TokioSleeper};
use crate::provider::{
    ContentTransport, FallbackPolicy, GeneratedContent, GenerationMetadata, GenerationRequest,
    GenerationResult, RetryPolicy, TemplateFallback,
};

static CONTENT_COUNTER: AtomicU64 = AtomicU64::new(1);

const NOT_CONFIGURED_REASON: &str = "generation endpoint not configured";

/// Wraps one generation call so that it always yields a usable result.
///
/// The transport is tried according to the [`RetryPolicy`]; when every attempt fails, a
/// failure is not retryable, or no transport is configured, the [`FallbackPolicy`] renders
/// the content locally and the result is flagged with `is_mock_data`.
#[derive(Clone)]
pub struct ResilientContentClient {
    transport: Option<Arc<dyn ContentTransport>>,
    retry: RetryPolicy,
    fallback: Arc<dyn FallbackPolicy>,
    sleeper: Arc<dyn Sleeper>,
}

impl ResilientContentClient {
    pub fn new(transport: Option<Arc<dyn ContentTransport>>) -> Self {
        Self {
            transport,
            retry: RetryPolicy::default(),
            fallback: Arc::new(TemplateFallback),
            sleeper: Arc::new(TokioSleeper),
        }
    }

    /// Client with no endpoint: every call renders fallback content.
    pub fn unconfigured() -> Self {
        Self::new(None)
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_fallback(mut self, fallback: Arc<dyn FallbackPolicy>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.transport.is_some()
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Generate content for `request`. Never fails.
    pub async fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        let started = Instant::now();

        let Some(transport) = &self.transport else {
            return self.fallback_result(request, NOT_CONFIGURED_REASON.to_string(), started);
        };

        let transport = transport.as_ref();
        let outcome = self
            .retry
            .run(self.sleeper.as_ref(), move |_attempt| transport.generate(request))
            .await;

        match outcome {
            Ok(content) => {
                let elapsed = started.elapsed().as_millis() as u64;
                info!(
                    transport = transport.name(),
                    topic = %request.topic,
                    generation_ms = elapsed,
                    "content generated"
                );
                self.assemble(
                    request,
                    content,
                    GenerationMetadata {
                        generated_at: Utc::now(),
                        is_ai_generated: true,
                        is_mock_data: None,
                        generation_time: elapsed,
                        is_fallback: None,
                        fallback_reason: None,
                    },
                )
            }
            Err(exhausted) => {
                warn!(
                    transport = transport.name(),
                    topic = %request.topic,
                    attempts = exhausted.attempts,
                    error = %exhausted.last_error,
                    "generation failed, using fallback content"
                );
                let reason = format!(
                    "failed after {} attempt(s): {}",
                    exhausted.attempts, exhausted.last_error
                );
                self.fallback_result(request, reason, started)
            }
        }
    }

    fn fallback_result(
        &self,
        request: &GenerationRequest,
        reason: String,
        started: Instant,
    ) -> GenerationResult {
        let content = self.fallback.render(request);
        self.assemble(
            request,
            content,
            GenerationMetadata {
                generated_at: Utc::now(),
                is_ai_generated: false,
                is_mock_data: Some(true),
                generation_time: started.elapsed().as_millis() as u64,
                is_fallback: Some(true),
                fallback_reason: Some(reason),
            },
        )
    }

    fn assemble(
        &self,
        request: &GenerationRequest,
        content: GeneratedContent,
        metadata: GenerationMetadata,
    ) -> GenerationResult {
        GenerationResult {
            id: content.id.unwrap_or_else(new_content_id),
            title: content
                .title
                .unwrap_or_else(|| format!("{} - {}", request.topic, request.content_type.label())),
            content_type: request.content_type,
            topic: request.topic.clone(),
            level: request.level,
            duration: request.duration_minutes(),
            content: content.content,
            metadata,
        }
    }
}

fn new_content_id() -> String {
    let ts = Utc::now().timestamp_millis();
    let seq = CONTENT_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("content-{ts}-{seq}")
}
