//! Content Provider Abstraction
//!
//! Wire records exchanged with the external content-generation endpoint, the transport
//! trait that reaches it, and the resilient client that wraps a transport with retry,
//! backoff, and template fallback so callers always receive usable content.

use crate::catalog::{DifficultyBand, Level};
use crate::error::ApiError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod fallback;
pub mod http;
pub mod resilient;
pub mod retry;

pub use fallback::{FallbackPolicy, TemplateFallback};
pub use http::HttpContentTransport;
pub use resilient::ResilientContentClient;
pub use retry::{RetryExhausted, RetryPolicy};

/// Duration assumed when a request does not specify one, in minutes
pub const DEFAULT_DURATION_MINUTES: u32 = 30;

/// Kind of content requested from the endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Worksheet,
    Activity,
    LessonPlan,
    Quiz,
    Flashcards,
    #[serde(other)]
    Unknown,
}

impl ContentType {
    pub fn label(self) -> &'static str {
        match self {
            ContentType::Worksheet => "Worksheet",
            ContentType::Activity => "Activity",
            ContentType::LessonPlan => "Lesson Plan",
            ContentType::Quiz => "Quiz",
            ContentType::Flashcards => "Flashcards",
            ContentType::Unknown => "Learning Material",
        }
    }
}

/// Position of a bulk-generated lesson within the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumContext {
    pub level: Level,
    pub week: u32,
    pub total_weeks: u32,
    pub theme: String,
    pub lesson_number: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub topic: String,
    pub level: DifficultyBand,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objectives: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_bulk_generation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curriculum_context: Option<CurriculumContext>,
}

impl GenerationRequest {
    pub fn new(content_type: ContentType, topic: impl Into<String>, level: DifficultyBand) -> Self {
        Self {
            content_type,
            topic: topic.into(),
            level,
            duration: None,
            objectives: None,
            requirements: None,
            is_bulk_generation: None,
            curriculum_context: None,
        }
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration.unwrap_or(DEFAULT_DURATION_MINUTES)
    }
}

/// Content body produced by a transport or by the fallback renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedContent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationMetadata {
    pub generated_at: DateTime<Utc>,
    #[serde(rename = "isAIGenerated")]
    pub is_ai_generated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_mock_data: Option<bool>,
    /// Wall-clock milliseconds spent, retries included
    pub generation_time: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_fallback: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

impl GenerationMetadata {
    /// True when the content came from the local fallback renderer.
    pub fn is_mock(&self) -> bool {
        self.is_mock_data.unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub topic: String,
    pub level: DifficultyBand,
    pub duration: u32,
    pub content: String,
    pub metadata: GenerationMetadata,
}

/// Transport to the external content-generation endpoint
#[async_trait]
pub trait ContentTransport: Send + Sync {
    /// Issue one generation call
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedContent, ApiError>;

    /// Transport name used in logs
    fn name(&self) -> &str;
}
