//! Configuration System
//!
//! Layered configuration for the generation client, the bulk run and persistence.
//! Sources are merged in order: built-in defaults, the global user file, workspace files
//! and finally `CURRICULA__SECTION__KEY` environment variables.

use crate::error::ApiError;
use crate::generation::BulkGenerationOrchestrator;
use crate::logging::LoggingConfig;
use crate::pacing::{ItemPacer, TokioSleeper};
use crate::provider::{ContentTransport, HttpContentTransport, ResilientContentClient, RetryPolicy};
use crate::store::persistence::SledCurriculumStore;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurriculaConfig {
    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub bulk: BulkConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// External content-generation endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Endpoint URL. When absent every request is answered by the fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: u32,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_backoff_multiplier() -> u32 {
    2
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            initial_delay: Duration::from_millis(self.initial_delay_ms),
            multiplier: self.backoff_multiplier,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkConfig {
    /// Pause after each bulk item, in milliseconds
    #[serde(default = "default_item_interval_ms")]
    pub item_interval_ms: u64,
}

fn default_item_interval_ms() -> u64 {
    100
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self {
            item_interval_ms: default_item_interval_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory of the sled database
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

pub(crate) fn default_store_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "curricula")
        .map(|dirs| dirs.data_local_dir().join("store"))
        .unwrap_or_else(|| PathBuf::from(".curricula/store"))
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Generation(String),
    Retry(String),
    Storage(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Generation(msg) => write!(f, "Generation: {}", msg),
            ValidationError::Retry(msg) => write!(f, "Retry: {}", msg),
            ValidationError::Storage(msg) => write!(f, "Storage: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl GenerationConfig {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(endpoint) = &self.endpoint {
            let trimmed = endpoint.trim();
            if !trimmed.is_empty()
                && !trimmed.starts_with("http://")
                && !trimmed.starts_with("https://")
            {
                return Err(format!("Endpoint must be an http(s) URL: {}", endpoint));
            }
        }
        if self.request_timeout_secs == 0 {
            return Err("Request timeout must be greater than zero".to_string());
        }
        Ok(())
    }

    /// Endpoint with surrounding whitespace removed; `None` when unset or blank.
    pub fn configured_endpoint(&self) -> Option<&str> {
        self.endpoint
            .as_deref()
            .map(str::trim)
            .filter(|endpoint| !endpoint.is_empty())
    }
}

impl RetryConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("max_attempts must be at least 1".to_string());
        }
        if self.backoff_multiplier == 0 {
            return Err("backoff_multiplier must be at least 1".to_string());
        }
        Ok(())
    }
}

impl CurriculaConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.generation.validate() {
            errors.push(ValidationError::Generation(e));
        }
        if let Err(e) = self.retry.validate() {
            errors.push(ValidationError::Retry(e));
        }
        if self.storage.store_path.as_os_str().is_empty() {
            errors.push(ValidationError::Storage(
                "Store path cannot be empty".to_string(),
            ));
        }
        if let Err(e) = crate::logging::validate_logging_config(&self.logging) {
            errors.push(ValidationError::Logging(e.to_string()));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and fold every problem into one config error.
    pub fn ensure_valid(&self) -> Result<(), ApiError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })
    }

    /// Resilient client wired to the configured endpoint, or to the fallback alone when
    /// no endpoint is set.
    pub fn content_client(&self) -> Result<ResilientContentClient, ApiError> {
        self.ensure_valid()?;
        let transport: Option<Arc<dyn ContentTransport>> =
            match self.generation.configured_endpoint() {
                Some(endpoint) => Some(Arc::new(HttpContentTransport::with_timeout(
                    endpoint.to_string(),
                    self.generation.api_key.clone(),
                    Duration::from_secs(self.generation.request_timeout_secs),
                )?)),
                None => None,
            };
        Ok(ResilientContentClient::new(transport).with_retry_policy(self.retry.policy()))
    }

    pub fn item_pacer(&self) -> ItemPacer {
        ItemPacer::new(
            Duration::from_millis(self.bulk.item_interval_ms),
            Arc::new(TokioSleeper),
        )
    }

    pub fn open_store(&self) -> Result<SledCurriculumStore, ApiError> {
        Ok(SledCurriculumStore::new(&self.storage.store_path)?)
    }

    /// Orchestrator built from the client and pacing settings, writing results to `store`
    /// when one is given.
    pub fn orchestrator(
        &self,
        store: Option<Arc<SledCurriculumStore>>,
    ) -> Result<BulkGenerationOrchestrator, ApiError> {
        let orchestrator =
            BulkGenerationOrchestrator::new(self.content_client()?).with_pacer(self.item_pacer());
        Ok(match store {
            Some(store) => orchestrator.with_store(store),
            None => orchestrator,
        })
    }
}
