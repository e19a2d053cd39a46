//! Error types for the curriculum synthesis and generation core.

use thiserror::Error;

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to encode or decode record: {0}")]
    Serialization(String),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors surfaced by the generation pipeline and its collaborators
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Provider not configured: {0}")]
    ProviderNotConfigured(String),

    #[error("Provider request failed: {0}")]
    ProviderRequestFailed(String),

    #[error("Provider authentication failed: {0}")]
    ProviderAuthFailed(String),

    #[error("Provider rate limit exceeded: {0}")]
    ProviderRateLimit(String),

    #[error("Provider endpoint not found: {0}")]
    ProviderEndpointNotFound(String),

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("Invalid lesson coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Bulk generation is already running")]
    AlreadyRunning,

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ApiError {
    /// Whether a failed provider call is worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::ConfigError(_)
            | ApiError::ProviderNotConfigured(_)
            | ApiError::ProviderAuthFailed(_)
            | ApiError::InvalidCoordinates(_)
            | ApiError::AlreadyRunning => false,
            ApiError::ProviderError(_)
            | ApiError::ProviderRequestFailed(_)
            | ApiError::ProviderRateLimit(_)
            | ApiError::ProviderEndpointNotFound(_)
            | ApiError::InvalidResponse(_)
            | ApiError::StorageError(_) => true,
        }
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
