//! HTTP transport to the content-generation endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::ApiError;
use crate::provider::{ContentTransport, GeneratedContent, GenerationRequest};

const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

// Map transport-level HTTP errors onto ApiError
fn map_http_error(error: reqwest::Error) -> ApiError {
    if let Some(status) = error.status() {
        status_error(status.as_u16(), &error.to_string())
    } else if error.is_timeout() {
        ApiError::ProviderRequestFailed(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        ApiError::ProviderRequestFailed(format!("Connection error: {}", error))
    } else {
        ApiError::ProviderError(format!("HTTP error: {}", error))
    }
}

fn status_error(status: u16, detail: &str) -> ApiError {
    match status {
        401 | 403 => ApiError::ProviderAuthFailed(format!("Authentication failed: {}", detail)),
        429 => ApiError::ProviderRateLimit(format!("Rate limit exceeded: {}", detail)),
        404 => ApiError::ProviderEndpointNotFound(format!("Endpoint not found: {}", detail)),
        _ => ApiError::ProviderRequestFailed(format!(
            "Request failed with status {}: {}",
            status, detail
        )),
    }
}

/// JSON-over-HTTP transport
pub struct HttpContentTransport {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpContentTransport {
    pub fn new(endpoint: String, api_key: Option<String>) -> Result<Self, ApiError> {
        Self::with_timeout(endpoint, api_key, HTTP_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(
        endpoint: String,
        api_key: Option<String>,
        request_timeout: Duration,
    ) -> Result<Self, ApiError> {
        if endpoint.trim().is_empty() {
            return Err(ApiError::ProviderNotConfigured(
                "Generation endpoint is empty".to_string(),
            ));
        }
        let client = Client::builder()
            .no_proxy()
            .connect_timeout(HTTP_CONNECT_TIMEOUT)
            .timeout(request_timeout)
            .build()
            .map_err(|e| ApiError::ProviderError(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ContentTransport for HttpContentTransport {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedContent, ApiError> {
        debug!(
            endpoint = %self.endpoint,
            topic = %request.topic,
            "sending generation request"
        );

        let mut builder = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(request);
        if let Some(key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {}", key));
        }

        let response = builder.send().await.map_err(map_http_error)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(status_error(status, &error_text));
        }

        let content: GeneratedContent = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        if content.content.trim().is_empty() {
            return Err(ApiError::InvalidResponse(
                "Endpoint returned empty content".to_string(),
            ));
        }
        Ok(content)
    }

    fn name(&self) -> &str {
        "http"
    }
}
