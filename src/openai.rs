//! HTTP clients for OpenAI-compatible APIs.

use crate::config::EmbeddingSettings;
use crate::error::{RaavanError, Result};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Default timeout for embedding requests.
const EMBEDDING_TIMEOUT_SECS: u64 = 60;

/// Create a plain HTTP client with the given request timeout.
pub fn create_http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| RaavanError::Config(format!("Failed to create HTTP client: {}", e)))
}

/// Create an embeddings client pointed at the configured API base.
///
/// Local sentence-transformers servers usually need no key, so a missing key is not an error.
pub fn create_embedding_client(settings: &EmbeddingSettings) -> Result<Client<OpenAIConfig>> {
    let mut config = OpenAIConfig::new().with_api_base(&settings.api_base);
    if let Some(key) = settings.api_key() {
        config = config.with_api_key(key);
    }

    let http_client = create_http_client(Duration::from_secs(EMBEDDING_TIMEOUT_SECS))?;
    Ok(Client::with_config(config).with_http_client(http_client))
}
