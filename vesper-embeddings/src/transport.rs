//! HTTP transport with retry, exponential backoff, and gzip compression.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use vesper_core::errors::EmbeddingError;
use vesper_core::VesperResult;

#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout: Duration::from_secs(5),
            max_retries: 3,
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_secs(5),
        }
    }
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

/// Blocking HTTP client over the embedding service's `/embed` and `/health`
/// endpoints, with retry + backoff on transport errors.
pub struct EmbeddingTransport {
    config: TransportConfig,
    http: reqwest::blocking::Client,
}

impl EmbeddingTransport {
    pub fn new(config: TransportConfig) -> Self {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .gzip(true)
            .build()
            .expect("embedding transport: failed to build HTTP client");
        Self { config, http }
    }

    /// POST a batch of texts to `{base_url}/embed` and return their embeddings
    /// in input order. Retries transport failures with exponential backoff;
    /// client errors (4xx) are not retried.
    pub fn embed_batch(&self, texts: &[String]) -> VesperResult<Vec<Vec<f32>>> {
        let url = format!("{}/embed", self.config.base_url.trim_end_matches('/'));
        let body = EmbedRequest { input: texts };

        let mut backoff = self.config.initial_backoff;
        let mut last_err = String::new();

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                tracing::debug!(attempt, ?backoff, "vesper-embeddings: retrying");
                std::thread::sleep(backoff);
                backoff = (backoff * 2).min(self.config.max_backoff);
            }

            match self.http.post(&url).json(&body).send() {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        return resp
                            .json::<EmbedResponse>()
                            .map(|r| r.embeddings)
                            .map_err(|e| {
                                EmbeddingError::MalformedResponse { reason: e.to_string() }.into()
                            });
                    }
                    if status.is_client_error() {
                        return Err(EmbeddingError::Unavailable {
                            reason: format!("HTTP {status}"),
                        }
                        .into());
                    }
                    last_err = format!("HTTP {status}");
                }
                Err(e) => last_err = e.to_string(),
            }
        }

        Err(EmbeddingError::Unavailable {
            reason: format!("all {} retries exhausted: {last_err}", self.config.max_retries),
        }
        .into())
    }

    /// Probe `{base_url}/health`. Any non-success response or transport
    /// error is treated as `degraded`.
    pub fn health(&self) -> bool {
        let url = format!("{}/health", self.config.base_url.trim_end_matches('/'));
        match self.http.get(&url).send() {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }
}
