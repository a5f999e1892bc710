//! Blocking HTTP transport with retry/backoff.

use std::time::Duration;

use serde::Serialize;
use vesper_core::errors::VectorError;
use vesper_core::VesperResult;

#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: None,
            timeout: Duration::from_secs(10),
            max_retries: 3,
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_secs(5),
        }
    }
}

pub(crate) struct Transport {
    config: TransportConfig,
    http: reqwest::blocking::Client,
}

impl Transport {
    pub fn new(config: TransportConfig) -> Self {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .gzip(true)
            .build()
            .expect("vector transport: failed to build HTTP client");
        Self { config, http }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::blocking::RequestBuilder {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        let mut req = self.http.request(method, url);
        if let Some(ref key) = self.config.api_key {
            req = req.header("api-key", key.clone());
        }
        req
    }

    /// Send a request with a JSON body, retrying transport failures and 5xx
    /// responses with exponential backoff. 4xx responses are not retried.
    pub fn send_json<B: Serialize, R: serde::de::DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&B>,
    ) -> VesperResult<R> {
        let mut backoff = self.config.initial_backoff;
        let mut last_err = String::new();

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                tracing::debug!(attempt, ?backoff, "vesper-vector: retrying");
                std::thread::sleep(backoff);
                backoff = (backoff * 2).min(self.config.max_backoff);
            }

            let mut req = self.request(method.clone(), path);
            if let Some(b) = body {
                req = req.json(b);
            }

            match req.send() {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        return resp.json::<R>().map_err(|e| {
                            VectorError::Unavailable { reason: format!("decode error: {e}") }.into()
                        });
                    }
                    if status.as_u16() == 404 {
                        return Err(VectorError::CollectionNotFound { name: path.to_string() }.into());
                    }
                    if status.is_client_error() {
                        let text = resp.text().unwrap_or_default();
                        return Err(VectorError::Unavailable {
                            reason: format!("HTTP {status}: {text}"),
                        }
                        .into());
                    }
                    last_err = format!("HTTP {status}");
                }
                Err(e) => last_err = e.to_string(),
            }
        }

        Err(VectorError::Unavailable {
            reason: format!("all {} retries exhausted: {last_err}", self.config.max_retries),
        }
        .into())
    }
}
