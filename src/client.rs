use crate::config::RemoteConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, info};

/// Errors from the remote inference endpoint
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport-level failure (connect error, timeout, DNS, ...)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Upstream answered with a non-success status
    #[error("Remote endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Upstream answered 2xx but the body is not the expected shape
    #[error("Malformed response from remote endpoint: {0}")]
    MalformedResponse(String),
}

/// Result type alias for remote client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Contract for the prediction backend.
///
/// Implementations always resolve to a plain string; any conversion from a
/// richer payload happens behind this seam, never in request handlers.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Run one prediction for `text`
    async fn predict(&self, text: &str) -> Result<String>;
}

/// HTTP client for the remote inference endpoint.
///
/// Immutable once constructed: holds the endpoint base URL and a bounded
/// per-call timeout. One call in flight per invocation, no retries.
#[derive(Debug)]
pub struct RemoteInferenceClient {
    client: Client,
    base_url: String,
}

impl RemoteInferenceClient {
    /// Construct a client and verify the endpoint is reachable.
    ///
    /// Probes `GET {base}/config` before returning; an unreachable or
    /// erroring endpoint fails construction, which the readiness
    /// controller records as `Failed`.
    pub async fn connect(config: &RemoteConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.predict_timeout)
            .build()
            .map_err(|e| ClientError::Http(format!("Failed to build HTTP client: {}", e)))?;

        let probe_url = format!("{}/config", config.base_url);
        debug!(url = %probe_url, "Probing remote inference endpoint");

        let response = client
            .get(&probe_url)
            .timeout(config.connect_timeout)
            .send()
            .await
            .map_err(|e| ClientError::Http(format!("Endpoint probe failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        info!(base_url = %config.base_url, "Remote inference endpoint reachable");

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Extract the first result element and resolve it to a string
    fn extract_result(body: Value) -> Result<String> {
        let first = body
            .get("data")
            .and_then(Value::as_array)
            .and_then(|data| data.first())
            .ok_or_else(|| {
                ClientError::MalformedResponse(format!(
                    "missing 'data' field in response: {}",
                    body
                ))
            })?;

        // Richer payloads (objects, numbers) are stringified here so the
        // handler only ever sees a string.
        Ok(match first {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

#[async_trait]
impl InferenceBackend for RemoteInferenceClient {
    async fn predict(&self, text: &str) -> Result<String> {
        let url = format!("{}/api/predict", self.base_url);
        let payload = json!({ "data": [text] });

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ClientError::Http(format!("Predict request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))?;

        Self::extract_result(body)
    }
}
