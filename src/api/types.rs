use serde::{Deserialize, Serialize};

/// Request body for `POST /predict`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    /// Input text to forward to the remote inference endpoint
    pub text: String,
}

/// Successful prediction response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Always true on the success path
    pub success: bool,
    /// Input length in UTF-16 code units, as validated
    pub input_length: usize,
    /// Result string from the remote endpoint
    pub result: String,
    /// Human-readable status message
    pub message: String,
}

/// Response for `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    /// Service status line
    pub status: String,
    /// Usage hint
    pub message: String,
    /// Crate version
    pub version: String,
}

/// Response for `GET /health` — pure liveness, independent of the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "healthy" once the process serves requests
    pub status: String,
    /// Crate version
    pub version: String,
}

/// Response for `GET /ready`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyResponse {
    /// Whether the backend client is constructed and usable
    pub ready: bool,
    /// Current readiness state label
    pub state: String,
    /// Failure reason, present iff the state is failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
