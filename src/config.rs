use clap::ValueEnum;
use std::time::Duration;

/// Default listening port when neither `--port` nor `PORT` is set
pub const DEFAULT_PORT: u16 = 5000;

/// Maximum accepted input length, measured in UTF-16 code units
pub const MAX_TEXT_LENGTH: usize = 10_000;

/// Base URL of the remote inference endpoint.
///
/// Fixed by design: the proxy fronts exactly one upstream service and
/// orchestration swaps the binary, not the target.
pub const DEFAULT_REMOTE_URL: &str = "https://dinesh03032005-topic-extension.hf.space";

/// When the remote client is constructed relative to serving traffic.
///
/// The controller is the same in all three modes; only the trigger moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InitStrategy {
    /// Construct the client before accepting traffic (startup blocks)
    Eager,
    /// Construct the client on a background task at process start
    Background,
    /// Construct the client when the first predict request arrives
    Lazy,
}

/// Connection parameters for the remote inference endpoint
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL of the upstream service
    pub base_url: String,
    /// Timeout applied to each predict call
    pub predict_timeout: Duration,
    /// Timeout applied to the construction-time reachability probe
    pub connect_timeout: Duration,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_REMOTE_URL.to_string(),
            predict_timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl RemoteConfig {
    /// Config pointed at an arbitrary base URL, keeping default timeouts
    pub fn for_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}
