use crate::config::{InitStrategy, RemoteConfig};
use crate::readiness::ReadinessController;
use std::sync::Arc;

/// Axum application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Lifecycle owner of the remote inference client
    pub readiness: Arc<ReadinessController>,
    /// When client construction is triggered
    pub strategy: InitStrategy,
}

impl AppState {
    /// State wired to the real remote endpoint
    pub fn new(config: RemoteConfig, strategy: InitStrategy) -> Self {
        Self {
            readiness: Arc::new(ReadinessController::for_remote(config)),
            strategy,
        }
    }

    /// State around an existing controller; used by tests
    pub fn with_controller(readiness: Arc<ReadinessController>, strategy: InitStrategy) -> Self {
        Self {
            readiness,
            strategy,
        }
    }

    /// Under the lazy strategy, the first predict request starts
    /// initialization. Idempotent in every other state and strategy.
    pub fn trigger_lazy_init(&self) {
        if self.strategy == InitStrategy::Lazy {
            Arc::clone(&self.readiness).begin_initialization();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readiness::ReadinessState;

    #[test]
    fn test_new_state_starts_uninitialized() {
        let state = AppState::new(RemoteConfig::default(), InitStrategy::Background);
        assert_eq!(
            state.readiness.current_state(),
            ReadinessState::Uninitialized
        );
    }

    #[tokio::test]
    async fn test_lazy_trigger_starts_initialization() {
        let state = AppState::new(
            RemoteConfig::for_url("http://127.0.0.1:1"),
            InitStrategy::Lazy,
        );

        state.trigger_lazy_init();
        // Transition out of Uninitialized is immediate even though the
        // construction itself runs in the background.
        assert_ne!(
            state.readiness.current_state(),
            ReadinessState::Uninitialized
        );
    }

    #[tokio::test]
    async fn test_non_lazy_trigger_is_inert() {
        let state = AppState::new(
            RemoteConfig::for_url("http://127.0.0.1:1"),
            InitStrategy::Background,
        );

        state.trigger_lazy_init();
        assert_eq!(
            state.readiness.current_state(),
            ReadinessState::Uninitialized
        );
    }
}
