use crate::client::{ClientError, InferenceBackend, RemoteInferenceClient};
use crate::config::RemoteConfig;
use futures::future::BoxFuture;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{error, info};

/// Lifecycle state of the remote inference client.
///
/// Transitions only `Uninitialized → Initializing → {Ready | Failed}`;
/// there is no way out of `Ready` or `Failed` and no re-initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadinessState {
    /// No initialization attempt has started
    Uninitialized,
    /// Client construction is in flight on a background task
    Initializing,
    /// Client constructed; predict traffic may flow
    Ready,
    /// Client construction failed with the given reason
    Failed(String),
}

impl ReadinessState {
    /// Short lowercase label for status payloads
    pub fn label(&self) -> &'static str {
        match self {
            ReadinessState::Uninitialized => "uninitialized",
            ReadinessState::Initializing => "initializing",
            ReadinessState::Ready => "ready",
            ReadinessState::Failed(_) => "failed",
        }
    }
}

impl fmt::Display for ReadinessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Constructs the backend; runs at most once per process
pub type BackendFactory =
    Box<dyn Fn() -> BoxFuture<'static, Result<Arc<dyn InferenceBackend>, ClientError>> + Send + Sync>;

struct Inner {
    state: ReadinessState,
    backend: Option<Arc<dyn InferenceBackend>>,
}

/// Owns the readiness lifecycle of the remote client.
///
/// Single writer (the initialization task), many readers (request
/// handlers and probes). The `Uninitialized → Initializing` transition is
/// checked-and-set under the write lock, so concurrent triggers launch
/// exactly one factory run.
pub struct ReadinessController {
    inner: RwLock<Inner>,
    factory: BackendFactory,
}

impl ReadinessController {
    /// Controller with a custom backend factory
    pub fn new(factory: BackendFactory) -> Self {
        Self {
            inner: RwLock::new(Inner {
                state: ReadinessState::Uninitialized,
                backend: None,
            }),
            factory,
        }
    }

    /// Controller wired to the real remote endpoint
    pub fn for_remote(config: RemoteConfig) -> Self {
        Self::new(Box::new(move || {
            let config = config.clone();
            Box::pin(async move {
                let client = RemoteInferenceClient::connect(&config).await?;
                Ok(Arc::new(client) as Arc<dyn InferenceBackend>)
            })
        }))
    }

    /// Controller already in `Ready` with the given backend; test seam
    pub fn ready_with(backend: Arc<dyn InferenceBackend>) -> Self {
        let controller = Self::new(no_factory());
        {
            let mut inner = controller.write();
            inner.state = ReadinessState::Ready;
            inner.backend = Some(backend);
        }
        controller
    }

    /// Controller pinned to an arbitrary state with no backend; test seam
    pub fn in_state(state: ReadinessState) -> Self {
        let controller = Self::new(no_factory());
        controller.write().state = state;
        controller
    }

    /// Start client construction on a background task.
    ///
    /// Exactly-once: returns `true` only for the single call that wins the
    /// `Uninitialized → Initializing` transition; every other call, in any
    /// state, is a no-op returning `false`. Never blocks on the
    /// construction itself.
    pub fn begin_initialization(self: Arc<Self>) -> bool {
        if !self.try_begin() {
            return false;
        }

        tokio::spawn(async move {
            self.run_initialization().await;
        });
        true
    }

    /// Run client construction inline and return the resulting state.
    ///
    /// Used by the eager strategy; subject to the same exactly-once guard
    /// as `begin_initialization`.
    pub async fn initialize(&self) -> ReadinessState {
        if self.try_begin() {
            self.run_initialization().await;
        }
        self.current_state()
    }

    /// Latest committed state; non-blocking, never waits on initialization
    pub fn current_state(&self) -> ReadinessState {
        self.read().state.clone()
    }

    /// Backend handle, present iff the state is `Ready`
    pub fn backend(&self) -> Option<Arc<dyn InferenceBackend>> {
        self.read().backend.clone()
    }

    /// Claim the `Uninitialized → Initializing` transition
    fn try_begin(&self) -> bool {
        let mut inner = self.write();
        if inner.state == ReadinessState::Uninitialized {
            inner.state = ReadinessState::Initializing;
            true
        } else {
            false
        }
    }

    /// Construct the backend and commit `Ready` or `Failed`.
    ///
    /// Only reached by the caller that won `try_begin`, so this is the
    /// sole writer past `Initializing`.
    async fn run_initialization(&self) {
        info!("Initializing remote inference client");

        match (self.factory)().await {
            Ok(backend) => {
                let mut inner = self.write();
                inner.backend = Some(backend);
                inner.state = ReadinessState::Ready;
                info!("Remote inference client ready");
            }
            Err(e) => {
                let reason = e.to_string();
                error!(error = %reason, "Remote inference client initialization failed");
                self.write().state = ReadinessState::Failed(reason);
            }
        }
    }

    // State writes are plain assignments, so a poisoned lock still holds a
    // coherent snapshot; recover it instead of propagating the panic.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn no_factory() -> BackendFactory {
    Box::new(|| {
        Box::pin(async { Err(ClientError::Http("no backend factory configured".to_string())) })
    })
}
