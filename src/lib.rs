pub mod api;
pub mod client;
pub mod config;
pub mod readiness;
pub mod state;

pub use config::{InitStrategy, RemoteConfig};
pub use readiness::{ReadinessController, ReadinessState};
pub use state::AppState;
