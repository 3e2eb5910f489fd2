pub mod cache;
pub mod config;
pub mod error;
pub mod expander;
pub mod orchestrator;
pub mod retry;
pub mod scorer;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;

pub use config::{DiscoveryConfig, RetryPolicy};
pub use error::DiscoveryError;
pub use orchestrator::DiscoveryOrchestrator;
pub use store::PgSnapshotStore;
