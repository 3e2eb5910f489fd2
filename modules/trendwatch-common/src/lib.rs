pub mod config;
pub mod scenarios;
pub mod services;
pub mod types;

pub use config::AppConfig;
pub use scenarios::{scenario_names, seeds_for};
pub use services::services_for;
pub use types::*;
