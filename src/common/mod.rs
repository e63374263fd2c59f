// Common module - shared types and utilities across all modules

pub mod config;
pub mod error;
pub mod helpers;
pub mod query;
pub mod run_mode;
pub mod state;
pub mod validation;

// Re-export commonly used types for convenience
pub use config::AppConfig;
pub use error::ApiError;
pub use helpers::safe_token_log;
pub use query::QueryParams;
pub use state::{AppState, SharedState};
pub use validation::{ValidationResult, Validator};
