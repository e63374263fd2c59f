// src/common/run_mode.rs
//! Build/run mode detection.
//! Production mode marks the session cookie `Secure`.

use std::env;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Development,
    Production,
}

impl RunMode {
    /// Interprets an `APP_ENV` value. Anything other than `production`/`prod`
    /// is development.
    pub fn from_value(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("production") | Some("prod") => RunMode::Production,
            _ => RunMode::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == RunMode::Production
    }
}

/// Log run mode status on startup
pub fn print_run_mode_status(mode: RunMode) {
    match mode {
        RunMode::Production => info!("🔒 Production mode - session cookies are Secure"),
        RunMode::Development => {
            warn!("🔓 Development mode - session cookies are sent over plain HTTP");
        }
    }
}

/// CLI argument parsing for run mode
pub fn parse_run_mode_args<I>(args: I) -> Option<RunMode>
where
    I: IntoIterator<Item = String>,
{
    for arg in args {
        match arg.as_str() {
            "--dev" | "--development" => return Some(RunMode::Development),
            "--prod" | "--production" => return Some(RunMode::Production),
            _ => {}
        }
    }

    None
}

/// Override run mode from CLI args
pub fn apply_cli_override(mode: RunMode) -> RunMode {
    match parse_run_mode_args(env::args().skip(1)) {
        Some(cli_mode) => {
            info!(mode = ?cli_mode, "🔧 CLI override of APP_ENV");
            cli_mode
        }
        None => mode,
    }
}
