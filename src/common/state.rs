// Application state shared across all modules

use reqwest::Client;
use std::sync::Arc;

use super::config::{AppConfig, SessionConfig};
use crate::services::{HarvestClient, OAuthService};

/// Immutable per-process state. Requests share nothing mutable.
pub struct AppState {
    pub session: SessionConfig,
    pub oauth: OAuthService,
    pub harvest: HarvestClient,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Wires both Harvest clients onto one pooled HTTP client.
    pub fn new(config: &AppConfig, http: Client) -> Self {
        Self {
            session: config.session.clone(),
            oauth: OAuthService::new(http.clone(), config.harvest.clone()),
            harvest: HarvestClient::new(http, &config.harvest),
        }
    }

    pub fn shared(self) -> SharedState {
        Arc::new(self)
    }
}
