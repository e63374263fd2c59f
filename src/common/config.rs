// Typed configuration loaded from the process environment

use std::env;
use std::fmt;
use std::time::Duration;

use super::run_mode::RunMode;

pub const DEFAULT_AUTHORIZE_URL: &str = "https://id.getharvest.com/oauth2/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://id.getharvest.com/api/v2/oauth2/token";
pub const DEFAULT_API_BASE_URL: &str = "https://api.harvestapp.com/v2";
pub const DEFAULT_USER_AGENT: &str = "harvest-time-api";
pub const DEFAULT_COOKIE_NAME: &str = "harvest_token";
pub const DEFAULT_SUCCESS_PATH: &str = "/auth-success";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:3001,http://localhost:5173";
const DEFAULT_PORT: u16 = 8080;

/// Harvest OAuth and REST API settings.
///
/// The three OAuth credentials are optional here: a missing credential only
/// fails the requests that need it, never the process.
#[derive(Clone)]
pub struct HarvestConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
    pub authorize_url: String,
    pub token_url: String,
    pub api_base_url: String,
    pub account_id: Option<String>,
    pub user_agent: String,
}

// The client secret never reaches logs.
impl fmt::Debug for HarvestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HarvestConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "***"))
            .field("redirect_uri", &self.redirect_uri)
            .field("authorize_url", &self.authorize_url)
            .field("token_url", &self.token_url)
            .field("api_base_url", &self.api_base_url)
            .field("account_id", &self.account_id)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Session cookie settings
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub secure: bool,
    pub success_path: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub harvest: HarvestConfig,
    pub session: SessionConfig,
    pub run_mode: RunMode,
    pub cors_origins: Vec<String>,
    pub port: u16,
    pub http_timeout: Option<Duration>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let run_mode = RunMode::from_value(var("APP_ENV").as_deref());

        let harvest = HarvestConfig {
            client_id: var("HARVEST_CLIENT_ID"),
            client_secret: var("HARVEST_CLIENT_SECRET"),
            redirect_uri: var("HARVEST_REDIRECT_URI"),
            authorize_url: var("HARVEST_AUTHORIZE_URL")
                .unwrap_or_else(|| DEFAULT_AUTHORIZE_URL.to_string()),
            token_url: var("HARVEST_TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            api_base_url: var("HARVEST_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            account_id: var("HARVEST_ACCOUNT_ID"),
            user_agent: var("HARVEST_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        };

        let session = SessionConfig {
            cookie_name: var("SESSION_COOKIE_NAME")
                .unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string()),
            secure: run_mode.is_production(),
            success_path: var("AUTH_SUCCESS_PATH")
                .unwrap_or_else(|| DEFAULT_SUCCESS_PATH.to_string()),
        };

        let cors_origins = parse_origins(
            &var("CORS_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string()),
        );

        let port = var("PORT")
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let http_timeout = var("HTTP_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Self {
            harvest,
            session,
            run_mode,
            cors_origins,
            port,
            http_timeout,
        }
    }

    /// Re-derives everything that depends on the run mode.
    pub fn with_run_mode(mut self, run_mode: RunMode) -> Self {
        self.run_mode = run_mode;
        self.session.secure = run_mode.is_production();
        self
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
