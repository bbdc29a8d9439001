//! Client configuration
//!
//! ## Table of Contents
//! - **ApiMode**: local dev-proxy routing vs the remote origin
//! - **ClientConfig**: base-origin resolution, timeout, debounce window

use std::env;
use std::time::Duration;

use tracing::warn;

/// Environment variable overriding the resolved API origin
pub const API_ENV: &str = "PALLICARE_API";

/// Environment variable selecting the API mode (`local` or `remote`)
pub const MODE_ENV: &str = "PALLICARE_ENV";

/// Same-origin rewrite path served by the local dev proxy
const LOCAL_BASE_URL: &str = "http://127.0.0.1:3000/api";

/// Production API origin
const REMOTE_BASE_URL: &str = "https://api.pallicare.network/api";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 400;

/// Execution mode deciding which base origin calls are made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMode {
    /// Local development; calls route through the same-origin proxy rewrite
    Local,
    /// Any other execution mode; calls go to the configured remote origin
    Remote,
}

impl ApiMode {
    /// Default base origin for the mode
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::Local => LOCAL_BASE_URL,
            Self::Remote => REMOTE_BASE_URL,
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "local" | "dev" | "development" => Some(Self::Local),
            "remote" | "prod" | "production" => Some(Self::Remote),
            _ => None,
        }
    }
}

/// Configuration for [`crate::PalliCareClient`] and its HTTP engine.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Execution mode used when no explicit base URL is set
    pub mode: ApiMode,
    /// Explicit base URL override (wins over mode and environment)
    pub base_url: Option<String>,
    /// Request timeout enforced by the HTTP client
    pub timeout: Duration,
    /// Debounce window applied by search sessions
    pub search_debounce: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            mode: ApiMode::Remote,
            base_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to defaults; an unrecognized mode value is
    /// logged and treated as remote.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(mode) = env::var(MODE_ENV) {
            match ApiMode::parse(&mode) {
                Some(parsed) => config.mode = parsed,
                None => warn!(value = %mode, "unrecognized {} value, assuming remote", MODE_ENV),
            }
        }

        if let Ok(url) = env::var(API_ENV) {
            if !url.is_empty() {
                config.base_url = Some(url);
            }
        }

        config
    }

    /// Set an explicit base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the execution mode
    pub fn with_mode(mut self, mode: ApiMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the search debounce window
    pub fn with_search_debounce(mut self, debounce: Duration) -> Self {
        self.search_debounce = debounce;
        self
    }

    /// Resolve the effective base URL: override > environment > mode default.
    ///
    /// Trailing slashes are trimmed so path joining stays predictable.
    pub fn resolved_base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| self.mode.default_base_url().to_string())
            .trim_end_matches('/')
            .to_string()
    }
}
