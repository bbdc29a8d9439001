//! Domain API modules
//!
//! One module per business area, each exposing async functions that resolve
//! an endpoint registry entry and flow through the shared [`HttpClient`].
//! Every function returns `Result<T, ApiError>`; no raw transport error and
//! no panic ever escapes to the layer above.
//!
//! ## Table of Contents
//! - **PalliCareClient**: facade owning the HTTP engine and session
//! - **ListFallback**: explicit fail-soft helper for list-rendering contexts

use std::sync::Arc;

use tracing::warn;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::HttpClient;
use crate::search::SearchSession;
use crate::session::{FileSessionStore, MemorySessionStore, SessionStore};
use crate::token::TokenManager;

pub mod blog;
pub mod members;
pub mod resources;
pub mod threads;
pub mod units;
pub mod users;

pub use blog::BlogApi;
pub use members::MembersApi;
pub use resources::ResourcesApi;
pub use threads::{SortOrder, ThreadQuery, ThreadsApi};
pub use units::UnitsApi;
pub use users::UsersApi;

/// Entry point for the whole client surface.
///
/// Owns the configured HTTP engine and session; domain handles borrow it.
pub struct PalliCareClient {
    http: HttpClient,
    config: ClientConfig,
}

impl PalliCareClient {
    /// Create a client with the default persistent session store.
    ///
    /// Falls back to an in-memory store on platforms without a config
    /// directory.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let store: Arc<dyn SessionStore> = match FileSessionStore::new() {
            Some(file) => Arc::new(file),
            None => {
                warn!("no platform config directory, session will not persist");
                Arc::new(MemorySessionStore::new())
            }
        };
        Self::with_store(config, store)
    }

    /// Create a client over an explicit session store
    pub fn with_store(config: ClientConfig, store: Arc<dyn SessionStore>) -> Result<Self> {
        let tokens = TokenManager::new(store);
        let http = HttpClient::new(&config, tokens)?;
        Ok(Self { http, config })
    }

    /// Create a client from environment configuration
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    /// Register the callback fired when a 401 tears down the session
    pub fn with_unauthorized_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.http = self.http.with_unauthorized_hook(hook);
        self
    }

    /// The underlying HTTP engine
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// The session/token manager
    pub fn tokens(&self) -> &TokenManager {
        self.http.tokens()
    }

    /// The active configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// A fresh debounced search session for one searchable surface
    pub fn search_session(&self) -> SearchSession {
        SearchSession::new(self.config.search_debounce)
    }

    /// User account operations
    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(&self.http)
    }

    /// Discussion forum operations
    pub fn threads(&self) -> ThreadsApi<'_> {
        ThreadsApi::new(&self.http)
    }

    /// Blog / news operations
    pub fn blog(&self) -> BlogApi<'_> {
        BlogApi::new(&self.http)
    }

    /// Resource library operations
    pub fn resources(&self) -> ResourcesApi<'_> {
        ResourcesApi::new(&self.http)
    }

    /// Member directory operations
    pub fn members(&self) -> MembersApi<'_> {
        MembersApi::new(&self.http)
    }

    /// Palliative-unit operations
    pub fn units(&self) -> UnitsApi<'_> {
        UnitsApi::new(&self.http)
    }
}

/// Explicit fail-soft fallback for list-rendering contexts.
///
/// A failed list fetch renders as an empty list after a logged warning.
/// Mutation confirmations must not use this; they propagate their error.
pub trait ListFallback<T> {
    /// The fetched items, or an empty list on failure
    fn or_empty(self) -> Vec<T>;
}

impl<T> ListFallback<T> for Result<Vec<T>> {
    fn or_empty(self) -> Vec<T> {
        match self {
            Ok(items) => items,
            Err(e) => {
                warn!(code = %e.code, error = %e, "list fetch failed, rendering empty");
                Vec::new()
            }
        }
    }
}
