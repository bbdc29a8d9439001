//! Auth token lifecycle
//!
//! ## Table of Contents
//! - **TokenClaims**: the decoded JWT payload fields the client reads
//! - **TokenManager**: token fetch/validation/teardown over the session store

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::session::{keys, SessionStore, SESSION_KEYS};

/// JWT payload fields read client-side.
///
/// Everything is optional: a token missing its expiry is treated as expired
/// rather than rejected at the decode step.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Expiry timestamp (seconds since epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// Issued at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

/// Reads, writes, and validates the bearer token held in the session store.
///
/// The signing secret never reaches the client, so decoding skips signature
/// verification and only the expiry claim is consulted. Storage failures are
/// logged and treated as an absent token; nothing here panics or propagates
/// a store error.
#[derive(Clone)]
pub struct TokenManager {
    store: Arc<dyn SessionStore>,
}

impl TokenManager {
    /// Create a manager over a session store
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// The stored token, or `None` when absent or the store fails
    pub fn token(&self) -> Option<String> {
        match self.store.get(keys::TOKEN) {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "session store read failed, treating token as absent");
                None
            }
        }
    }

    /// The stored token, only when present and unexpired.
    ///
    /// This is the value attached as `Authorization: Bearer` by the HTTP
    /// client; requests go out unauthenticated in every other case.
    pub fn bearer(&self) -> Option<String> {
        self.token().filter(|t| !Self::is_token_expired(t))
    }

    /// Whether a token is expired.
    ///
    /// Fails closed: an undecodable token or a missing expiry claim counts
    /// as expired.
    pub fn is_token_expired(token: &str) -> bool {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        let no_claims: &[&str] = &[];
        validation.set_required_spec_claims(no_claims);

        let decoded = match decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        {
            Ok(data) => data,
            Err(e) => {
                debug!(error = %e, "token decode failed, treating as expired");
                return true;
            }
        };

        match decoded.claims.exp {
            Some(exp) => exp <= Utc::now().timestamp(),
            None => true,
        }
    }

    /// Whether an unexpired token is currently stored
    pub fn is_authenticated(&self) -> bool {
        self.bearer().is_some()
    }

    /// The stored user id, if any
    pub fn user_id(&self) -> Option<String> {
        self.store.get(keys::USER_ID).ok().flatten()
    }

    /// Persist the token and identity entries from a successful login.
    ///
    /// The entries are written together with a fresh last-login timestamp.
    pub fn store_login(&self, token: &str, user_id: &str, email: &str, display_name: &str) {
        let now = Utc::now().to_rfc3339();
        let entries = [
            (keys::TOKEN, token),
            (keys::USER_ID, user_id),
            (keys::EMAIL, email),
            (keys::DISPLAY_NAME, display_name),
            (keys::LAST_LOGIN, now.as_str()),
        ];
        for (key, value) in entries {
            if let Err(e) = self.store.put(key, value) {
                warn!(key, error = %e, "session store write failed");
            }
        }
    }

    /// Replace only the stored token, keeping identity entries
    pub fn store_token(&self, token: &str) {
        if let Err(e) = self.store.put(keys::TOKEN, token) {
            warn!(error = %e, "session store write failed");
        }
    }

    /// Remove the stored token; never fails outward
    pub fn clear_token(&self) {
        if let Err(e) = self.store.remove(keys::TOKEN) {
            warn!(error = %e, "session store remove failed");
        }
    }

    /// Remove the token and every identity entry together
    pub fn clear_session(&self) {
        for key in SESSION_KEYS {
            if let Err(e) = self.store.remove(key) {
                warn!(key, error = %e, "session store remove failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemorySessionStore, MockSessionStore, StoreError};
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token_with_exp(exp: Option<i64>) -> String {
        let claims = TokenClaims {
            sub: Some("u-1".into()),
            exp,
            iat: Some(Utc::now().timestamp()),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap()
    }

    #[test]
    fn test_future_expiry_is_valid() {
        let token = token_with_exp(Some(Utc::now().timestamp() + 3600));
        assert!(!TokenManager::is_token_expired(&token));
    }

    #[test]
    fn test_past_expiry_is_expired() {
        let token = token_with_exp(Some(Utc::now().timestamp() - 10));
        assert!(TokenManager::is_token_expired(&token));
    }

    #[test]
    fn test_missing_claim_and_garbage_fail_closed() {
        assert!(TokenManager::is_token_expired(&token_with_exp(None)));
        assert!(TokenManager::is_token_expired("not-a-jwt"));
        assert!(TokenManager::is_token_expired(""));
        assert!(TokenManager::is_token_expired("a.b.c"));
    }

    #[test]
    fn test_bearer_filters_expired_tokens() {
        let store = Arc::new(MemorySessionStore::new());
        let tokens = TokenManager::new(store);

        assert!(tokens.bearer().is_none());

        tokens.store_token(&token_with_exp(Some(Utc::now().timestamp() - 10)));
        assert!(tokens.bearer().is_none());
        assert!(!tokens.is_authenticated());

        let valid = token_with_exp(Some(Utc::now().timestamp() + 3600));
        tokens.store_token(&valid);
        assert_eq!(tokens.bearer().as_deref(), Some(valid.as_str()));
        assert!(tokens.is_authenticated());
    }

    #[test]
    fn test_store_login_and_clear_session() {
        let store = Arc::new(MemorySessionStore::new());
        let tokens = TokenManager::new(store.clone());

        let valid = token_with_exp(Some(Utc::now().timestamp() + 3600));
        tokens.store_login(&valid, "u-7", "a@b.com", "Dr. A");

        assert_eq!(tokens.user_id().as_deref(), Some("u-7"));
        assert!(store.get(keys::EMAIL).unwrap().is_some());
        assert!(store.get(keys::LAST_LOGIN).unwrap().is_some());

        tokens.clear_session();
        for key in SESSION_KEYS {
            assert!(store.get(key).unwrap().is_none(), "key {} survived", key);
        }
    }

    #[test]
    fn test_store_failure_reads_as_absent() {
        let mut mock = MockSessionStore::new();
        mock.expect_get()
            .returning(|_| Err(StoreError::Backend("storage unavailable".into())));
        let tokens = TokenManager::new(Arc::new(mock));

        assert!(tokens.token().is_none());
        assert!(tokens.bearer().is_none());
    }

    #[test]
    fn test_clear_session_swallows_store_failures() {
        let mut mock = MockSessionStore::new();
        mock.expect_remove()
            .times(SESSION_KEYS.len())
            .returning(|_| Err(StoreError::Backend("storage unavailable".into())));
        let tokens = TokenManager::new(Arc::new(mock));

        // Must not panic or propagate
        tokens.clear_session();
    }
}
