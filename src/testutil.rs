//! Shared helpers for the in-process stub servers used by wire-path tests.

use std::future::IntoFuture;

use axum::Router;
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};

use crate::token::TokenClaims;

/// Serve a router on an ephemeral local port; returns the base URL.
pub(crate) async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(axum::serve(listener, router).into_future());
    format!("http://{}", addr)
}

/// A signed JWT whose expiry sits `exp_offset_secs` from now.
pub(crate) fn jwt(exp_offset_secs: i64) -> String {
    let claims = TokenClaims {
        sub: Some("u-1".into()),
        exp: Some(Utc::now().timestamp() + exp_offset_secs),
        iat: Some(Utc::now().timestamp()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"stub-secret"),
    )
    .unwrap()
}
