//! User account operations
//!
//! Registration, login/logout, profile management, one-time codes, password
//! reset, and account activation. Credentials are validated client-side
//! before any network call; successful logins persist the token and identity
//! entries through the token manager.

use reqwest::multipart::{Form, Part};
use serde_json::json;

use crate::endpoints::users as paths;
use crate::error::Result;
use crate::http::HttpClient;
use crate::models::{Ack, AuthSession, Mutated, NewUser, ProfileUpdate, RefreshedToken, User};
use crate::validate;

/// Handle for user account operations
pub struct UsersApi<'a> {
    http: &'a HttpClient,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Register a new account and start its session
    pub async fn register(&self, new_user: &NewUser) -> Result<AuthSession> {
        validate::validate_registration(new_user)?;
        let session: AuthSession = self.http.post(paths::REGISTER, new_user).await?;
        self.remember(&session);
        Ok(session)
    }

    /// Exchange credentials for a session
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        validate::validate_login(email, password)?;
        let session: AuthSession = self
            .http
            .post(paths::LOGIN, &json!({ "email": email, "password": password }))
            .await?;
        self.remember(&session);
        Ok(session)
    }

    /// End the session.
    ///
    /// The local session is discarded whether or not the server call
    /// succeeds; the result reports the remote outcome.
    pub async fn logout(&self) -> Result<Ack> {
        let result = self.http.post_empty(paths::LOGOUT).await;
        self.http.tokens().clear_session();
        result
    }

    /// Fetch a member profile
    pub async fn profile(&self, user_id: &str) -> Result<User> {
        self.http.get(&paths::profile(user_id)).await
    }

    /// Edit a member profile
    pub async fn update_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> Result<Mutated<User>> {
        self.http.put(&paths::edit(user_id), update).await
    }

    /// Upload a profile photo
    pub async fn upload_avatar(
        &self,
        user_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Mutated<User>> {
        let form = Form::new().part("avatar", Part::bytes(bytes).file_name(file_name.to_string()));
        self.http.post_multipart(&paths::avatar(user_id), form).await
    }

    /// Send a one-time code to an email address
    pub async fn send_otp(&self, email: &str) -> Result<Ack> {
        validate::validate_email(email)?;
        self.http.post(paths::SEND_OTP, &json!({ "email": email })).await
    }

    /// Verify a one-time code
    pub async fn verify_otp(&self, email: &str, code: &str) -> Result<Ack> {
        self.http
            .post(paths::VERIFY_OTP, &json!({ "email": email, "code": code }))
            .await
    }

    /// Reset a password using a verified code
    pub async fn reset_password(&self, email: &str, code: &str, new_password: &str) -> Result<Ack> {
        validate::validate_email(email)?;
        validate::validate_password(new_password)?;
        self.http
            .post(
                paths::RESET_PASSWORD,
                &json!({ "email": email, "code": code, "password": new_password }),
            )
            .await
    }

    /// Activate a freshly registered account
    pub async fn activate(&self, activation_token: &str) -> Result<Ack> {
        self.http.post_empty(&paths::activate(activation_token)).await
    }

    /// Issue a fresh token for the current session, keeping identity entries
    pub async fn refresh_session(&self) -> Result<()> {
        let refreshed: RefreshedToken = self.http.post_empty(paths::REFRESH).await?;
        self.http.tokens().store_token(&refreshed.token);
        Ok(())
    }

    fn remember(&self, session: &AuthSession) {
        self.http.tokens().store_login(
            &session.token,
            &session.user.id,
            &session.user.email,
            &session.user.name,
        );
    }
}
