//! Client-side form validation
//!
//! Runs before any network call; violations surface as
//! `VALIDATION_ERROR`-coded [`ApiError`]s with no HTTP status.

use crate::error::{ApiError, Result};
use crate::models::NewUser;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

pub(crate) const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters.";
pub(crate) const EMAIL_INVALID: &str = "Please enter a valid email address.";

/// Check an email address for basic well-formedness
pub fn validate_email(email: &str) -> Result<()> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ApiError::validation(EMAIL_INVALID));
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') || domain.ends_with('.') {
        return Err(ApiError::validation(EMAIL_INVALID));
    }
    Ok(())
}

/// Check a password against the minimum length
pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::validation(PASSWORD_TOO_SHORT));
    }
    Ok(())
}

/// Validate login credentials
pub fn validate_login(email: &str, password: &str) -> Result<()> {
    validate_email(email)?;
    validate_password(password)
}

/// Validate a registration payload
pub fn validate_registration(new_user: &NewUser) -> Result<()> {
    if new_user.name.trim().is_empty() {
        return Err(ApiError::validation("Please enter your name."));
    }
    validate_email(&new_user.email)?;
    validate_password(&new_user.password)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_short_password_message() {
        let err = validate_login("a@b.com", "short").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Password must be at least 6 characters.");
        assert!(err.status.is_none());
    }

    #[test]
    fn test_six_character_password_passes() {
        assert!(validate_password("secret").is_ok());
    }

    #[test]
    fn test_email_shapes() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("a.b@clinic.example.org").is_ok());
        for bad in ["", "plain", "@b.com", "a@", "a@nodot", "a@dot."] {
            assert!(validate_email(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_registration_requires_name() {
        let user = NewUser {
            name: "  ".into(),
            email: "a@b.com".into(),
            password: "secret".into(),
            specialty: None,
            hospital: None,
        };
        assert!(validate_registration(&user).is_err());
    }
}
