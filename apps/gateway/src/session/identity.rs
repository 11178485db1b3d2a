//! Identity resolution for login.
//!
//! The gateway keeps no user store. Whatever decides who a caller is plugs in
//! behind [`IdentityProvider`]; the session is minted for the subject it
//! returns.

use async_trait::async_trait;
use serde::Deserialize;

use crate::auth::error::SessionError;
use crate::error::AppError;

/// Longest subject accepted from a login attempt.
pub const MAX_SUBJECT_LEN: usize = 128;

/// Fields a caller may supply to `/login`, from the query string or a form body.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct LoginAttempt {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginAttempt {
    /// The requested username, trimmed, when non-blank.
    pub fn requested_username(&self) -> Option<&str> {
        self.username
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve the subject a new session is issued for.
    ///
    /// Returning `SessionError::CredentialsRejected` (as `AppError`) refuses
    /// the login without issuing a cookie.
    async fn authenticate(&self, attempt: &LoginAttempt) -> Result<String, AppError>;
}

/// Accepts every caller: the supplied username when present, otherwise a
/// fixed default subject. A stand-in until real credential checks exist.
#[derive(Debug, Clone)]
pub struct AcceptAnyIdentity {
    default_subject: String,
}

impl AcceptAnyIdentity {
    pub const DEFAULT_SUBJECT: &'static str = "TestUser";

    pub fn new(default_subject: impl Into<String>) -> Self {
        Self {
            default_subject: default_subject.into(),
        }
    }
}

impl Default for AcceptAnyIdentity {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SUBJECT)
    }
}

#[async_trait]
impl IdentityProvider for AcceptAnyIdentity {
    async fn authenticate(&self, attempt: &LoginAttempt) -> Result<String, AppError> {
        let subject = attempt
            .requested_username()
            .unwrap_or(self.default_subject.as_str());

        if subject.trim().is_empty() {
            return Err(AppError::unauthorized(SessionError::CredentialsRejected));
        }
        if subject.chars().count() > MAX_SUBJECT_LEN {
            return Err(AppError::bad_request(
                "INVALID_USERNAME",
                format!("Username must be at most {MAX_SUBJECT_LEN} characters"),
            ));
        }

        Ok(subject.to_string())
    }
}
