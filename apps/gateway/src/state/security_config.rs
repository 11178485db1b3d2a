use std::fmt;
use std::time::Duration;

use jsonwebtoken::Algorithm;

use crate::error::AppError;

/// Configuration for session token signing and verification
#[derive(Clone)]
pub struct SecurityConfig {
    /// HMAC secret for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// Value written to and required in the `iss` claim
    pub issuer: String,
    /// Validity window of a freshly issued session
    pub session_ttl: Duration,
    algorithm: Algorithm,
}

impl SecurityConfig {
    pub const DEFAULT_ISSUER: &'static str = "localhost:9000";
    pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);
    /// Longest session window configuration accepts: one year.
    pub const MAX_SESSION_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

    /// Create a new SecurityConfig with the given secret, HS256 and the default
    /// issuer and 30-minute session window.
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            issuer: Self::DEFAULT_ISSUER.to_string(),
            session_ttl: Self::DEFAULT_SESSION_TTL,
            algorithm: Algorithm::HS256,
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn with_session_ttl(mut self, session_ttl: Duration) -> Self {
        self.session_ttl = session_ttl;
        self
    }

    /// Select another member of the HMAC family.
    ///
    /// Asymmetric algorithms need key material this gateway never holds, so
    /// they are rejected here rather than at verification time.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Result<Self, AppError> {
        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {
                self.algorithm = algorithm;
                Ok(self)
            }
            other => Err(AppError::config(format!(
                "session tokens must use an HMAC algorithm, got {other:?}"
            ))),
        }
    }

    /// The only algorithm tokens are signed with and accepted under.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("session_ttl", &self.session_ttl)
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"default_secret_for_tests_only".to_vec())
    }
}
