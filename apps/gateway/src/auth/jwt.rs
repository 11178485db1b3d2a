//! Session token codec.
//!
//! Tokens are compact JWTs signed with the HMAC secret from
//! [`SecurityConfig`]. Verification is pinned to the configured algorithm:
//! the `alg` named in the token header is read only to reject it when it
//! differs, before any signature check.

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Deserialize;

use crate::auth::claims::SessionClaims;
use crate::auth::error::SessionError;
use crate::state::security_config::SecurityConfig;

/// Mints and verifies session tokens with one process-wide secret.
///
/// Built once at startup and shared read-only between requests.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    issuer: String,
    validation: Validation,
}

#[derive(Deserialize)]
struct DeclaredHeader {
    alg: String,
}

impl TokenCodec {
    pub fn new(security: &SecurityConfig) -> Self {
        let algorithm = security.algorithm();

        let mut validation = Validation::new(algorithm);
        // Expiry is compared against the caller's clock in `verify_at`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_issuer(&[security.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss"]);

        Self {
            encoding_key: EncodingKey::from_secret(&security.jwt_secret),
            decoding_key: DecodingKey::from_secret(&security.jwt_secret),
            algorithm,
            issuer: security.issuer.clone(),
            validation,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Mint a signed token for `subject`, valid from `now` until `now + ttl`.
    ///
    /// Fails with `Signing` for a blank subject or an expiry that does not
    /// fit a timestamp; such a token could never verify.
    pub fn mint(&self, subject: &str, now: SystemTime, ttl: Duration) -> Result<String, SessionError> {
        if subject.trim().is_empty() {
            return Err(SessionError::Signing("subject must not be blank".to_string()));
        }

        let issued_at = now
            .duration_since(UNIX_EPOCH)
            .ok()
            .and_then(|d| i64::try_from(d.as_secs()).ok())
            .ok_or_else(|| SessionError::Signing("clock is outside the timestamp range".to_string()))?;
        let expires_at = i64::try_from(ttl.as_secs())
            .ok()
            .and_then(|ttl_secs| issued_at.checked_add(ttl_secs))
            .ok_or_else(|| SessionError::Signing("session expiry out of range".to_string()))?;

        let claims = SessionClaims::new(subject, self.issuer.as_str(), issued_at, expires_at);

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| SessionError::Signing(e.to_string()))
    }

    /// Verify a token against the wall clock.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, SessionError> {
        self.verify_at(token, SystemTime::now())
    }

    /// Verify a token as of `now`.
    ///
    /// Checks run in order: structure, declared algorithm, signature, issuer,
    /// expiry, subject.
    pub fn verify_at(&self, token: &str, now: SystemTime) -> Result<SessionClaims, SessionError> {
        let declared = declared_algorithm(token)?;
        match declared.parse::<Algorithm>() {
            Ok(algorithm) if algorithm == self.algorithm => {}
            _ => return Err(SessionError::AlgorithmMismatch { found: declared }),
        }

        let claims = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => SessionError::SignatureInvalid,
                jsonwebtoken::errors::ErrorKind::InvalidIssuer => SessionError::IssuerMismatch,
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidAlgorithm
                | jsonwebtoken::errors::ErrorKind::InvalidAlgorithmName => {
                    SessionError::AlgorithmMismatch {
                        found: declared.clone(),
                    }
                }
                _ => SessionError::MalformedToken(e.to_string()),
            })?;

        let now_secs = now
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        if claims.is_expired_at(now_secs) {
            return Err(SessionError::Expired);
        }

        if claims.subject().trim().is_empty() {
            return Err(SessionError::MalformedToken("empty subject".to_string()));
        }

        Ok(claims)
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.algorithm)
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

/// Read the `alg` a token's header declares without trusting anything else.
fn declared_algorithm(token: &str) -> Result<String, SessionError> {
    let mut segments = token.split('.');
    let (Some(header), Some(_payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(SessionError::MalformedToken(
            "expected three dot-separated segments".to_string(),
        ));
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|e| SessionError::MalformedToken(format!("header is not base64url: {e}")))?;
    let declared: DeclaredHeader = serde_json::from_slice(&bytes)
        .map_err(|e| SessionError::MalformedToken(format!("header is not valid JSON: {e}")))?;

    Ok(declared.alg)
}
