//! Session failure taxonomy.
//!
//! Every variant stays distinguishable for logs; the HTTP boundary collapses
//! them into one unauthorized page (see [`crate::error::AppError`]).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("no session cookie present")]
    NoSession,
    #[error("token signature does not match")]
    SignatureInvalid,
    #[error("token declares algorithm `{found}` which is not accepted")]
    AlgorithmMismatch { found: String },
    #[error("token expired")]
    Expired,
    #[error("token issuer is not accepted")]
    IssuerMismatch,
    #[error("malformed token: {0}")]
    MalformedToken(String),
    #[error("credentials rejected")]
    CredentialsRejected,
    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl SessionError {
    /// Stable machine code used in structured logs.
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::NoSession => "NO_SESSION",
            SessionError::SignatureInvalid => "SIGNATURE_INVALID",
            SessionError::AlgorithmMismatch { .. } => "ALGORITHM_MISMATCH",
            SessionError::Expired => "EXPIRED",
            SessionError::IssuerMismatch => "ISSUER_MISMATCH",
            SessionError::MalformedToken(_) => "MALFORMED_TOKEN",
            SessionError::CredentialsRejected => "CREDENTIALS_REJECTED",
            SessionError::Signing(_) => "SIGNING_FAILED",
        }
    }

    /// Whether this is a server-side failure rather than a rejected client.
    pub fn is_internal(&self) -> bool {
        matches!(self, SessionError::Signing(_))
    }
}
