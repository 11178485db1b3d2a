//! Claims carried inside a session token.

use serde::{Deserialize, Serialize};

/// The authenticated identity embedded in a session token.
///
/// Fields are private: a minted token's claims never change, a new token
/// replaces an old one. Wire names follow the token format (`username`,
/// `iss`, `iat`, `exp`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(rename = "username")]
    subject: String,
    #[serde(rename = "iss")]
    issuer: String,
    /// Issued-at (seconds since epoch)
    #[serde(rename = "iat")]
    issued_at: i64,
    /// Expiry (seconds since epoch); the token is invalid at or after it
    #[serde(rename = "exp")]
    expires_at: i64,
}

impl SessionClaims {
    pub(crate) fn new(
        subject: impl Into<String>,
        issuer: impl Into<String>,
        issued_at: i64,
        expires_at: i64,
    ) -> Self {
        Self {
            subject: subject.into(),
            issuer: issuer.into(),
            issued_at,
            expires_at,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn issued_at(&self) -> i64 {
        self.issued_at
    }

    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    /// Whether the claims are expired at `now_secs` (seconds since epoch).
    pub fn is_expired_at(&self, now_secs: i64) -> bool {
        now_secs >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::SessionClaims;

    #[test]
    fn test_wire_names() {
        let claims = SessionClaims::new("TestUser", "localhost:9000", 100, 1900);
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json["username"], "TestUser");
        assert_eq!(json["iss"], "localhost:9000");
        assert_eq!(json["iat"], 100);
        assert_eq!(json["exp"], 1900);
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let claims = SessionClaims::new("TestUser", "issuer", 0, 1800);

        assert!(!claims.is_expired_at(1799));
        assert!(claims.is_expired_at(1800));
        assert!(claims.is_expired_at(1801));
    }
}
