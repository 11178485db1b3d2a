use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Compiled patterns for values that must not reach the logs verbatim.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    /// Email addresses (subjects are often emails)
    pub fn email() -> &'static Regex {
        static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
        });
        &EMAIL_REGEX
    }

    /// Compact JWTs: three base64url segments joined by dots
    pub fn jwt() -> &'static Regex {
        static JWT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]*").unwrap()
        });
        &JWT_REGEX
    }

    /// Long base64-like runs (≥16 chars)
    pub fn opaque_token() -> &'static Regex {
        static OPAQUE_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9+/_-]{16,}={0,2}\b").unwrap()
        });
        &OPAQUE_TOKEN_REGEX
    }
}

/// Mask emails and tokens in `input`.
///
/// Emails keep the first character of the local part and the domain. JWTs
/// are replaced before other long tokens so a whole token becomes one marker.
pub fn redact(input: &str) -> String {
    let email_redacted = PiiRegexRegistry::email().replace_all(input, |caps: &regex::Captures| {
        let full_match = &caps[0];
        match full_match.split_once('@') {
            Some((local, domain)) => match local.chars().next() {
                Some(first) => format!("{first}***@{domain}"),
                None => format!("@{domain}"),
            },
            None => full_match.to_string(),
        }
    });

    let jwt_redacted = PiiRegexRegistry::jwt().replace_all(&email_redacted, "[REDACTED_JWT]");

    PiiRegexRegistry::opaque_token()
        .replace_all(&jwt_redacted, "[REDACTED_TOKEN]")
        .to_string()
}

/// Displays its value through [`redact`].
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
