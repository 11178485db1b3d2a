//! Gateway configuration loaded from environment variables.
//!
//! Everything is read and validated once at startup; any failure here is
//! fatal for the process.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;
use crate::session::cookie::CookiePolicy;
use crate::session::identity::AcceptAnyIdentity;
use crate::state::security_config::SecurityConfig;

/// PEM files the TLS listener is built from
#[derive(Debug, Clone)]
pub struct TlsPaths {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Config {
    // Server configuration
    pub host: String,
    pub port: u16,

    // Session configuration
    pub security: SecurityConfig,
    pub cookie_domain: Option<String>,
    pub default_identity: String,

    // Transport
    pub tls: TlsPaths,
}

impl Config {
    pub const MIN_SECRET_LEN: usize = 32;

    /// Load and validate configuration from the process environment
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load and validate configuration from `lookup`, which maps a variable
    /// name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("GATEWAY_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port_str = lookup("GATEWAY_PORT").unwrap_or_else(|| "8443".to_string());
        let port = port_str.parse::<u16>().map_err(|_| {
            AppError::config(format!(
                "GATEWAY_PORT must be a valid port number, got '{port_str}'"
            ))
        })?;

        let jwt_secret = match lookup("GATEWAY_JWT_SECRET") {
            Some(secret) if secret.len() >= Self::MIN_SECRET_LEN => secret,
            Some(_) => {
                return Err(AppError::config(format!(
                    "GATEWAY_JWT_SECRET is too short. It should be at least {} characters.",
                    Self::MIN_SECRET_LEN
                )))
            }
            None => return Err(AppError::config("GATEWAY_JWT_SECRET must be set.")),
        };

        let issuer =
            lookup("GATEWAY_ISSUER").unwrap_or_else(|| SecurityConfig::DEFAULT_ISSUER.to_string());

        let session_ttl = match lookup("GATEWAY_SESSION_TTL_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 && secs <= SecurityConfig::MAX_SESSION_TTL.as_secs() => {
                    Duration::from_secs(secs)
                }
                _ => {
                    return Err(AppError::config(format!(
                        "GATEWAY_SESSION_TTL_SECS must be between 1 and {} seconds, got '{raw}'",
                        SecurityConfig::MAX_SESSION_TTL.as_secs()
                    )))
                }
            },
            None => SecurityConfig::DEFAULT_SESSION_TTL,
        };

        // Set but empty means a host-only cookie
        let cookie_domain = match lookup("GATEWAY_COOKIE_DOMAIN") {
            Some(domain) if domain.trim().is_empty() => None,
            Some(domain) => Some(domain.trim().to_string()),
            None => Some(CookiePolicy::DEFAULT_DOMAIN.to_string()),
        };

        let default_identity = lookup("GATEWAY_DEFAULT_IDENTITY")
            .unwrap_or_else(|| AcceptAnyIdentity::DEFAULT_SUBJECT.to_string());

        let tls = TlsPaths {
            cert_path: lookup("GATEWAY_TLS_CERT")
                .unwrap_or_else(|| "cert/cert.pem".to_string())
                .into(),
            key_path: lookup("GATEWAY_TLS_KEY")
                .unwrap_or_else(|| "cert/key.pem".to_string())
                .into(),
        };

        Ok(Config {
            host,
            port,
            security: SecurityConfig::new(jwt_secret)
                .with_issuer(issuer)
                .with_session_ttl(session_ttl),
            cookie_domain,
            default_identity,
            tls,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::Config;
    use crate::error::AppError;
    use crate::state::security_config::SecurityConfig;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn load(vars: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("GATEWAY_JWT_SECRET", SECRET)]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8443);
        assert_eq!(config.security.issuer, "localhost:9000");
        assert_eq!(config.security.session_ttl.as_secs(), 30 * 60);
        assert_eq!(config.cookie_domain.as_deref(), Some("127.0.0.1"));
        assert_eq!(config.default_identity, "TestUser");
        assert_eq!(config.tls.cert_path.to_str(), Some("cert/cert.pem"));
        assert_eq!(config.tls.key_path.to_str(), Some("cert/key.pem"));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("GATEWAY_JWT_SECRET", SECRET),
            ("GATEWAY_HOST", "127.0.0.1"),
            ("GATEWAY_PORT", "9443"),
            ("GATEWAY_ISSUER", "gateway.test"),
            ("GATEWAY_SESSION_TTL_SECS", "60"),
            ("GATEWAY_COOKIE_DOMAIN", ""),
            ("GATEWAY_DEFAULT_IDENTITY", "guest"),
            ("GATEWAY_TLS_CERT", "/etc/tls/chain.pem"),
            ("GATEWAY_TLS_KEY", "/etc/tls/key.pem"),
        ])
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9443);
        assert_eq!(config.security.issuer, "gateway.test");
        assert_eq!(config.security.session_ttl.as_secs(), 60);
        assert_eq!(config.cookie_domain, None);
        assert_eq!(config.default_identity, "guest");
        assert_eq!(config.tls.cert_path.to_str(), Some("/etc/tls/chain.pem"));
    }

    #[test]
    fn test_missing_secret() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, AppError::Config { ref detail } if detail.contains("must be set")));
    }

    #[test]
    fn test_short_secret() {
        let err = load(&[("GATEWAY_JWT_SECRET", "secret")]).unwrap_err();
        assert!(matches!(err, AppError::Config { ref detail } if detail.contains("too short")));
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("GATEWAY_JWT_SECRET", SECRET), ("GATEWAY_PORT", "https")]).unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
    }

    #[test]
    fn test_invalid_ttl() {
        for ttl in ["0", "-5", "soon"] {
            let err = load(&[
                ("GATEWAY_JWT_SECRET", SECRET),
                ("GATEWAY_SESSION_TTL_SECS", ttl),
            ])
            .unwrap_err();
            assert!(matches!(err, AppError::Config { .. }), "ttl {ttl:?}");
        }
    }

    #[test]
    fn test_ttl_upper_bound() {
        let one_year = (365 * 24 * 60 * 60).to_string();
        let config = load(&[
            ("GATEWAY_JWT_SECRET", SECRET),
            ("GATEWAY_SESSION_TTL_SECS", one_year.as_str()),
        ])
        .unwrap();
        assert_eq!(config.security.session_ttl, SecurityConfig::MAX_SESSION_TTL);

        for ttl in ["31536001", "100000000000000", "18446744073709551615"] {
            let err = load(&[
                ("GATEWAY_JWT_SECRET", SECRET),
                ("GATEWAY_SESSION_TTL_SECS", ttl),
            ])
            .unwrap_err();
            assert!(matches!(err, AppError::Config { .. }), "ttl {ttl:?}");
        }
    }
}
