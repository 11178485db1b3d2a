use std::sync::Arc;

use super::security_config::SecurityConfig;
use crate::config::app::Config;
use crate::session::cookie::CookiePolicy;
use crate::session::identity::{AcceptAnyIdentity, IdentityProvider};
use crate::session::lifecycle::SessionLifecycle;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    /// Security configuration the session codec was built from
    pub security: SecurityConfig,
    /// Issues, validates and clears sessions
    pub sessions: SessionLifecycle,
    /// Decides who a login is for
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    pub fn new(
        security: SecurityConfig,
        cookies: CookiePolicy,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        let sessions = SessionLifecycle::new(&security, cookies);
        Self {
            security,
            sessions,
            identity,
        }
    }

    /// State with the default cookie policy and the accept-any identity provider
    pub fn with_security(security: SecurityConfig) -> Self {
        Self::new(
            security,
            CookiePolicy::default(),
            Arc::new(AcceptAnyIdentity::default()),
        )
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.security.clone(),
            CookiePolicy::new(config.cookie_domain.clone()),
            Arc::new(AcceptAnyIdentity::new(config.default_identity.clone())),
        )
    }
}
