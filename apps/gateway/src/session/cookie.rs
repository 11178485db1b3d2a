//! Cookie transport for session tokens.
//!
//! This layer only moves opaque token strings in and out of cookies; it never
//! looks at claims.

use actix_web::cookie::{Cookie, SameSite};
use actix_web::{HttpRequest, HttpResponseBuilder};
use time::OffsetDateTime;

use crate::auth::error::SessionError;

/// Name, scope and flags of the session cookie.
#[derive(Debug, Clone)]
pub struct CookiePolicy {
    pub name: String,
    pub path: String,
    /// `None` leaves the cookie host-only
    pub domain: Option<String>,
    pub secure: bool,
}

impl CookiePolicy {
    pub const DEFAULT_NAME: &'static str = "Auth";
    pub const DEFAULT_DOMAIN: &'static str = "127.0.0.1";

    pub fn new(domain: Option<String>) -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            path: "/".to_string(),
            domain,
            secure: true,
        }
    }

    /// The cookie carrying `token` until `expires`.
    pub fn session_cookie(&self, token: &str, expires: OffsetDateTime) -> Cookie<'static> {
        self.base(token.to_string()).expires(expires).finish()
    }

    /// A cookie that replaces the live one and is already expired.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        self.base(String::new())
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(time::Duration::ZERO)
            .finish()
    }

    /// Set the session cookie on `response`, expiring at `expires`.
    pub fn attach(&self, response: &mut HttpResponseBuilder, token: &str, expires: OffsetDateTime) {
        response.cookie(self.session_cookie(token, expires));
    }

    /// Raw token value carried by the request's session cookie.
    pub fn extract(&self, request: &HttpRequest) -> Result<String, SessionError> {
        request
            .cookie(&self.name)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(SessionError::NoSession)
    }

    /// Make the client drop its session cookie.
    pub fn clear(&self, response: &mut HttpResponseBuilder) {
        response.cookie(self.removal_cookie());
    }

    fn base(&self, value: String) -> actix_web::cookie::CookieBuilder<'static> {
        let mut builder = Cookie::build(self.name.clone(), value)
            .path(self.path.clone())
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax);
        if let Some(domain) = &self.domain {
            builder = builder.domain(domain.clone());
        }
        builder
    }
}

impl Default for CookiePolicy {
    fn default() -> Self {
        Self::new(Some(Self::DEFAULT_DOMAIN.to_string()))
    }
}
