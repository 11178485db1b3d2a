//! Session issuance, validation and invalidation.
//!
//! Sessions are stateless: everything needed to validate one travels in the
//! signed cookie, so nothing here is mutated after construction.

use std::time::{Duration, SystemTime};

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse};
use time::OffsetDateTime;

use crate::auth::claims::SessionClaims;
use crate::auth::error::SessionError;
use crate::auth::jwt::TokenCodec;
use crate::logging::security;
use crate::pages;
use crate::session::cookie::CookiePolicy;
use crate::state::security_config::SecurityConfig;

/// Where a successful login sends the client.
pub const PROFILE_PATH: &str = "/profile";

#[derive(Debug, Clone)]
pub struct SessionLifecycle {
    codec: TokenCodec,
    cookies: CookiePolicy,
    ttl: Duration,
}

impl SessionLifecycle {
    pub fn new(security: &SecurityConfig, cookies: CookiePolicy) -> Self {
        Self {
            codec: TokenCodec::new(security),
            cookies,
            ttl: security.session_ttl,
        }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn cookies(&self) -> &CookiePolicy {
        &self.cookies
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a session for `subject` and redirect to the profile.
    ///
    /// The redirect is a 307 so a POSTed login is replayed as a POST.
    pub fn login(&self, subject: &str, now: SystemTime) -> Result<HttpResponse, SessionError> {
        let token = self.codec.mint(subject, now, self.ttl)?;
        let expires = cookie_expiry(now, self.ttl)?;

        let mut response = HttpResponse::TemporaryRedirect();
        response.insert_header((header::LOCATION, PROFILE_PATH));
        self.cookies.attach(&mut response, &token, expires);

        security::session_issued(subject, self.ttl);
        Ok(response.finish())
    }

    /// Extract and verify the session carried by `request` as of `now`.
    pub fn validate(
        &self,
        request: &HttpRequest,
        now: SystemTime,
    ) -> Result<SessionClaims, SessionError> {
        let token = self.cookies.extract(request)?;
        self.codec.verify_at(&token, now)
    }

    /// Replace the client's session cookie with an expired one.
    pub fn logout(&self, claims: &SessionClaims) -> HttpResponse {
        let mut response = HttpResponse::Ok();
        response.content_type("text/html; charset=utf-8");
        self.cookies.clear(&mut response);

        security::session_cleared(claims.subject());
        response.body(pages::LOGGED_OUT)
    }
}

/// `now + ttl` as a cookie expiry, when that instant is representable.
fn cookie_expiry(now: SystemTime, ttl: Duration) -> Result<OffsetDateTime, SessionError> {
    time::Duration::try_from(ttl)
        .ok()
        .and_then(|ttl| OffsetDateTime::from(now).checked_add(ttl))
        .ok_or_else(|| SessionError::Signing("session expiry out of range".to_string()))
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use actix_web::cookie::Cookie;
    use actix_web::http::header::{LOCATION, SET_COOKIE};
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;

    use super::SessionLifecycle;
    use crate::auth::error::SessionError;
    use crate::session::cookie::CookiePolicy;
    use crate::state::security_config::SecurityConfig;

    fn lifecycle() -> SessionLifecycle {
        SessionLifecycle::new(&SecurityConfig::default(), CookiePolicy::default())
    }

    fn set_cookie(resp: &actix_web::HttpResponse) -> Cookie<'static> {
        let raw = resp.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        Cookie::parse(raw.to_string()).unwrap()
    }

    #[test]
    fn test_login_redirects_with_cookie() {
        let lifecycle = lifecycle();
        let resp = lifecycle.login("TestUser", SystemTime::now()).unwrap();

        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(resp.headers().get(LOCATION).unwrap(), "/profile");

        let cookie = set_cookie(&resp);
        assert_eq!(cookie.name(), "Auth");
        let claims = lifecycle.codec().verify(cookie.value()).unwrap();
        assert_eq!(claims.subject(), "TestUser");
    }

    #[test]
    fn test_validate_roundtrip_and_expiry() {
        let lifecycle = lifecycle();
        let issued = SystemTime::now();
        let resp = lifecycle.login("TestUser", issued).unwrap();
        let cookie = set_cookie(&resp);

        let req = TestRequest::default().cookie(cookie).to_http_request();
        assert_eq!(
            lifecycle.validate(&req, issued).unwrap().subject(),
            "TestUser"
        );
        assert_eq!(
            lifecycle.validate(&req, issued + Duration::from_secs(31 * 60)),
            Err(SessionError::Expired)
        );
    }

    #[test]
    fn test_login_with_unrepresentable_ttl_fails_cleanly() {
        for secs in [100_000_000_000_000, u64::MAX] {
            let security = SecurityConfig::default().with_session_ttl(Duration::from_secs(secs));
            let lifecycle = SessionLifecycle::new(&security, CookiePolicy::default());

            assert!(
                matches!(
                    lifecycle.login("TestUser", SystemTime::now()),
                    Err(SessionError::Signing(_))
                ),
                "ttl {secs}"
            );
        }
    }

    #[test]
    fn test_validate_without_cookie() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(
            lifecycle().validate(&req, SystemTime::now()),
            Err(SessionError::NoSession)
        );
    }

    #[test]
    fn test_logout_clears_cookie() {
        let lifecycle = lifecycle();
        let token = lifecycle
            .codec()
            .mint("TestUser", SystemTime::now(), lifecycle.ttl())
            .unwrap();
        let claims = lifecycle.codec().verify(&token).unwrap();

        let resp = lifecycle.logout(&claims);
        assert_eq!(resp.status(), StatusCode::OK);

        let cookie = set_cookie(&resp);
        assert_eq!(cookie.name(), "Auth");
        assert_eq!(cookie.value(), "");
        assert!(cookie.expires_datetime().unwrap() < time::OffsetDateTime::now_utc());
    }
}
