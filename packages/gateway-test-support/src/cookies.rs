//! `Set-Cookie` helpers for asserting on session cookies in responses.

use actix_web::cookie::Cookie;
use actix_web::http::header::{HeaderMap, SET_COOKIE};

/// Find the cookie called `name` among the response's `Set-Cookie` headers.
///
/// Panics if a matching header is not valid UTF-8 or does not parse.
pub fn find_set_cookie(headers: &HeaderMap, name: &str) -> Option<Cookie<'static>> {
    headers
        .get_all(SET_COOKIE)
        .map(|value| {
            let raw = value
                .to_str()
                .expect("Set-Cookie header should be valid UTF-8")
                .to_string();
            Cookie::parse(raw).expect("Set-Cookie header should parse")
        })
        .find(|cookie| cookie.name() == name)
}

/// Like [`find_set_cookie`] but panics when the cookie is absent.
pub fn expect_set_cookie(headers: &HeaderMap, name: &str) -> Cookie<'static> {
    find_set_cookie(headers, name)
        .unwrap_or_else(|| panic!("response should set the `{name}` cookie"))
}
