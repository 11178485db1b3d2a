#![allow(dead_code)]

use std::time::SystemTime;

use actix_web::cookie::Cookie;
use gateway::{AppState, SecurityConfig};

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes_only";

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    gateway_test_support::logging::init();
}

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET.as_bytes())
}

pub fn test_state() -> AppState {
    AppState::with_security(test_security())
}

/// A session cookie for `subject` minted directly through the state's codec.
pub fn session_cookie_for(state: &AppState, subject: &str, issued: SystemTime) -> Cookie<'static> {
    let token = state
        .sessions
        .codec()
        .mint(subject, issued, state.sessions.ttl())
        .expect("mint test token");
    Cookie::new("Auth", token)
}
