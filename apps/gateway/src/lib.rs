#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod logging;
pub mod middleware;
pub mod pages;
pub mod routes;
pub mod session;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;

// Re-exports for public API
pub use auth::claims::SessionClaims;
pub use auth::error::SessionError;
pub use auth::jwt::TokenCodec;
pub use config::app::Config;
pub use error::AppError;
pub use extractors::session::CurrentSession;
pub use middleware::request_trace::RequestTrace;
pub use middleware::security_headers::SecurityHeaders;
pub use middleware::session_gate::SessionGate;
pub use middleware::structured_logger::StructuredLogger;
pub use middleware::trace_span::TraceSpan;
pub use session::cookie::CookiePolicy;
pub use session::identity::{AcceptAnyIdentity, IdentityProvider, LoginAttempt};
pub use session::lifecycle::SessionLifecycle;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    gateway_test_support::logging::init();
}
