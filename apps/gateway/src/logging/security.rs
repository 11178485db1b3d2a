use std::time::Duration;

use tracing::{info, warn};

use crate::auth::error::SessionError;
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Log a newly issued session.
pub fn session_issued(subject: &str, ttl: Duration) {
    let trace_id = trace_ctx::trace_id();

    info!(
        event = "SECURITY_SESSION_ISSUED",
        %trace_id,
        subject = %Redacted(subject),
        ttl_secs = ttl.as_secs(),
        "Session issued"
    );
}

/// Log a request turned away by the session gate, keeping the precise cause.
pub fn session_rejected(reason: &SessionError, path: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_SESSION_REJECTED",
        %trace_id,
        reason = reason.code(),
        detail = %reason,
        path,
        "Session rejected"
    );
}

/// Log an explicit logout.
pub fn session_cleared(subject: &str) {
    let trace_id = trace_ctx::trace_id();

    info!(
        event = "SECURITY_SESSION_CLEARED",
        %trace_id,
        subject = %Redacted(subject),
        "Session cleared"
    );
}
