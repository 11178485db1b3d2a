//! Task-local trace id for the request being handled.
//!
//! `RequestTrace` opens the scope; error rendering and security logs read it
//! without threading the id through every call.

use tokio::task_local;

task_local! {
    static TRACE_ID: String;
}

/// The current request's trace id, or `"unknown"` outside a request scope.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(Clone::clone)
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Run `future` with `trace_id` as the task-local trace id.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}

/// Run `f` synchronously with `trace_id` as the task-local trace id.
///
/// Middleware `call` bodies run before their future is first polled; this
/// covers that part of the request.
pub fn sync_with_trace_id<F, R>(trace_id: String, f: F) -> R
where
    F: FnOnce() -> R,
{
    TRACE_ID.sync_scope(trace_id, f)
}
