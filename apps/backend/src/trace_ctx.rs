//! Task-local trace id for the request currently being served.
//!
//! `RequestTrace` establishes the scope; error rendering and log lines read it.
//! Outside a request (background tasks, unit tests) the id is `"unknown"`.

use std::future::Future;

use tokio::task_local;

task_local! {
    static TRACE_ID: String;
}

/// Trace id of the current task, or `"unknown"`.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(Clone::clone)
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Fresh random trace id.
pub fn new_trace_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Run `future` with `trace_id` installed as the task-local trace id.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}
