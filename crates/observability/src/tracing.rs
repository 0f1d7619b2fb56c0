//! Utility functions for tracing

/// Create a span for one chat turn
///
/// # Example
///
/// ```rust
/// use renshu_observability::chat_turn_span;
///
/// let span = chat_turn_span!("Qwen/Qwen2.5-72B-Instruct", 4usize);
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! chat_turn_span {
    ($model:expr, $history_len:expr) => {
        tracing::info_span!(
            "chat.turn",
            llm.model = $model,
            history.len = $history_len,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
            turn.duration_ms = tracing::field::Empty,
        )
    };
}

/// Create a span with common HTTP request fields
///
/// # Example
///
/// ```rust
/// use renshu_observability::http_request_span;
///
/// let span = http_request_span!("POST", "/api/chat");
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! http_request_span {
    ($method:expr, $path:expr) => {
        tracing::info_span!(
            "http.request",
            http.method = %$method,
            http.route = %$path,
            http.status_code = tracing::field::Empty,
        )
    };
}

/// Record an error on the current span
///
/// # Example
///
/// ```rust
/// use renshu_observability::record_error;
///
/// let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
/// record_error(&err);
/// ```
pub fn record_error<E: std::error::Error>(error: &E) {
    let span = tracing::Span::current();
    span.record("error", true);
    span.record("error.message", error.to_string());
    tracing::error!(error = %error, "Operation failed");
}

/// Record latency/duration on the current span
///
/// # Example
///
/// ```rust
/// use renshu_observability::record_duration;
/// use std::time::Instant;
///
/// let start = Instant::now();
/// record_duration("turn.duration_ms", start.elapsed());
/// ```
pub fn record_duration(key: &str, duration: std::time::Duration) {
    let span = tracing::Span::current();
    span.record(key, duration.as_millis() as u64);
}
