//! Session-gateway error taxonomy.
//!
//! ERROR HANDLING
//! ==============
//! Every gateway call returns `Result<T, GatewayError>` so pages can branch
//! on what actually went wrong instead of string-matching. The variants that
//! matter to the join flow get their own arm (not found, closed, conflict,
//! rejected credential); everything else collapses into `Http`/`Transport`,
//! the only two arms worth retrying.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use thiserror::Error;

/// Failure reported by the session gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// No session matches the join token (HTTP 404).
    #[error("{0}")]
    NotFound(String),
    /// The session exists but is no longer accepting check-ins (HTTP 410).
    #[error("{0}")]
    Closed(String),
    /// The server already holds a submission for this participant (HTTP 409).
    #[error("{0}")]
    AlreadySubmitted(String),
    /// The bearer credential was rejected (HTTP 401).
    #[error("{0}")]
    Unauthorized(String),
    /// Any other non-2xx response.
    #[error("request failed ({status}): {message}")]
    Http { status: u16, message: String },
    /// Transport failure before any response arrived.
    #[error("network error: {0}")]
    Transport(String),
}

impl GatewayError {
    /// Classify a non-2xx response by status code.
    #[must_use]
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            404 => Self::NotFound(message),
            410 => Self::Closed(message),
            409 => Self::AlreadySubmitted(message),
            401 => Self::Unauthorized(message),
            _ => Self::Http { status, message },
        }
    }

    /// Whether a retry of the same request could plausibly succeed.
    ///
    /// Conflict, closed, and not-found outcomes are stable; transient
    /// transport and server-side failures are not.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Http { .. } | Self::Transport(_))
    }
}

/// Pull the human-readable `detail` field out of an error body.
///
/// The backend reports failures as `{"detail": "..."}`; anything else (empty
/// body, HTML error page, malformed JSON) falls back to the caller-provided
/// message.
#[must_use]
pub fn detail_message(body: &str, fallback: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("detail").and_then(|d| d.as_str()).map(str::to_owned));
    match detail {
        Some(text) if !text.trim().is_empty() => text,
        _ => fallback.to_owned(),
    }
}
