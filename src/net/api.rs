//! REST calls to the session gateway.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning a transport error since joining and
//! submitting are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses are classified through [`GatewayError::from_status`]
//! with the body's `detail` text when present, so pages can branch on
//! not-found/closed/conflict/unauthorized without string matching.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::error::GatewayError;
#[cfg(feature = "hydrate")]
use super::error::detail_message;
use super::types::{
    CloseAck, CreateSessionRequest, SessionLaunch, SessionSnapshot, SubmissionStatus,
    SubmitReceipt, SubmitRequest,
};

#[cfg(any(test, feature = "hydrate"))]
fn join_session_endpoint(token: &str) -> String {
    format!("/api/public/join/{token}")
}

#[cfg(any(test, feature = "hydrate"))]
fn submit_endpoint(token: &str) -> String {
    format!("/api/public/join/{token}/submit")
}

#[cfg(any(test, feature = "hydrate"))]
fn submission_status_endpoint(token: &str, guest_id: Option<&str>) -> String {
    let base = format!("/api/public/join/{token}/submission");
    match guest_id {
        Some(id) => {
            let encoded: String = url::form_urlencoded::byte_serialize(id.as_bytes()).collect();
            format!("{base}?guest_id={encoded}")
        }
        None => base,
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn create_session_endpoint(course_id: &str) -> String {
    format!("/api/sessions/{course_id}/sessions")
}

#[cfg(any(test, feature = "hydrate"))]
fn close_session_endpoint(session_id: &str) -> String {
    format!("/api/sessions/{session_id}/close")
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

#[cfg(any(test, feature = "hydrate"))]
fn response_fallback_message(status: u16) -> String {
    format!("request failed with status {status}")
}

/// Decode a response body, classifying non-2xx statuses first.
#[cfg(feature = "hydrate")]
async fn read_json<T: serde::de::DeserializeOwned>(
    resp: gloo_net::http::Response,
) -> Result<T, GatewayError> {
    if !resp.ok() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        let message = detail_message(&body, &response_fallback_message(status));
        leptos::logging::warn!("gateway error ({status}): {message}");
        return Err(GatewayError::from_status(status, message));
    }
    resp.json::<T>()
        .await
        .map_err(|e| GatewayError::Transport(e.to_string()))
}

/// Fetch the live shape of a session via `GET /api/public/join/{token}`.
///
/// Unauthenticated by design: guests hit it before any identity exists.
///
/// # Errors
///
/// `NotFound` for unknown tokens, `Closed` for ended sessions the server
/// already garbage-collected, `Transport`/`Http` otherwise.
pub async fn fetch_join_session(token: &str) -> Result<SessionSnapshot, GatewayError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(&join_session_endpoint(token))
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        read_json(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
        Err(GatewayError::Transport("not available on server".to_owned()))
    }
}

/// Submit a check-in via `POST /api/public/join/{token}/submit`.
///
/// `bearer` is attached for authenticated students so the server can bind
/// the submission to their account; guests pass `None`.
///
/// # Errors
///
/// `AlreadySubmitted` on conflict, `Unauthorized` on a rejected credential,
/// `Closed` once the session has ended, `Transport`/`Http` otherwise.
pub async fn submit_join_session(
    token: &str,
    request: &SubmitRequest,
    bearer: Option<&str>,
) -> Result<SubmitReceipt, GatewayError> {
    #[cfg(feature = "hydrate")]
    {
        let mut builder = gloo_net::http::Request::post(&submit_endpoint(token));
        if let Some(credential) = bearer {
            builder = builder.header("Authorization", &bearer_header(credential));
        }
        let resp = builder
            .json(request)
            .map_err(|e| GatewayError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        read_json(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, request, bearer);
        Err(GatewayError::Transport("not available on server".to_owned()))
    }
}

/// Ask whether a participant already submitted, via
/// `GET /api/public/join/{token}/submission[?guest_id=...]`.
///
/// Read-only and idempotent; resumed flows may retry it freely.
///
/// # Errors
///
/// Same classification as [`fetch_join_session`].
pub async fn fetch_submission_status(
    token: &str,
    guest_id: Option<&str>,
    bearer: Option<&str>,
) -> Result<SubmissionStatus, GatewayError> {
    #[cfg(feature = "hydrate")]
    {
        let mut builder =
            gloo_net::http::Request::get(&submission_status_endpoint(token, guest_id));
        if let Some(credential) = bearer {
            builder = builder.header("Authorization", &bearer_header(credential));
        }
        let resp = builder
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        read_json(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, guest_id, bearer);
        Err(GatewayError::Transport("not available on server".to_owned()))
    }
}

/// Start a live session via `POST /api/sessions/{course_id}/sessions`.
///
/// Teacher-only; the bearer credential is required.
///
/// # Errors
///
/// `Unauthorized` on a rejected credential, `Transport`/`Http` otherwise.
pub async fn create_session(
    course_id: &str,
    request: &CreateSessionRequest,
    bearer: &str,
) -> Result<SessionLaunch, GatewayError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(&create_session_endpoint(course_id))
            .header("Authorization", &bearer_header(bearer))
            .json(request)
            .map_err(|e| GatewayError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        read_json(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (course_id, request, bearer);
        Err(GatewayError::Transport("not available on server".to_owned()))
    }
}

/// Close a live session via `POST /api/sessions/{session_id}/close`.
///
/// # Errors
///
/// `Unauthorized` on a rejected credential, `Transport`/`Http` otherwise.
pub async fn close_session(session_id: &str, bearer: &str) -> Result<CloseAck, GatewayError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(&close_session_endpoint(session_id))
            .header("Authorization", &bearer_header(bearer))
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        read_json(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (session_id, bearer);
        Err(GatewayError::Transport("not available on server".to_owned()))
    }
}
