//! Teacher-side active-session recovery.
//!
//! SYSTEM CONTEXT
//! ==============
//! Starting a session hands the teacher a join token and QR image. Without
//! recovery, any navigation or reload would lose that view and tempt a second
//! "start session" — and a second token on the projector. The store keeps the
//! single most recent session per browser so the start screen can rebuild the
//! join-link/QR state without calling create again.
//!
//! One global slot, deliberately not keyed by course: a newer session always
//! overwrites. Callers must check `course_id` against the page they are on
//! before adopting a loaded record, and must leave mismatching records alone
//! (the other course's tab may still be live).

#[cfg(test)]
#[path = "active_session_test.rs"]
mod active_session_test;

use serde::{Deserialize, Serialize};

use super::backend::{self, StorageBackend};
use crate::net::types::SessionLaunch;

/// Storage key for the single recovery slot.
pub const ACTIVE_SESSION_KEY: &str = "classpulse_active_session";

/// The session a teacher's browser most recently started.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSessionRecord {
    /// Session identifier.
    pub session_id: String,
    /// Shareable join token.
    pub join_token: String,
    /// Course the session was started for.
    pub course_id: String,
    /// Survey flag the session was created with.
    pub require_survey: bool,
    /// Server-rendered QR image for the join link.
    pub qr_url: String,
    /// Creation time, ISO-8601.
    pub created_at: String,
    /// Stamped on every save. Observability only — records never expire.
    #[serde(default)]
    pub last_seen_at: Option<i64>,
}

impl ActiveSessionRecord {
    /// Build the recovery record for a freshly created session.
    ///
    /// `created_at` prefers the server's `started_at`; the client clock is
    /// the browser-side fallback.
    #[must_use]
    pub fn from_launch(launch: &SessionLaunch) -> Self {
        Self {
            session_id: launch.session_id.clone(),
            join_token: launch.join_token.clone(),
            course_id: launch.course_id.clone(),
            require_survey: launch.require_survey,
            qr_url: launch.qr_url.clone(),
            created_at: launch.started_at.clone().unwrap_or_else(now_iso),
            last_seen_at: None,
        }
    }
}

/// Single-slot store for [`ActiveSessionRecord`].
#[derive(Clone, Debug)]
pub struct ActiveSessionStore<S> {
    storage: S,
}

impl<S: StorageBackend> ActiveSessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Persist `record` as the active session, stamping `last_seen_at`.
    ///
    /// Saving is always an overwrite: one slot per browser, newest wins.
    pub fn save(&self, record: &ActiveSessionRecord) {
        let mut stamped = record.clone();
        stamped.last_seen_at = Some(now_ms());
        backend::save_json(&self.storage, ACTIVE_SESSION_KEY, &stamped);
    }

    /// The persisted record, if any.
    ///
    /// Records missing a session id are treated as garbage and read as
    /// absent; the caller still owns the course-id relevance check.
    #[must_use]
    pub fn load(&self) -> Option<ActiveSessionRecord> {
        let record: ActiveSessionRecord = backend::load_json(&self.storage, ACTIVE_SESSION_KEY)?;
        if record.session_id.trim().is_empty() {
            return None;
        }
        Some(record)
    }

    /// Drop the slot — the explicit "end session" path.
    pub fn clear(&self) {
        self.storage.remove(ACTIVE_SESSION_KEY);
    }
}

/// Milliseconds since the Unix epoch.
#[allow(clippy::cast_possible_truncation)]
fn now_ms() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        js_sys::Date::now() as i64
    }
    #[cfg(not(feature = "hydrate"))]
    {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_millis() as i64)
    }
}

/// Current time as an ISO-8601 string; browser-only, empty off-browser.
fn now_iso() -> String {
    #[cfg(feature = "hydrate")]
    {
        js_sys::Date::new_0()
            .to_iso_string()
            .as_string()
            .unwrap_or_default()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        String::new()
    }
}
