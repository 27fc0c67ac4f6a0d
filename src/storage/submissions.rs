//! Per-token guest continuity — proof this browser already checked in.
//!
//! SYSTEM CONTEXT
//! ==============
//! A guest has no account, so the only thing tying their reloads together is
//! the guest id the server hands back with an accepted submission. The ledger
//! persists that id (plus the name it was submitted under) keyed by join
//! token, which is what lets the run screen short-circuit to "already
//! submitted" instead of collecting a duplicate, and lets a retake submit
//! under the same id so the server can treat it as an update.
//!
//! Records are written only after an accepted submission, overwritten in
//! place on re-submission, and removed only by the explicit "start over as
//! someone new" action. Tokens never share a record.

#[cfg(test)]
#[path = "submissions_test.rs"]
mod submissions_test;

use serde::{Deserialize, Serialize};

use super::backend::{self, StorageBackend};

/// Storage key prefix; the join token is appended per record.
pub const GUEST_KEY_PREFIX: &str = "classpulse_guest_";

/// Continuity anchor for a guest who submitted for one join token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestRecord {
    /// Server-assigned guest id echoed by the accepted submission.
    pub guest_id: String,
    /// Display name the submission was made under.
    pub guest_name: String,
}

/// Ledger of accepted guest submissions, one slot per join token.
#[derive(Clone, Debug)]
pub struct SubmissionLedger<S> {
    storage: S,
}

impl<S: StorageBackend> SubmissionLedger<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    fn key(token: &str) -> String {
        format!("{GUEST_KEY_PREFIX}{token}")
    }

    /// Whether an accepted submission is already recorded for `token`.
    ///
    /// With storage unavailable this is always `false`: the flow degrades to
    /// "never submitted" rather than blocking the check-in.
    #[must_use]
    pub fn has_submitted(&self, token: &str) -> bool {
        self.read(token).is_some()
    }

    /// The continuity record for `token`, if any.
    #[must_use]
    pub fn read(&self, token: &str) -> Option<GuestRecord> {
        backend::load_json(&self.storage, &Self::key(token))
    }

    /// Record an accepted submission for `token`.
    ///
    /// Overwrites any previous record for the same token; records for other
    /// tokens are untouched.
    pub fn record(&self, token: &str, record: &GuestRecord) {
        backend::save_json(&self.storage, &Self::key(token), record);
    }

    /// Forget the record for `token` — the explicit "join as someone new"
    /// escape hatch. Other tokens keep their continuity.
    pub fn clear(&self, token: &str) {
        self.storage.remove(&Self::key(token));
    }
}
