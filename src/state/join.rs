//! Cross-route handoff for the join flow.
//!
//! DESIGN
//! ======
//! Screens pass transient context — the typed guest name, retake continuity,
//! the submission receipt — through one shared `RwSignal` provided in `App`,
//! instead of stuffing it into the URL. Everything here is in-memory only: a
//! reload drops it, and the persisted stores take continuity back over.

#[cfg(test)]
#[path = "join_test.rs"]
mod join_test;

use crate::net::types::SubmitReceipt;
use crate::storage::submissions::GuestRecord;

/// Carried-over context for the next run-screen mount.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JoinHandoff {
    /// Display name typed on the entry form or carried by a retake.
    pub guest_name: Option<String>,
    /// Guest continuity id carried by a retake.
    pub guest_id: Option<String>,
    /// Resolve as guest even when a credential exists.
    pub force_guest: bool,
    /// Explicit retake: show the wizard even though a submission is already
    /// recorded for this token.
    pub retake: bool,
}

/// Shared join-flow state provided app-wide via context.
#[derive(Clone, Debug, Default)]
pub struct JoinFlowState {
    /// One-shot handoff consumed by the run screen on mount.
    pub handoff: Option<JoinHandoff>,
    /// Receipt of the latest accepted submission, for the result screen.
    pub receipt: Option<SubmitReceipt>,
    /// Course title fetched alongside that submission's session.
    pub course_title: Option<String>,
}

impl JoinFlowState {
    /// Take the pending handoff, leaving none behind.
    ///
    /// One-shot by design: the run screen consumes it on mount, so a later
    /// visit to the same token starts from persisted continuity instead.
    pub fn take_handoff(&mut self) -> JoinHandoff {
        self.handoff.take().unwrap_or_default()
    }

    /// Seed the handoff from the entry form.
    ///
    /// Typing a name is an explicit "join as guest" choice, so it forces
    /// guest mode; submitting the bare form leaves any credential in charge.
    pub fn seed_entry(&mut self, guest_name: Option<String>) {
        let guest_name = guest_name.filter(|name| !name.trim().is_empty());
        self.handoff = Some(JoinHandoff {
            force_guest: guest_name.is_some(),
            guest_name,
            guest_id: None,
            retake: false,
        });
    }

    /// Seed the handoff for an explicit retake.
    ///
    /// Guest continuity re-enters as the same guest (forced, so a credential
    /// gained in the meantime cannot hijack the attempt); an authenticated
    /// retake passes no continuity and keeps the credential.
    pub fn seed_retake(&mut self, continuity: Option<GuestRecord>) {
        let (guest_id, guest_name) = match continuity {
            Some(record) => (Some(record.guest_id), Some(record.guest_name)),
            None => (None, None),
        };
        self.handoff = Some(JoinHandoff {
            force_guest: guest_id.is_some(),
            guest_name,
            guest_id,
            retake: true,
        });
    }

    /// Stash an accepted submission for the result screen.
    pub fn keep_receipt(&mut self, receipt: SubmitReceipt, course_title: String) {
        self.receipt = Some(receipt);
        self.course_title = Some(course_title);
    }
}
