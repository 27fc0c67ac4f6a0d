//! Identity resolution for one join attempt.
//!
//! DESIGN
//! ======
//! Every "who is checking in" decision happens here, once, and produces one
//! tagged value. Pages and the wizard consume the variant exhaustively
//! instead of re-deriving it from booleans, so an attempt can never be half
//! guest, half member.
//!
//! A credential wins unless the caller explicitly forced guest mode. Guests
//! fold together whatever continuity is known: values carried over from the
//! entry form or a retake take precedence, then the persisted record for
//! this exact token. Continuity is strictly per-token — logging in later
//! never promotes old guest records to the account.

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use crate::state::auth::AuthState;
use crate::state::join::JoinHandoff;
use crate::storage::submissions::GuestRecord;

/// Who is driving this join attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Identity {
    /// Logged-in student; the bearer credential identifies them and no guest
    /// bookkeeping applies.
    Authenticated,
    /// Anonymous participant, with whatever continuity is known so far.
    Guest {
        /// Server-assigned id from an earlier accepted submission, if any.
        guest_id: Option<String>,
        /// Known display name, already trimmed and non-empty.
        display_name: Option<String>,
    },
}

impl Identity {
    /// Resolve the identity for one join attempt.
    ///
    /// `stored` is the continuity record persisted for this exact token;
    /// callers look it up per token so records from other sessions are never
    /// consulted here.
    #[must_use]
    pub fn resolve(auth: &AuthState, handoff: &JoinHandoff, stored: Option<&GuestRecord>) -> Self {
        if auth.is_authenticated() && !handoff.force_guest {
            return Self::Authenticated;
        }
        Self::Guest {
            guest_id: normalized(handoff.guest_id.as_deref())
                .or_else(|| stored.map(|record| record.guest_id.clone())),
            display_name: normalized(handoff.guest_name.as_deref())
                .or_else(|| stored.and_then(|record| normalized(Some(&record.guest_name)))),
        }
    }

    #[must_use]
    pub fn is_guest(&self) -> bool {
        matches!(self, Self::Guest { .. })
    }

    /// Known display name, when any.
    #[must_use]
    pub fn known_name(&self) -> Option<&str> {
        match self {
            Self::Authenticated => None,
            Self::Guest { display_name, .. } => display_name.as_deref(),
        }
    }

    /// Known guest continuity id, when any.
    #[must_use]
    pub fn guest_id(&self) -> Option<&str> {
        match self {
            Self::Authenticated => None,
            Self::Guest { guest_id, .. } => guest_id.as_deref(),
        }
    }

    /// Whether the wizard must open with a name-capture step.
    #[must_use]
    pub fn needs_name(&self) -> bool {
        matches!(
            self,
            Self::Guest {
                display_name: None,
                ..
            }
        )
    }
}

/// Trimmed, non-empty form of an optional value; blanks read as absent.
fn normalized(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
