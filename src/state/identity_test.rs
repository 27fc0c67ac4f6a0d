use super::*;
use crate::state::auth::{AuthSession, AuthState};

fn logged_in() -> AuthState {
    AuthState {
        session: Some(AuthSession {
            access_token: "tok".to_owned(),
            role: None,
            full_name: "Sam Rivera".to_owned(),
        }),
    }
}

fn logged_out() -> AuthState {
    AuthState::default()
}

fn stored(guest_id: &str, guest_name: &str) -> GuestRecord {
    GuestRecord {
        guest_id: guest_id.to_owned(),
        guest_name: guest_name.to_owned(),
    }
}

// =============================================================
// Credential precedence
// =============================================================

#[test]
fn credential_resolves_authenticated() {
    let identity = Identity::resolve(&logged_in(), &JoinHandoff::default(), None);
    assert_eq!(identity, Identity::Authenticated);
}

#[test]
fn credential_ignores_guest_bookkeeping() {
    // A user who was a guest for this token earlier but has since logged in
    // resolves as a member; old continuity is never promoted.
    let record = stored("g1", "Ana");
    let identity = Identity::resolve(&logged_in(), &JoinHandoff::default(), Some(&record));
    assert_eq!(identity, Identity::Authenticated);
    assert!(identity.guest_id().is_none());
}

#[test]
fn force_guest_overrides_credential() {
    let handoff = JoinHandoff {
        force_guest: true,
        ..JoinHandoff::default()
    };
    let identity = Identity::resolve(&logged_in(), &handoff, None);
    assert!(identity.is_guest());
}

// =============================================================
// Guest continuity
// =============================================================

#[test]
fn fresh_guest_has_no_continuity() {
    let identity = Identity::resolve(&logged_out(), &JoinHandoff::default(), None);
    assert_eq!(
        identity,
        Identity::Guest {
            guest_id: None,
            display_name: None
        }
    );
    assert!(identity.needs_name());
}

#[test]
fn stored_record_supplies_continuity() {
    let record = stored("g1", "Ana");
    let identity = Identity::resolve(&logged_out(), &JoinHandoff::default(), Some(&record));
    assert_eq!(identity.guest_id(), Some("g1"));
    assert_eq!(identity.known_name(), Some("Ana"));
    assert!(!identity.needs_name());
}

#[test]
fn carried_name_beats_stored_name() {
    let record = stored("g1", "Ana");
    let handoff = JoinHandoff {
        guest_name: Some("Ana Belle".to_owned()),
        ..JoinHandoff::default()
    };
    let identity = Identity::resolve(&logged_out(), &handoff, Some(&record));
    assert_eq!(identity.known_name(), Some("Ana Belle"));
    assert_eq!(identity.guest_id(), Some("g1"));
}

#[test]
fn blank_carried_name_falls_back_to_stored() {
    let record = stored("g1", "Ana");
    let handoff = JoinHandoff {
        guest_name: Some("   ".to_owned()),
        ..JoinHandoff::default()
    };
    let identity = Identity::resolve(&logged_out(), &handoff, Some(&record));
    assert_eq!(identity.known_name(), Some("Ana"));
}

#[test]
fn carried_guest_id_beats_stored_id() {
    let record = stored("g1", "Ana");
    let handoff = JoinHandoff {
        guest_id: Some("g2".to_owned()),
        ..JoinHandoff::default()
    };
    let identity = Identity::resolve(&logged_out(), &handoff, Some(&record));
    assert_eq!(identity.guest_id(), Some("g2"));
}

#[test]
fn carried_name_is_trimmed() {
    let handoff = JoinHandoff {
        guest_name: Some("  Ana  ".to_owned()),
        ..JoinHandoff::default()
    };
    let identity = Identity::resolve(&logged_out(), &handoff, None);
    assert_eq!(identity.known_name(), Some("Ana"));
}

#[test]
fn stored_blank_name_still_needs_capture() {
    // A record written for a nameless guest holds the id but no usable name.
    let record = stored("g1", "  ");
    let identity = Identity::resolve(&logged_out(), &JoinHandoff::default(), Some(&record));
    assert_eq!(identity.guest_id(), Some("g1"));
    assert!(identity.needs_name());
}

// =============================================================
// Accessors
// =============================================================

#[test]
fn authenticated_accessor_contract() {
    let identity = Identity::Authenticated;
    assert!(!identity.is_guest());
    assert!(!identity.needs_name());
    assert!(identity.known_name().is_none());
    assert!(identity.guest_id().is_none());
}
