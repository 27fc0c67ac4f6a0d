use super::*;

fn make_receipt(guest_id: Option<&str>) -> SubmitReceipt {
    SubmitReceipt {
        submission_id: "sub1".to_owned(),
        student_id: None,
        guest_id: guest_id.map(str::to_owned),
        require_survey: false,
        is_baseline_update: false,
        mood: "Calm".to_owned(),
        learning_style: None,
        total_scores: std::collections::BTreeMap::new(),
        recommended_activity: None,
        message: None,
    }
}

// =============================================================
// Handoff lifecycle
// =============================================================

#[test]
fn take_handoff_is_one_shot() {
    let mut flow = JoinFlowState::default();
    flow.seed_entry(Some("Ana".to_owned()));

    let first = flow.take_handoff();
    assert_eq!(first.guest_name.as_deref(), Some("Ana"));

    let second = flow.take_handoff();
    assert_eq!(second, JoinHandoff::default());
}

#[test]
fn take_handoff_without_seed_yields_default() {
    let mut flow = JoinFlowState::default();
    assert_eq!(flow.take_handoff(), JoinHandoff::default());
}

// =============================================================
// Entry seeding
// =============================================================

#[test]
fn seed_entry_with_name_forces_guest() {
    let mut flow = JoinFlowState::default();
    flow.seed_entry(Some("Ana".to_owned()));

    let handoff = flow.take_handoff();
    assert!(handoff.force_guest);
    assert!(!handoff.retake);
    assert!(handoff.guest_id.is_none());
}

#[test]
fn seed_entry_ignores_blank_name_and_keeps_credential_in_charge() {
    let mut flow = JoinFlowState::default();
    flow.seed_entry(Some("   ".to_owned()));

    let handoff = flow.take_handoff();
    assert!(handoff.guest_name.is_none());
    assert!(!handoff.force_guest);
}

// =============================================================
// Retake seeding
// =============================================================

#[test]
fn seed_retake_with_continuity_forces_same_guest() {
    let mut flow = JoinFlowState::default();
    flow.seed_retake(Some(GuestRecord {
        guest_id: "g1".to_owned(),
        guest_name: "Ana".to_owned(),
    }));

    let handoff = flow.take_handoff();
    assert!(handoff.retake);
    assert!(handoff.force_guest);
    assert_eq!(handoff.guest_id.as_deref(), Some("g1"));
    assert_eq!(handoff.guest_name.as_deref(), Some("Ana"));
}

#[test]
fn seed_retake_without_continuity_keeps_credential() {
    let mut flow = JoinFlowState::default();
    flow.seed_retake(None);

    let handoff = flow.take_handoff();
    assert!(handoff.retake);
    assert!(!handoff.force_guest);
    assert!(handoff.guest_id.is_none());
}

// =============================================================
// Receipt stash
// =============================================================

#[test]
fn keep_receipt_stores_receipt_and_title() {
    let mut flow = JoinFlowState::default();
    flow.keep_receipt(make_receipt(Some("g1")), "Biology 101".to_owned());

    assert_eq!(
        flow.receipt.as_ref().and_then(|r| r.guest_id.as_deref()),
        Some("g1")
    );
    assert_eq!(flow.course_title.as_deref(), Some("Biology 101"));
}
