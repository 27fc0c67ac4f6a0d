use super::*;

#[test]
fn copy_uses_the_stored_name_when_present() {
    assert_eq!(
        already_copy(Some("Ana")),
        "You already checked in as Ana."
    );
}

#[test]
fn copy_trims_the_stored_name() {
    assert_eq!(
        already_copy(Some("  Ana  ")),
        "You already checked in as Ana."
    );
}

#[test]
fn copy_falls_back_when_the_name_is_blank_or_missing() {
    let fallback = "You've already checked in for this session.";
    assert_eq!(already_copy(Some("   ")), fallback);
    assert_eq!(already_copy(None), fallback);
}

#[test]
fn run_path_targets_the_join_route() {
    assert_eq!(run_path("7F9K2A"), "/join/7F9K2A");
}
