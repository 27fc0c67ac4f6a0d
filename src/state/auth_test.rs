use super::*;
use crate::storage::backend::MemoryStorage;

fn storage_with_credentials(token: &str, role: &str, name: &str) -> MemoryStorage {
    let storage = MemoryStorage::default();
    storage.write(ACCESS_TOKEN_KEY, token);
    storage.write(ROLE_KEY, role);
    storage.write(FULL_NAME_KEY, name);
    storage
}

// =============================================================
// Loading
// =============================================================

#[test]
fn empty_storage_loads_logged_out() {
    let state = AuthState::load(&MemoryStorage::default());
    assert!(!state.is_authenticated());
    assert!(state.bearer().is_none());
}

#[test]
fn credential_triple_loads_session() {
    let storage = storage_with_credentials("tok123", "student", "Sam Rivera");
    let state = AuthState::load(&storage);

    let session = state.session.expect("session should load");
    assert_eq!(session.access_token, "tok123");
    assert_eq!(session.role, Some(Role::Student));
    assert_eq!(session.full_name, "Sam Rivera");
}

#[test]
fn blank_token_loads_logged_out() {
    let storage = storage_with_credentials("   ", "student", "Sam");
    assert!(!AuthState::load(&storage).is_authenticated());
}

#[test]
fn unknown_role_loads_as_no_role() {
    let storage = storage_with_credentials("tok123", "admin", "Sam");
    let state = AuthState::load(&storage);
    assert_eq!(state.session.expect("session").role, None);
}

#[test]
fn missing_name_loads_as_empty() {
    let storage = MemoryStorage::default();
    storage.write(ACCESS_TOKEN_KEY, "tok123");
    let state = AuthState::load(&storage);
    assert_eq!(state.session.expect("session").full_name, "");
}

// =============================================================
// Accessors
// =============================================================

#[test]
fn bearer_exposes_token() {
    let storage = storage_with_credentials("tok123", "teacher", "Pat");
    assert_eq!(AuthState::load(&storage).bearer(), Some("tok123"));
}

#[test]
fn is_teacher_requires_teacher_role() {
    assert!(AuthState::load(&storage_with_credentials("t", "teacher", "")).is_teacher());
    assert!(!AuthState::load(&storage_with_credentials("t", "student", "")).is_teacher());
    assert!(!AuthState::load(&storage_with_credentials("t", "other", "")).is_teacher());
}

#[test]
fn role_parse_contract() {
    assert_eq!(Role::parse("teacher"), Some(Role::Teacher));
    assert_eq!(Role::parse("student"), Some(Role::Student));
    assert_eq!(Role::parse("TEACHER"), None);
    assert_eq!(Role::parse(""), None);
}

// =============================================================
// Logout
// =============================================================

#[test]
fn clear_credentials_drops_the_triple() {
    let storage = storage_with_credentials("tok123", "student", "Sam");
    clear_credentials(&storage);

    assert!(!AuthState::load(&storage).is_authenticated());
    assert_eq!(storage.key_count(), 0);
}
