use super::*;

#[test]
fn validate_entry_input_accepts_a_bare_code() {
    assert_eq!(validate_entry_input("7F9K2A"), Ok("7F9K2A".to_owned()));
}

#[test]
fn validate_entry_input_extracts_the_token_from_a_pasted_link() {
    assert_eq!(
        validate_entry_input("https://app.example/join/7F9K2A?utm=qr"),
        Ok("7F9K2A".to_owned())
    );
}

#[test]
fn validate_entry_input_trims_whitespace() {
    assert_eq!(validate_entry_input("  7f9k2a  "), Ok("7f9k2a".to_owned()));
}

#[test]
fn validate_entry_input_rejects_blank_input() {
    assert_eq!(
        validate_entry_input("   "),
        Err("Enter a session code or link first.")
    );
}

#[test]
fn run_path_targets_the_join_route() {
    assert_eq!(run_path("7F9K2A"), "/join/7F9K2A");
}

#[test]
fn entry_error_copy_for_unknown_codes_suggests_checking_them() {
    let message = entry_error_message(&GatewayError::NotFound("no such session".to_owned()));
    assert!(message.contains("Double-check"));
}

#[test]
fn entry_error_copy_for_ended_sessions_is_terminal() {
    let message = entry_error_message(&GatewayError::Closed("session has ended".to_owned()));
    assert_eq!(message, "That session has already ended.");
}

#[test]
fn entry_error_copy_for_server_failures_suggests_retrying() {
    let message = entry_error_message(&GatewayError::Transport("offline".to_owned()));
    assert!(message.contains("try again"));
}
