use super::*;

// =============================================================
// Status classification
// =============================================================

#[test]
fn status_404_maps_to_not_found() {
    let err = GatewayError::from_status(404, "no such session".to_owned());
    assert_eq!(err, GatewayError::NotFound("no such session".to_owned()));
}

#[test]
fn status_410_maps_to_closed() {
    let err = GatewayError::from_status(410, "session closed".to_owned());
    assert_eq!(err, GatewayError::Closed("session closed".to_owned()));
}

#[test]
fn status_409_maps_to_already_submitted() {
    let err = GatewayError::from_status(409, "duplicate".to_owned());
    assert_eq!(err, GatewayError::AlreadySubmitted("duplicate".to_owned()));
}

#[test]
fn status_401_maps_to_unauthorized() {
    let err = GatewayError::from_status(401, "expired".to_owned());
    assert_eq!(err, GatewayError::Unauthorized("expired".to_owned()));
}

#[test]
fn other_statuses_map_to_http() {
    let err = GatewayError::from_status(500, "boom".to_owned());
    assert_eq!(
        err,
        GatewayError::Http {
            status: 500,
            message: "boom".to_owned()
        }
    );
}

// =============================================================
// Retryability
// =============================================================

#[test]
fn only_http_and_transport_are_retryable() {
    assert!(GatewayError::from_status(500, String::new()).is_retryable());
    assert!(GatewayError::Transport("offline".to_owned()).is_retryable());

    assert!(!GatewayError::from_status(404, String::new()).is_retryable());
    assert!(!GatewayError::from_status(410, String::new()).is_retryable());
    assert!(!GatewayError::from_status(409, String::new()).is_retryable());
    assert!(!GatewayError::from_status(401, String::new()).is_retryable());
}

// =============================================================
// Detail extraction
// =============================================================

#[test]
fn detail_message_reads_detail_field() {
    let body = r#"{"detail": "Session is closed"}"#;
    assert_eq!(detail_message(body, "fallback"), "Session is closed");
}

#[test]
fn detail_message_falls_back_on_missing_field() {
    assert_eq!(detail_message(r#"{"error": "x"}"#, "fallback"), "fallback");
}

#[test]
fn detail_message_falls_back_on_malformed_body() {
    assert_eq!(detail_message("<html>502</html>", "fallback"), "fallback");
    assert_eq!(detail_message("", "fallback"), "fallback");
}

#[test]
fn detail_message_falls_back_on_blank_detail() {
    assert_eq!(detail_message(r#"{"detail": "  "}"#, "fallback"), "fallback");
}

// =============================================================
// Display
// =============================================================

#[test]
fn display_renders_status_for_http_variant() {
    let err = GatewayError::Http {
        status: 503,
        message: "unavailable".to_owned(),
    };
    assert_eq!(err.to_string(), "request failed (503): unavailable");
}

#[test]
fn display_passes_through_classified_messages() {
    let err = GatewayError::Closed("This session has ended".to_owned());
    assert_eq!(err.to_string(), "This session has ended");
}
