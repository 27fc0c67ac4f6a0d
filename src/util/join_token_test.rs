use super::*;

// =============================================================
// Bare codes
// =============================================================

#[test]
fn bare_code_passes_through_trimmed() {
    assert_eq!(resolve_join_token("  7f9k2a  "), "7f9k2a");
}

#[test]
fn bare_code_case_preserved() {
    assert_eq!(resolve_join_token("AbC123"), "AbC123");
}

#[test]
fn empty_input_resolves_to_empty_token() {
    assert_eq!(resolve_join_token(""), "");
    assert_eq!(resolve_join_token("   "), "");
}

// =============================================================
// Fragment prefix
// =============================================================

#[test]
fn leading_hash_is_stripped() {
    assert_eq!(resolve_join_token("#7F9K2A"), "7F9K2A");
}

#[test]
fn hash_alone_resolves_to_empty_token() {
    assert_eq!(resolve_join_token("#"), "");
}

#[test]
fn hashed_input_matches_unhashed_input() {
    for raw in [
        "7F9K2A",
        "https://app.example/join/7F9K2A",
        "https://app.example/scan?code=7F9K2A",
        "not a url",
    ] {
        let hashed = format!("#{raw}");
        assert_eq!(resolve_join_token(&hashed), resolve_join_token(raw));
    }
}

// =============================================================
// code query parameter
// =============================================================

#[test]
fn code_query_param_wins() {
    assert_eq!(
        resolve_join_token("https://app.example/scan?code=7F9K2A"),
        "7F9K2A"
    );
}

#[test]
fn code_query_param_beats_join_segment() {
    assert_eq!(
        resolve_join_token("https://app.example/join/AAAAAA?code=BBBBBB"),
        "BBBBBB"
    );
}

#[test]
fn code_query_param_case_preserved() {
    assert_eq!(
        resolve_join_token("https://app.example/scan?code=aBcDeF"),
        "aBcDeF"
    );
}

// =============================================================
// join path segment
// =============================================================

#[test]
fn join_url_yields_following_segment() {
    assert_eq!(
        resolve_join_token("https://app.example/join/7F9K2A"),
        "7F9K2A"
    );
}

#[test]
fn join_url_with_query_noise_yields_token() {
    assert_eq!(
        resolve_join_token("https://app.example/join/7F9K2A?utm=x"),
        "7F9K2A"
    );
}

#[test]
fn join_url_with_trailing_slash_yields_token() {
    assert_eq!(
        resolve_join_token("https://app.example/join/7F9K2A/"),
        "7F9K2A"
    );
}

#[test]
fn nested_join_segment_is_found() {
    assert_eq!(
        resolve_join_token("https://app.example/app/join/7F9K2A"),
        "7F9K2A"
    );
}

#[test]
fn join_segment_match_is_case_sensitive() {
    // "JOIN" is not the literal segment, so the last segment wins instead.
    assert_eq!(
        resolve_join_token("https://app.example/JOIN/7F9K2A/extra"),
        "extra"
    );
}

// =============================================================
// Fallbacks
// =============================================================

#[test]
fn url_without_join_segment_yields_last_segment() {
    assert_eq!(
        resolve_join_token("https://app.example/s/7F9K2A"),
        "7F9K2A"
    );
}

#[test]
fn url_with_only_trailing_slash_uses_last_non_empty_segment() {
    assert_eq!(resolve_join_token("https://app.example/7F9K2A/"), "7F9K2A");
}

#[test]
fn url_with_no_path_degrades_to_input() {
    assert_eq!(
        resolve_join_token("https://app.example"),
        "https://app.example"
    );
}

#[test]
fn non_url_input_returned_as_typed() {
    assert_eq!(resolve_join_token("not a url"), "not a url");
}

#[test]
fn join_url_ending_at_join_falls_back_to_last_segment() {
    assert_eq!(resolve_join_token("https://app.example/join/"), "join");
}
