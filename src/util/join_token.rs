//! Join-token normalization for heterogeneous share-code input.
//!
//! DESIGN
//! ======
//! Students arrive with whatever the share surface gave them: a bare code
//! typed from the projector, a full join URL pasted from chat, a QR scan
//! result, or a copied fragment still carrying its `#`. All of those funnel
//! through [`resolve_join_token`] so the rest of the join flow only ever sees
//! one canonical token string.
//!
//! Resolution never fails. Input that does not look like a URL is returned
//! as typed (trimmed, case preserved); an empty result means "no token yet,"
//! not a lookup error.

#[cfg(test)]
#[path = "join_token_test.rs"]
mod join_token_test;

use url::Url;

/// Normalize raw share-code input into a canonical join token.
///
/// Rules, first match wins:
/// 1. a leading `#` is stripped before anything else;
/// 2. a `code` query parameter wins when the input parses as a URL;
/// 3. otherwise the path segment following a literal `join` segment;
/// 4. otherwise the last non-empty path segment;
/// 5. inputs that are not URLs come back trimmed and case-preserved.
#[must_use]
pub fn resolve_join_token(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('#').unwrap_or(trimmed).trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let Ok(parsed) = Url::parse(trimmed) else {
        return trimmed.to_owned();
    };

    if let Some(code) = code_query_param(&parsed) {
        return code;
    }

    let segments = non_empty_segments(&parsed);
    if let Some(token) = segment_after_join(&segments) {
        return token.to_owned();
    }
    if let Some(last) = segments.last() {
        return (*last).to_owned();
    }

    trimmed.to_owned()
}

/// The `code` query parameter, verbatim, when present.
fn code_query_param(parsed: &Url) -> Option<String> {
    parsed
        .query_pairs()
        .find(|(key, _)| key == "code")
        .map(|(_, value)| value.into_owned())
}

/// Path segments with trailing-slash artifacts removed.
fn non_empty_segments(parsed: &Url) -> Vec<&str> {
    parsed
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default()
}

/// The segment immediately following a literal `join` segment, if any.
fn segment_after_join<'a>(segments: &[&'a str]) -> Option<&'a str> {
    let join_at = segments.iter().position(|s| *s == "join")?;
    segments.get(join_at + 1).copied()
}
