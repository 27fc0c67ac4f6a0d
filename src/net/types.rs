//! Wire DTOs for the session gateway.
//!
//! DESIGN
//! ======
//! These types mirror the server's JSON field-for-field (including the wire
//! name `mood_check_schema` and the `type` field on activities) so serde
//! stays lossless and the gateway code remains schema-driven. Client-only
//! shapes (wizard state, continuity records) live elsewhere.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whether a session is still accepting check-ins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Open,
    Closed,
}

/// Mood prompt and its ordered one-of-N options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodSchema {
    /// Prompt text shown above the mood options.
    pub prompt: String,
    /// Options in server order; the submission carries the chosen text.
    pub options: Vec<String>,
}

/// One selectable answer within a survey question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyOption {
    /// Option identifier submitted back to the server.
    pub option_id: String,
    /// Display text.
    pub text: String,
}

/// One survey question with its ordered options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyQuestion {
    /// Question identifier used as the key in the answers map.
    pub question_id: String,
    /// Display text.
    pub text: String,
    /// Options in server order.
    pub options: Vec<SurveyOption>,
}

/// Survey attached to a session when `require_survey` is set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveySnapshot {
    /// Survey identifier.
    pub survey_id: String,
    /// Survey title shown in the wizard header.
    pub title: String,
    /// Questions in server order; one wizard step each.
    pub questions: Vec<SurveyQuestion>,
}

/// Server-reported shape of one live session, fetched fresh per join attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Session identifier.
    pub session_id: String,
    /// Course the session belongs to.
    pub course_id: String,
    /// Course title shown to participants.
    pub course_title: String,
    /// Whether survey steps precede the mood check.
    pub require_survey: bool,
    /// Mood prompt + options (wire name kept as the server sends it).
    pub mood_check_schema: MoodSchema,
    /// Survey shape; present only when `require_survey` is set.
    #[serde(default)]
    pub survey: Option<SurveySnapshot>,
    /// OPEN sessions show the wizard; CLOSED ones show a terminal message.
    pub status: SessionStatus,
}

/// Identity branch of the submit payload.
///
/// Serialized untagged so the wire carries only the branch's own fields:
/// guests send `is_guest: true` plus their name and (possibly null) guest id,
/// members send `is_guest: false` and nothing else — the bearer credential
/// identifies them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubmitIdentity {
    /// Anonymous participant.
    Guest {
        /// Always `true` for this branch.
        is_guest: bool,
        /// Trimmed display name captured or carried into the wizard.
        student_name: String,
        /// Server-assigned continuity id; `null` until the first accepted
        /// submission.
        #[serde(default)]
        guest_id: Option<String>,
    },
    /// Authenticated student.
    Member {
        /// Always `false` for this branch.
        is_guest: bool,
    },
}

impl SubmitIdentity {
    /// Guest branch with the given display name and optional continuity id.
    #[must_use]
    pub fn guest(student_name: String, guest_id: Option<String>) -> Self {
        Self::Guest {
            is_guest: true,
            student_name,
            guest_id,
        }
    }

    /// Authenticated-member branch.
    #[must_use]
    pub fn member() -> Self {
        Self::Member { is_guest: false }
    }
}

/// Check-in submission payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitRequest {
    /// Chosen mood option text.
    pub mood: String,
    /// Survey answers keyed by question id; omitted entirely when empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answers: Option<BTreeMap<String, String>>,
    /// Guest/member branch, flattened onto the payload.
    #[serde(flatten)]
    pub identity: SubmitIdentity,
}

/// Activity suggested by the server after a submission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActivitySummary {
    /// Activity identifier.
    pub activity_id: String,
    /// Display name.
    pub name: String,
    /// One-paragraph description.
    pub summary: String,
    /// Activity category (wire name `type`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Server-defined activity body; carried opaquely.
    #[serde(default)]
    pub content_json: serde_json::Value,
}

/// Why an activity was recommended, plus the activity itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecommendedActivity {
    /// Matching rule the server applied (e.g. style + mood, style only).
    pub match_type: String,
    /// Learning style the match keyed on, when applicable.
    #[serde(default)]
    pub learning_style: Option<String>,
    /// Mood the match keyed on, when applicable.
    #[serde(default)]
    pub mood: Option<String>,
    /// The recommended activity.
    pub activity: ActivitySummary,
}

/// Acknowledgement of an accepted check-in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubmitReceipt {
    /// Submission identifier.
    pub submission_id: String,
    /// Set for authenticated submissions.
    #[serde(default)]
    pub student_id: Option<String>,
    /// Set for guest submissions; feeds the continuity record.
    #[serde(default)]
    pub guest_id: Option<String>,
    /// Echo of the session's survey flag.
    pub require_survey: bool,
    /// Whether this submission revised the stored learning-style profile.
    pub is_baseline_update: bool,
    /// Echo of the submitted mood.
    pub mood: String,
    /// Learning style computed server-side, when available.
    #[serde(default)]
    pub learning_style: Option<String>,
    /// Per-style score totals; displayed nowhere yet but carried faithfully.
    #[serde(default)]
    pub total_scores: BTreeMap<String, f64>,
    /// Suggested activity, when the server found a match.
    #[serde(default)]
    pub recommended_activity: Option<RecommendedActivity>,
    /// Optional server note shown on the result screen.
    #[serde(default)]
    pub message: Option<String>,
}

/// Answer to "has this participant already submitted?".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionStatus {
    /// `true` once the server holds an accepted submission.
    pub submitted: bool,
}

/// Teacher request to start a live session for a course.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    /// Whether participants must answer the course survey first.
    pub require_survey: bool,
    /// Mood prompt shown on the closing step.
    pub mood_prompt: String,
}

/// Server response to starting a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLaunch {
    /// Session identifier.
    pub session_id: String,
    /// Course the session belongs to.
    pub course_id: String,
    /// Echo of the survey flag the session was created with.
    pub require_survey: bool,
    /// Shareable join token.
    pub join_token: String,
    /// Server-rendered QR image for the join link.
    pub qr_url: String,
    /// Start time in ISO-8601, when the server reports it.
    #[serde(default)]
    pub started_at: Option<String>,
}

/// Server acknowledgement of closing a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloseAck {
    /// Resulting session status (normally `CLOSED`).
    pub status: String,
}
