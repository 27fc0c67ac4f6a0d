use super::*;
use serde_json::json;

fn guest_request() -> SubmitRequest {
    SubmitRequest {
        mood: "Focused".to_owned(),
        answers: None,
        identity: SubmitIdentity::guest("Ana".to_owned(), None),
    }
}

// =============================================================
// Submit payload shape
// =============================================================

#[test]
fn guest_payload_carries_null_guest_id_until_assigned() {
    let value = serde_json::to_value(guest_request()).unwrap();
    assert_eq!(
        value,
        json!({
            "mood": "Focused",
            "is_guest": true,
            "student_name": "Ana",
            "guest_id": null
        })
    );
}

#[test]
fn guest_payload_carries_known_guest_id() {
    let request = SubmitRequest {
        identity: SubmitIdentity::guest("Ana".to_owned(), Some("g1".to_owned())),
        ..guest_request()
    };
    let value = serde_json::to_value(request).unwrap();
    assert_eq!(value["guest_id"], json!("g1"));
}

#[test]
fn member_payload_omits_guest_fields() {
    let request = SubmitRequest {
        mood: "Calm".to_owned(),
        answers: None,
        identity: SubmitIdentity::member(),
    };
    let value = serde_json::to_value(request).unwrap();
    assert_eq!(value, json!({ "mood": "Calm", "is_guest": false }));
}

#[test]
fn answers_key_omitted_when_absent() {
    let value = serde_json::to_value(guest_request()).unwrap();
    assert!(value.get("answers").is_none());
}

#[test]
fn answers_map_serialized_when_present() {
    let mut answers = std::collections::BTreeMap::new();
    answers.insert("q1".to_owned(), "o2".to_owned());
    let request = SubmitRequest {
        answers: Some(answers),
        ..guest_request()
    };
    let value = serde_json::to_value(request).unwrap();
    assert_eq!(value["answers"], json!({ "q1": "o2" }));
}

#[test]
fn submit_request_round_trips_both_identity_branches() {
    for request in [
        guest_request(),
        SubmitRequest {
            mood: "Calm".to_owned(),
            answers: None,
            identity: SubmitIdentity::member(),
        },
    ] {
        let raw = serde_json::to_string(&request).unwrap();
        let back: SubmitRequest = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, request);
    }
}

// =============================================================
// Session snapshot
// =============================================================

#[test]
fn session_snapshot_deserializes_open_session_with_survey() {
    let raw = json!({
        "session_id": "s1",
        "course_id": "c1",
        "course_title": "Biology 101",
        "require_survey": true,
        "mood_check_schema": { "prompt": "How do you feel?", "options": ["Calm", "Tired"] },
        "survey": {
            "survey_id": "v1",
            "title": "Learning style",
            "questions": [
                {
                    "question_id": "q1",
                    "text": "Pick one",
                    "options": [
                        { "option_id": "o1", "text": "Read" },
                        { "option_id": "o2", "text": "Listen" }
                    ]
                }
            ]
        },
        "status": "OPEN"
    });
    let snapshot: SessionSnapshot = serde_json::from_value(raw).unwrap();
    assert_eq!(snapshot.status, SessionStatus::Open);
    assert!(snapshot.require_survey);
    assert_eq!(snapshot.mood_check_schema.options.len(), 2);
    let survey = snapshot.survey.unwrap();
    assert_eq!(survey.questions[0].options[1].option_id, "o2");
}

#[test]
fn session_snapshot_tolerates_missing_survey() {
    let raw = json!({
        "session_id": "s1",
        "course_id": "c1",
        "course_title": "Biology 101",
        "require_survey": false,
        "mood_check_schema": { "prompt": "Mood?", "options": ["Calm"] },
        "status": "CLOSED"
    });
    let snapshot: SessionSnapshot = serde_json::from_value(raw).unwrap();
    assert_eq!(snapshot.status, SessionStatus::Closed);
    assert!(snapshot.survey.is_none());
}

// =============================================================
// Submit receipt
// =============================================================

#[test]
fn receipt_deserializes_guest_response() {
    let raw = json!({
        "submission_id": "sub1",
        "student_id": null,
        "guest_id": "g1",
        "require_survey": true,
        "is_baseline_update": false,
        "mood": "Focused",
        "learning_style": "visual",
        "total_scores": { "visual": 4.0, "auditory": 1.0 },
        "recommended_activity": {
            "match_type": "style_and_mood",
            "learning_style": "visual",
            "mood": "Focused",
            "activity": {
                "activity_id": "a1",
                "name": "Diagram sprint",
                "summary": "Sketch the concept map.",
                "type": "exercise",
                "content_json": { "minutes": 10 }
            }
        },
        "message": "Nice streak!"
    });
    let receipt: SubmitReceipt = serde_json::from_value(raw).unwrap();
    assert_eq!(receipt.guest_id.as_deref(), Some("g1"));
    assert!(receipt.student_id.is_none());
    let activity = receipt.recommended_activity.unwrap();
    assert_eq!(activity.activity.kind, "exercise");
    assert_eq!(activity.activity.content_json["minutes"], json!(10));
}

#[test]
fn receipt_tolerates_sparse_response() {
    let raw = json!({
        "submission_id": "sub2",
        "student_id": "u7",
        "require_survey": false,
        "is_baseline_update": true,
        "mood": "Calm"
    });
    let receipt: SubmitReceipt = serde_json::from_value(raw).unwrap();
    assert!(receipt.guest_id.is_none());
    assert!(receipt.learning_style.is_none());
    assert!(receipt.recommended_activity.is_none());
    assert!(receipt.total_scores.is_empty());
    assert!(receipt.is_baseline_update);
}

// =============================================================
// Remaining gateway shapes
// =============================================================

#[test]
fn session_launch_round_trips() {
    let launch = SessionLaunch {
        session_id: "s1".to_owned(),
        course_id: "c1".to_owned(),
        require_survey: true,
        join_token: "7F9K2A".to_owned(),
        qr_url: "/api/qr/7F9K2A.png".to_owned(),
        started_at: Some("2025-03-01T09:00:00Z".to_owned()),
    };
    let raw = serde_json::to_string(&launch).unwrap();
    let back: SessionLaunch = serde_json::from_str(&raw).unwrap();
    assert_eq!(back, launch);
}

#[test]
fn submission_status_deserializes() {
    let status: SubmissionStatus = serde_json::from_value(json!({ "submitted": true })).unwrap();
    assert!(status.submitted);
}
