//! Join-wizard state machine: ordered steps, captured answers, submission.
//!
//! DESIGN
//! ======
//! The step list is materialized exactly once, from the session shape plus
//! the resolved identity; after that the wizard is an index into that list
//! and a map of captured answers. Conditional steps (name capture, survey
//! questions) exist as entries or they don't — nothing downstream re-derives
//! "needs name" or juggles question offsets.
//!
//! TRANSITIONS
//! ===========
//! Interaction steps advance only when the current step's requirement is
//! satisfied; back navigation is always allowed and re-surfaces the stored
//! choice. `begin_submit` arms at most one in-flight submission: it hands
//! out the assembled payload exactly once per user action and refuses while
//! one is pending, so a double tap issues a single network call. A gateway
//! failure returns to collecting on the same step with every answer intact.

#[cfg(test)]
#[path = "wizard_test.rs"]
mod wizard_test;

use std::collections::BTreeMap;

use crate::net::types::{SessionSnapshot, SubmitIdentity, SubmitReceipt, SubmitRequest};
use crate::state::identity::Identity;
use crate::storage::submissions::GuestRecord;

/// One step of the join wizard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WizardStep {
    /// Capture a display name for a guest the flow knows nothing about.
    NameCapture,
    /// One survey question, answered by picking a single option.
    Question {
        /// Index into the session's question list, for rendering.
        index: usize,
        /// Question id used as the answers-map key.
        question_id: String,
    },
    /// The mandatory closing mood check.
    MoodCheck,
}

/// Where the wizard is in its submission lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WizardPhase {
    /// Collecting input across the interaction steps.
    #[default]
    Collecting,
    /// One submission is in flight; inputs and re-submission are locked out.
    Submitting,
    /// The gateway accepted the submission.
    Complete,
}

/// In-progress state for one join attempt.
///
/// Exactly one of these exists per attempt; it is never persisted, so a
/// reload restarts the wizard (the continuity ledger still prevents a second
/// accepted submission).
#[derive(Clone, Debug)]
pub struct WizardState {
    steps: Vec<WizardStep>,
    current: usize,
    identity: Identity,
    /// Captured or carried display name; only meaningful for guests.
    pub student_name: String,
    answers: BTreeMap<String, String>,
    mood: Option<String>,
    phase: WizardPhase,
    /// Inline submission error, kept until the next attempt.
    pub error: Option<String>,
}

impl WizardState {
    /// Build the wizard for one join attempt.
    ///
    /// Step composition: name capture iff the guest has no known name, one
    /// step per survey question iff the session requires its survey, then
    /// the mood check, always last.
    #[must_use]
    pub fn new(session: &SessionSnapshot, identity: Identity) -> Self {
        let mut steps = Vec::new();
        if identity.needs_name() {
            steps.push(WizardStep::NameCapture);
        }
        if session.require_survey {
            if let Some(survey) = &session.survey {
                for (index, question) in survey.questions.iter().enumerate() {
                    steps.push(WizardStep::Question {
                        index,
                        question_id: question.question_id.clone(),
                    });
                }
            }
        }
        steps.push(WizardStep::MoodCheck);

        let student_name = identity.known_name().unwrap_or_default().to_owned();
        Self {
            steps,
            current: 0,
            identity,
            student_name,
            answers: BTreeMap::new(),
            mood: None,
            phase: WizardPhase::default(),
            error: None,
        }
    }

    /// Total step count, for the progress header.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    /// Zero-based index of the step being shown.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The step being shown. `current` never leaves the list's bounds.
    #[must_use]
    pub fn current_step(&self) -> &WizardStep {
        &self.steps[self.current]
    }

    /// Progress as `(current + 1) / total`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        (self.current + 1) as f64 / self.steps.len() as f64
    }

    #[must_use]
    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.phase == WizardPhase::Submitting
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == WizardPhase::Complete
    }

    /// Identity this attempt resolved to.
    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Chosen option for a question, when answered.
    #[must_use]
    pub fn answer(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    /// Chosen mood, when selected.
    #[must_use]
    pub fn mood(&self) -> Option<&str> {
        self.mood.as_deref()
    }

    /// Record the option chosen for a survey question.
    pub fn choose_answer(&mut self, question_id: &str, option_id: &str) {
        if self.phase != WizardPhase::Collecting {
            return;
        }
        self.answers
            .insert(question_id.to_owned(), option_id.to_owned());
    }

    /// Record the mood choice.
    pub fn choose_mood(&mut self, mood: &str) {
        if self.phase != WizardPhase::Collecting {
            return;
        }
        self.mood = Some(mood.to_owned());
    }

    /// Whether the current step's requirement is satisfied.
    ///
    /// Pages keep their "next"/"submit" buttons disabled while this is
    /// false, which is the whole of incomplete-input handling: no error
    /// values, no network calls.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        match self.current_step() {
            WizardStep::NameCapture => !self.student_name.trim().is_empty(),
            WizardStep::Question { question_id, .. } => self.answers.contains_key(question_id),
            WizardStep::MoodCheck => self.mood.is_some(),
        }
    }

    /// Move to the next interaction step.
    ///
    /// Refuses when the current requirement is missing, when a submission is
    /// pending, or on the final step — leaving that one goes through
    /// [`Self::begin_submit`] instead.
    pub fn advance(&mut self) -> bool {
        if self.phase != WizardPhase::Collecting
            || !self.can_advance()
            || self.current + 1 >= self.steps.len()
        {
            return false;
        }
        self.current += 1;
        true
    }

    /// Step back. Always allowed while collecting; the previously chosen
    /// option re-surfaces from the answers map.
    pub fn back(&mut self) -> bool {
        if self.phase != WizardPhase::Collecting || self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Arm the submission and hand out its payload.
    ///
    /// Returns `None` — and issues nothing — unless the wizard sits on the
    /// mood step with a mood selected and no submission pending or complete.
    /// The second tap of a double tap therefore gets `None` while the first
    /// is still in flight.
    pub fn begin_submit(&mut self) -> Option<SubmitRequest> {
        if self.phase != WizardPhase::Collecting {
            return None;
        }
        if !matches!(self.current_step(), WizardStep::MoodCheck) {
            return None;
        }
        let mood = self.mood.clone()?;
        self.phase = WizardPhase::Submitting;
        self.error = None;

        let answers = if self.answers.is_empty() {
            None
        } else {
            Some(self.answers.clone())
        };
        let identity = match &self.identity {
            Identity::Authenticated => SubmitIdentity::member(),
            Identity::Guest { guest_id, .. } => {
                SubmitIdentity::guest(self.student_name.trim().to_owned(), guest_id.clone())
            }
        };
        Some(SubmitRequest {
            mood,
            answers,
            identity,
        })
    }

    /// Apply a gateway acceptance.
    pub fn resolve_success(&mut self) {
        if self.phase == WizardPhase::Submitting {
            self.phase = WizardPhase::Complete;
        }
    }

    /// Apply a gateway failure: back to collecting on the same step with
    /// every answer intact, message surfaced inline for the retry.
    pub fn resolve_failure(&mut self, message: String) {
        if self.phase != WizardPhase::Submitting {
            return;
        }
        self.phase = WizardPhase::Collecting;
        self.error = Some(message);
    }

    /// Continuity record to persist for an accepted submission.
    ///
    /// `None` whenever the server reported no guest id (authenticated
    /// submissions bind to the account instead).
    #[must_use]
    pub fn continuity_record(&self, receipt: &SubmitReceipt) -> Option<GuestRecord> {
        let guest_id = receipt.guest_id.clone()?;
        Some(GuestRecord {
            guest_id,
            guest_name: self.student_name.trim().to_owned(),
        })
    }

    /// Continuity record from what the attempt already knows, for healing a
    /// conflict outcome: the server said "already submitted," so persisting
    /// the known id lets the next reload short-circuit locally.
    #[must_use]
    pub fn known_continuity(&self) -> Option<GuestRecord> {
        let guest_id = self.identity.guest_id()?.to_owned();
        Some(GuestRecord {
            guest_id,
            guest_name: self.student_name.trim().to_owned(),
        })
    }
}
