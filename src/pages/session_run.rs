//! Join-session page driving the multi-step check-in wizard.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the route a join link or QR code lands on. On mount it resolves
//! who is checking in, short-circuits participants who already submitted,
//! fetches the session shape, and then walks the wizard through to exactly
//! one submission.
//!
//! TRANSITIONS
//! ===========
//! Loading -> Ready -> result | already-submitted
//! Loading -> Closed | Failed (Failed offers a retry)

#[cfg(test)]
#[path = "session_run_test.rs"]
mod session_run_test;

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_params_map;

use crate::components::choice_list::{Choice, ChoiceList};
use crate::components::step_progress::StepProgress;
#[cfg(any(test, feature = "hydrate"))]
use crate::net::error::GatewayError;
#[cfg(feature = "hydrate")]
use crate::net::types::SessionStatus;
use crate::net::types::{MoodSchema, SessionSnapshot, SurveyQuestion};
#[cfg(any(test, feature = "hydrate"))]
use crate::state::join::JoinHandoff;
use crate::state::wizard::{WizardState, WizardStep};

/// Exclusive top-level states of the page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
enum RunView {
    #[default]
    Loading,
    Closed,
    Failed(String),
    Ready,
}

/// User-facing copy for a failed session load.
#[cfg(any(test, feature = "hydrate"))]
fn load_error_message(error: &GatewayError) -> String {
    match error {
        GatewayError::NotFound(_) => {
            "This link doesn't match an active session. Check the code with your teacher.".to_owned()
        }
        GatewayError::Closed(_) => {
            "This session has ended. Ask your teacher for a fresh link.".to_owned()
        }
        GatewayError::AlreadySubmitted(_)
        | GatewayError::Unauthorized(_)
        | GatewayError::Http { .. }
        | GatewayError::Transport(_) => {
            "Couldn't load this session. Check your connection and try again.".to_owned()
        }
    }
}

/// User-facing copy for a failed submission, shown above the mood step.
#[cfg(any(test, feature = "hydrate"))]
fn submit_error_message(error: &GatewayError) -> String {
    match error {
        GatewayError::NotFound(_) => "This session is no longer available.".to_owned(),
        GatewayError::Closed(_) => "This session ended before your check-in was recorded.".to_owned(),
        GatewayError::AlreadySubmitted(_) => "You've already checked in for this session.".to_owned(),
        GatewayError::Unauthorized(_) => "Your sign-in expired. Sign in again, then retry.".to_owned(),
        GatewayError::Http { message, .. } => message.clone(),
        GatewayError::Transport(_) => {
            "Couldn't reach the server. Check your connection and try again.".to_owned()
        }
    }
}

/// Guest id worth a status probe before showing the wizard.
///
/// Only a handoff-carried id with no local submission record qualifies; a
/// retake skips the probe on purpose since the participant already chose to
/// go again.
#[cfg(any(test, feature = "hydrate"))]
fn status_probe_id(handoff: &JoinHandoff, has_local_record: bool) -> Option<String> {
    if has_local_record || handoff.retake {
        return None;
    }
    handoff.guest_id.clone()
}

/// Look up a survey question by id in the fetched snapshot.
fn question_for(snapshot: &SessionSnapshot, question_id: &str) -> Option<SurveyQuestion> {
    snapshot
        .survey
        .as_ref()?
        .questions
        .iter()
        .find(|q| q.question_id == question_id)
        .cloned()
}

fn question_choices(question: &SurveyQuestion) -> Vec<Choice> {
    question
        .options
        .iter()
        .map(|o| Choice {
            id: o.option_id.clone(),
            label: o.text.clone(),
        })
        .collect()
}

fn mood_choices(schema: &MoodSchema) -> Vec<Choice> {
    schema
        .options
        .iter()
        .map(|m| Choice {
            id: m.clone(),
            label: m.clone(),
        })
        .collect()
}

#[cfg(any(test, feature = "hydrate"))]
fn result_path(token: &str) -> String {
    format!("/join/{token}/result")
}

#[cfg(any(test, feature = "hydrate"))]
fn already_submitted_path(token: &str) -> String {
    format!("/join/{token}/already-submitted")
}

/// Join page — orchestrates identity, idempotency gates, session load, and
/// the wizard itself.
#[component]
pub fn SessionRunPage() -> impl IntoView {
    let params = use_params_map();
    let token = move || params.read().get("token").unwrap_or_default();

    let view_state = RwSignal::new(RunView::default());
    let snapshot = RwSignal::new(None::<SessionSnapshot>);
    let wizard = RwSignal::new(None::<WizardState>);
    let name_input = RwSignal::new(String::new());
    let started = RwSignal::new(None::<String>);

    #[cfg(feature = "hydrate")]
    let auth = expect_context::<RwSignal<crate::state::auth::AuthState>>();
    #[cfg(feature = "hydrate")]
    let flow = expect_context::<RwSignal<crate::state::join::JoinFlowState>>();
    #[cfg(feature = "hydrate")]
    let navigate = leptos_router::hooks::use_navigate();
    // Handoff from the entry/result pages, taken once and cached so a retry
    // after a failed load keeps the carried intent.
    #[cfg(feature = "hydrate")]
    let handoff = RwSignal::new(None::<JoinHandoff>);

    #[cfg(feature = "hydrate")]
    let alive = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
    #[cfg(feature = "hydrate")]
    {
        let alive = alive.clone();
        on_cleanup(move || alive.store(false, std::sync::atomic::Ordering::Relaxed));
    }

    // Load once per token; retry resets `started` to run again.
    #[cfg(feature = "hydrate")]
    let navigate_load = navigate.clone();
    #[cfg(feature = "hydrate")]
    let alive_load = alive.clone();
    Effect::new(move || {
        let tok = token();
        if tok.is_empty() {
            return;
        }
        if started.get().as_deref() == Some(tok.as_str()) {
            return;
        }
        started.set(Some(tok.clone()));
        view_state.set(RunView::Loading);

        #[cfg(feature = "hydrate")]
        {
            use crate::state::identity::Identity;
            use crate::storage::backend::BrowserStorage;
            use crate::storage::submissions::{GuestRecord, SubmissionLedger};

            let carried = handoff.get_untracked().unwrap_or_else(|| {
                let taken = flow
                    .try_update(crate::state::join::JoinFlowState::take_handoff)
                    .unwrap_or_default();
                handoff.set(Some(taken.clone()));
                taken
            });

            let ledger = SubmissionLedger::new(BrowserStorage);
            let stored = ledger.read(&tok);
            if stored.is_some() && !carried.retake {
                navigate_load(&already_submitted_path(&tok), NavigateOptions::default());
                return;
            }

            let identity = Identity::resolve(&auth.get_untracked(), &carried, stored.as_ref());
            let probe = status_probe_id(&carried, stored.is_some());
            let navigate = navigate_load.clone();
            let alive = alive_load.clone();
            leptos::task::spawn_local(async move {
                if let Some(guest_id) = probe {
                    if let Ok(status) =
                        crate::net::api::fetch_submission_status(&tok, Some(&guest_id), None).await
                    {
                        if status.submitted {
                            ledger.record(
                                &tok,
                                &GuestRecord {
                                    guest_id,
                                    guest_name: carried.guest_name.clone().unwrap_or_default(),
                                },
                            );
                            if alive.load(std::sync::atomic::Ordering::Relaxed) {
                                navigate(&already_submitted_path(&tok), NavigateOptions::default());
                            }
                            return;
                        }
                    }
                    // A failed probe never blocks joining.
                }

                let loaded = crate::net::api::fetch_join_session(&tok).await;
                if !alive.load(std::sync::atomic::Ordering::Relaxed) {
                    return;
                }
                match loaded {
                    Ok(snap) if snap.status == SessionStatus::Closed => {
                        view_state.set(RunView::Closed);
                    }
                    Ok(snap) => {
                        name_input.set(identity.known_name().unwrap_or_default().to_owned());
                        wizard.set(Some(WizardState::new(&snap, identity)));
                        snapshot.set(Some(snap));
                        view_state.set(RunView::Ready);
                    }
                    Err(GatewayError::Closed(_)) => view_state.set(RunView::Closed),
                    Err(e) => view_state.set(RunView::Failed(load_error_message(&e))),
                }
            });
        }
    });

    // Sync the typed name into the wizard, then move forward.
    let advance_step = move || {
        wizard.update(|w| {
            if let Some(w) = w {
                if matches!(w.current_step(), WizardStep::NameCapture) {
                    w.student_name = name_input.get_untracked();
                }
                w.advance();
            }
        });
    };

    let can_go_next = move || {
        let guard = wizard.read();
        let Some(state) = guard.as_ref() else {
            return false;
        };
        match state.current_step() {
            WizardStep::NameCapture => !name_input.read().trim().is_empty(),
            _ => state.can_advance(),
        }
    };

    let submitting = move || wizard.read().as_ref().is_some_and(WizardState::is_submitting);
    let show_back = move || {
        wizard
            .read()
            .as_ref()
            .is_some_and(|w| w.current_index() > 0 && !w.is_submitting())
    };
    let on_final_step = move || {
        wizard
            .read()
            .as_ref()
            .is_some_and(|w| matches!(w.current_step(), WizardStep::MoodCheck))
    };
    let on_back = move |_| {
        wizard.update(|w| {
            if let Some(w) = w {
                w.back();
            }
        });
    };

    let submit_action = Callback::new({
        #[cfg(feature = "hydrate")]
        let navigate = navigate.clone();
        #[cfg(feature = "hydrate")]
        let alive = alive.clone();
        move |(): ()| {
            // At most one in-flight submission: `begin_submit` returns None
            // while one is pending.
            let Some(request) = wizard
                .try_update(|w| w.as_mut().and_then(WizardState::begin_submit))
                .flatten()
            else {
                return;
            };

            #[cfg(feature = "hydrate")]
            {
                use crate::storage::backend::BrowserStorage;
                use crate::storage::submissions::SubmissionLedger;

                let tok = token();
                let auth_state = auth.get_untracked();
                let navigate = navigate.clone();
                let alive = alive.clone();
                leptos::task::spawn_local(async move {
                    let result =
                        crate::net::api::submit_join_session(&tok, &request, auth_state.bearer())
                            .await;
                    if !alive.load(std::sync::atomic::Ordering::Relaxed) {
                        return;
                    }
                    let ledger = SubmissionLedger::new(BrowserStorage);
                    match result {
                        Ok(receipt) => {
                            if let Some(record) = wizard
                                .get_untracked()
                                .as_ref()
                                .and_then(|w| w.continuity_record(&receipt))
                            {
                                ledger.record(&tok, &record);
                            }
                            let title = snapshot
                                .get_untracked()
                                .map(|s| s.course_title)
                                .unwrap_or_default();
                            wizard.update(|w| {
                                if let Some(w) = w {
                                    w.resolve_success();
                                }
                            });
                            flow.update(|f| f.keep_receipt(receipt, title));
                            navigate(&result_path(&tok), NavigateOptions::default());
                        }
                        Err(GatewayError::AlreadySubmitted(_)) => {
                            // Heal the local record so the next visit gates
                            // without a round trip.
                            if let Some(record) = wizard
                                .get_untracked()
                                .as_ref()
                                .and_then(WizardState::known_continuity)
                            {
                                ledger.record(&tok, &record);
                            }
                            navigate(&already_submitted_path(&tok), NavigateOptions::default());
                        }
                        Err(e) => {
                            wizard.update(|w| {
                                if let Some(w) = w {
                                    w.resolve_failure(submit_error_message(&e));
                                }
                            });
                        }
                    }
                });
            }
            #[cfg(not(feature = "hydrate"))]
            let _ = request;
        }
    });

    let step_body = move || {
        let Some(state) = wizard.get() else {
            return ().into_any();
        };
        let Some(snap) = snapshot.get() else {
            return ().into_any();
        };
        let locked = state.is_submitting();
        match state.current_step().clone() {
            WizardStep::NameCapture => view! {
                <div class="run-page__step">
                    <h2 class="run-page__question">"What's your name?"</h2>
                    <input
                        class="run-page__name-input"
                        type="text"
                        placeholder="Your name"
                        prop:value=move || name_input.get()
                        on:input=move |ev| name_input.set(event_target_value(&ev))
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                ev.prevent_default();
                                if can_go_next() {
                                    advance_step();
                                }
                            }
                        }
                    />
                </div>
            }
            .into_any(),
            WizardStep::Question { question_id, .. } => {
                let Some(question) = question_for(&snap, &question_id) else {
                    return ().into_any();
                };
                let choices = question_choices(&question);
                let selected = state.answer(&question_id).map(str::to_owned);
                let on_pick = Callback::new(move |option_id: String| {
                    wizard.update(|w| {
                        if let Some(w) = w {
                            w.choose_answer(&question_id, &option_id);
                        }
                    });
                });
                view! {
                    <div class="run-page__step">
                        <h2 class="run-page__question">{question.text.clone()}</h2>
                        <ChoiceList choices=choices selected=selected on_pick=on_pick disabled=locked/>
                    </div>
                }
                .into_any()
            }
            WizardStep::MoodCheck => {
                let choices = mood_choices(&snap.mood_check_schema);
                let selected = state.mood().map(str::to_owned);
                let on_pick = Callback::new(move |mood: String| {
                    wizard.update(|w| {
                        if let Some(w) = w {
                            w.choose_mood(&mood);
                        }
                    });
                });
                view! {
                    <div class="run-page__step">
                        <h2 class="run-page__question">{snap.mood_check_schema.prompt.clone()}</h2>
                        <ChoiceList choices=choices selected=selected on_pick=on_pick disabled=locked/>
                    </div>
                }
                .into_any()
            }
        }
    };

    view! {
        <div class="run-page">
            {move || match view_state.get() {
                RunView::Loading => view! {
                    <p class="run-page__loading">"Loading session..."</p>
                }
                .into_any(),
                RunView::Closed => view! {
                    <div class="run-page__card run-page__card--closed">
                        <h1 class="run-page__title">"Session ended"</h1>
                        <p>"This session has ended. Ask your teacher for a fresh link."</p>
                        <a class="btn" href="/">"Back to start"</a>
                    </div>
                }
                .into_any(),
                RunView::Failed(message) => view! {
                    <div class="run-page__card run-page__card--failed">
                        <h1 class="run-page__title">"Couldn't load session"</h1>
                        <p class="run-page__error">{message}</p>
                        <button class="btn btn--primary" on:click=move |_| started.set(None)>
                            "Try again"
                        </button>
                    </div>
                }
                .into_any(),
                RunView::Ready => view! {
                    <div class="run-page__card">
                        <header class="run-page__header">
                            <h1 class="run-page__title">
                                {move || snapshot.read().as_ref().map(|s| s.course_title.clone())}
                            </h1>
                            {move || {
                                wizard
                                    .read()
                                    .as_ref()
                                    .map(|w| {
                                        view! {
                                            <StepProgress current=w.current_index() total=w.total_steps()/>
                                        }
                                    })
                            }}
                        </header>

                        <Show when=move || wizard.read().as_ref().is_some_and(|w| w.error.is_some())>
                            <p class="run-page__error">
                                {move || {
                                    wizard.read().as_ref().and_then(|w| w.error.clone()).unwrap_or_default()
                                }}
                            </p>
                        </Show>

                        {step_body}

                        <div class="run-page__nav">
                            <Show when=show_back>
                                <button class="btn run-page__back" on:click=on_back>
                                    "Back"
                                </button>
                            </Show>
                            <span class="run-page__nav-spacer"></span>
                            <Show
                                when=on_final_step
                                fallback=move || {
                                    view! {
                                        <button
                                            class="btn btn--primary"
                                            on:click=move |_| advance_step()
                                            disabled=move || !can_go_next()
                                        >
                                            "Next"
                                        </button>
                                    }
                                }
                            >
                                <button
                                    class="btn btn--primary run-page__submit"
                                    on:click=move |_| submit_action.run(())
                                    disabled=move || !can_go_next() || submitting()
                                >
                                    {move || if submitting() { "Submitting..." } else { "Submit check-in" }}
                                </button>
                            </Show>
                        </div>
                    </div>
                }
                .into_any(),
            }}
        </div>
    }
}
