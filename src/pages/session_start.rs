//! Teacher start screen: launch a session and share its join link.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route-scoped to a course (`/courses/:course_id/start`). While no session
//! is live the page shows launch settings (require-survey toggle, mood check
//! prompt); a successful create flips it to the share panel with the join
//! link, the server-rendered QR image, a copy button, and a link out to the
//! session dashboard. "End session" sits behind a confirm dialog.
//!
//! A launch writes the single-slot recovery record so a reload rebuilds the
//! share panel without creating a second session. The record is adopted only
//! when its course matches the route; a record for another course stays in
//! storage untouched.

#[cfg(test)]
#[path = "session_start_test.rs"]
mod session_start_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

#[cfg(any(test, feature = "hydrate"))]
use crate::net::error::GatewayError;
use crate::state::auth::AuthState;
use crate::storage::active_session::ActiveSessionRecord;

/// Prompt pre-filled in the launch form.
const DEFAULT_MOOD_PROMPT: &str = "How are you feeling today?";

/// Shareable join URL for a token, anchored at `origin`.
fn join_url(origin: &str, token: &str) -> String {
    format!("{}/join/{token}", origin.trim_end_matches('/'))
}

/// Keep a loaded recovery record only when it belongs to this course.
///
/// A mismatch means another course's session owns the slot; the caller must
/// leave the stored record alone.
fn adopt_record(record: ActiveSessionRecord, course_id: &str) -> Option<ActiveSessionRecord> {
    (record.course_id == course_id).then_some(record)
}

/// Route of the teacher-facing dashboard for a live session.
fn dashboard_path(session_id: &str) -> String {
    format!("/teacher/sessions/{session_id}")
}

/// Screen copy for a failed launch or close call.
///
/// Stable failure classes pass the server's own wording through (the reader
/// here is the teacher); only credential and connectivity failures get fixed
/// copy.
#[cfg(any(test, feature = "hydrate"))]
fn action_error_message(err: &GatewayError) -> String {
    match err {
        GatewayError::Unauthorized(_) => {
            "Your sign-in expired. Sign in again, then retry.".to_owned()
        }
        GatewayError::Transport(_) => {
            "Couldn't reach the server. Check your connection and try again.".to_owned()
        }
        GatewayError::Http { message, .. } => message.clone(),
        GatewayError::NotFound(detail)
        | GatewayError::Closed(detail)
        | GatewayError::AlreadySubmitted(detail) => detail.clone(),
    }
}

/// Teacher-side launch screen for one course's check-in session.
/// Redirects to the join screen when the visitor is not a teacher.
#[component]
pub fn SessionStartPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let params = use_params_map();
    let course_id = move || params.read().get("course_id").unwrap_or_default();
    let navigate = use_navigate();

    // Anyone without a teacher credential goes back to the join screen.
    Effect::new(move || {
        if !auth.get().is_teacher() {
            navigate("/", NavigateOptions::default());
        }
    });

    let active = RwSignal::new(None::<ActiveSessionRecord>);
    let require_survey = RwSignal::new(true);
    let mood_prompt = RwSignal::new(DEFAULT_MOOD_PROMPT.to_owned());
    let busy = RwSignal::new(false);
    let error = RwSignal::new(String::new());
    let copied = RwSignal::new(false);
    let show_end = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    let alive = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
    #[cfg(feature = "hydrate")]
    {
        let alive = alive.clone();
        on_cleanup(move || alive.store(false, std::sync::atomic::Ordering::Relaxed));
    }

    // Adopt the recovery record, once per course id.
    let adopted = RwSignal::new(None::<String>);
    Effect::new(move || {
        let course = course_id();
        if adopted.get() == Some(course.clone()) {
            return;
        }
        adopted.set(Some(course.clone()));
        #[cfg(feature = "hydrate")]
        {
            use crate::storage::active_session::ActiveSessionStore;
            use crate::storage::backend::BrowserStorage;

            let record = ActiveSessionStore::new(BrowserStorage)
                .load()
                .and_then(|record| adopt_record(record, &course));
            active.set(record);
        }
    });

    let start_action = Callback::new({
        #[cfg(feature = "hydrate")]
        let alive = alive.clone();
        move |(): ()| {
            if busy.get_untracked() {
                return;
            }
            let prompt = mood_prompt.get_untracked().trim().to_owned();
            if prompt.is_empty() {
                error.set("Enter a mood check prompt first.".to_owned());
                return;
            }
            busy.set(true);
            error.set(String::new());
            #[cfg(feature = "hydrate")]
            {
                use crate::net::types::CreateSessionRequest;
                use crate::storage::active_session::ActiveSessionStore;
                use crate::storage::backend::BrowserStorage;

                let course = course_id();
                let request = CreateSessionRequest {
                    require_survey: require_survey.get_untracked(),
                    mood_prompt: prompt,
                };
                let auth_state = auth.get_untracked();
                let alive = alive.clone();
                leptos::task::spawn_local(async move {
                    let Some(bearer) = auth_state.bearer() else {
                        if alive.load(std::sync::atomic::Ordering::Relaxed) {
                            error.set(
                                "Your sign-in expired. Sign in again, then retry.".to_owned(),
                            );
                            busy.set(false);
                        }
                        return;
                    };
                    let result = crate::net::api::create_session(&course, &request, bearer).await;
                    if !alive.load(std::sync::atomic::Ordering::Relaxed) {
                        return;
                    }
                    busy.set(false);
                    match result {
                        Ok(launch) => {
                            let record = ActiveSessionRecord::from_launch(&launch);
                            ActiveSessionStore::new(BrowserStorage).save(&record);
                            active.set(Some(record));
                            copied.set(false);
                        }
                        Err(e) => error.set(action_error_message(&e)),
                    }
                });
            }
        }
    });

    let end_action = Callback::new({
        #[cfg(feature = "hydrate")]
        let alive = alive.clone();
        move |(): ()| {
            show_end.set(false);
            let Some(record) = active.get_untracked() else {
                return;
            };
            if busy.get_untracked() {
                return;
            }
            busy.set(true);
            error.set(String::new());
            #[cfg(feature = "hydrate")]
            {
                use crate::storage::active_session::ActiveSessionStore;
                use crate::storage::backend::BrowserStorage;

                let auth_state = auth.get_untracked();
                let alive = alive.clone();
                leptos::task::spawn_local(async move {
                    let Some(bearer) = auth_state.bearer() else {
                        if alive.load(std::sync::atomic::Ordering::Relaxed) {
                            error.set(
                                "Your sign-in expired. Sign in again, then retry.".to_owned(),
                            );
                            busy.set(false);
                        }
                        return;
                    };
                    let result = crate::net::api::close_session(&record.session_id, bearer).await;
                    if !alive.load(std::sync::atomic::Ordering::Relaxed) {
                        return;
                    }
                    busy.set(false);
                    match result {
                        // A not-found close means the session is already gone
                        // server-side; the slot is stale either way.
                        Ok(_) | Err(GatewayError::NotFound(_)) => {
                            ActiveSessionStore::new(BrowserStorage).clear();
                            active.set(None);
                        }
                        Err(e) => error.set(action_error_message(&e)),
                    }
                });
            }
            #[cfg(not(feature = "hydrate"))]
            let _ = record;
        }
    });

    let on_copy = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let Some(record) = active.get_untracked() else {
                return;
            };
            if let Some(window) = web_sys::window() {
                let origin = window.location().origin().unwrap_or_default();
                let _ = window
                    .navigator()
                    .clipboard()
                    .write_text(&join_url(&origin, &record.join_token));
                copied.set(true);
            }
        }
    };

    let share_url = move || {
        active.get().map_or_else(String::new, |record| {
            #[cfg(feature = "hydrate")]
            {
                if let Some(window) = web_sys::window() {
                    if let Ok(origin) = window.location().origin() {
                        return join_url(&origin, &record.join_token);
                    }
                }
            }
            join_url("", &record.join_token)
        })
    };

    let mode_summary = move || {
        active.get().map_or_else(String::new, |record| {
            if record.require_survey {
                "Students answer the survey, then the mood check.".to_owned()
            } else {
                "Students answer the mood check only.".to_owned()
            }
        })
    };

    let qr_src = move || active.get().map(|record| record.qr_url).unwrap_or_default();
    let dashboard_href = move || {
        active
            .get()
            .map(|record| dashboard_path(&record.session_id))
            .unwrap_or_default()
    };

    let on_end_cancel = Callback::new(move |_| show_end.set(false));

    // Clearing the credential flips the gate effect, which redirects home.
    let on_sign_out = move |_| {
        #[cfg(feature = "hydrate")]
        {
            crate::state::auth::clear_credentials(&crate::storage::backend::BrowserStorage);
            auth.set(AuthState::default());
        }
    };

    view! {
        <div class="start-page">
            <div class="start-page__card">
                <header class="start-page__header">
                    <div class="start-page__heading">
                        <h1 class="start-page__title">"Launch a session"</h1>
                        <p class="start-page__subtitle">
                            "Students join with a link or QR code and check in from their own device."
                        </p>
                    </div>
                    <button class="btn start-page__sign-out" on:click=on_sign_out>
                        "Sign out"
                    </button>
                </header>

                <Show when=move || !error.get().is_empty()>
                    <p class="start-page__error">{move || error.get()}</p>
                </Show>

                <Show
                    when=move || active.get().is_some()
                    fallback=move || {
                        view! {
                            <div class="start-page__form">
                                <label class="start-page__toggle">
                                    <input
                                        type="checkbox"
                                        prop:checked=move || require_survey.get()
                                        on:change=move |ev| require_survey.set(event_target_checked(&ev))
                                    />
                                    "Require the learning survey"
                                </label>
                                <p class="start-page__hint">
                                    "Students answer a short survey before their mood check and get a personalized activity."
                                </p>
                                <label class="start-page__label">
                                    "Mood check prompt"
                                    <input
                                        class="start-page__input"
                                        type="text"
                                        prop:value=move || mood_prompt.get()
                                        on:input=move |ev| mood_prompt.set(event_target_value(&ev))
                                    />
                                </label>
                                <button
                                    class="btn btn--primary start-page__launch"
                                    disabled=move || busy.get()
                                    on:click=move |_| start_action.run(())
                                >
                                    {move || if busy.get() { "Starting..." } else { "Start session" }}
                                </button>
                            </div>
                        }
                    }
                >
                    <div class="start-page__live">
                        <h2 class="start-page__live-title">"Session is live"</h2>
                        <p class="start-page__hint">{mode_summary}</p>
                        <img class="start-page__qr" src=qr_src alt="QR code for the join link"/>
                        <div class="start-page__link-row">
                            <code class="start-page__link">{share_url}</code>
                            <button class="btn start-page__copy" on:click=on_copy>
                                {move || if copied.get() { "Copied" } else { "Copy link" }}
                            </button>
                        </div>
                        <div class="start-page__actions">
                            <a class="btn" href=dashboard_href>"Open session dashboard"</a>
                            <button
                                class="btn btn--danger"
                                disabled=move || busy.get()
                                on:click=move |_| show_end.set(true)
                            >
                                "End session"
                            </button>
                        </div>
                    </div>
                </Show>

                <Show when=move || show_end.get()>
                    <EndSessionDialog on_cancel=on_end_cancel on_confirm=end_action/>
                </Show>
            </div>
        </div>
    }
}

/// Confirm dialog shown before closing the live session.
#[component]
fn EndSessionDialog(on_cancel: Callback<()>, on_confirm: Callback<()>) -> impl IntoView {
    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>"End Session"</h2>
                <p class="dialog__danger">
                    "Students will no longer be able to check in once this session ends."
                </p>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--danger" on:click=move |_| on_confirm.run(())>
                        "End session"
                    </button>
                </div>
            </div>
        </div>
    }
}
