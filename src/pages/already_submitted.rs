//! Terminal view for participants whose check-in already landed.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reached from the run page's idempotency gates: a local continuity record,
//! a status probe, or a submit conflict. Offers the two deliberate ways out:
//! retake (same participant, carried guest id) or start over as someone new
//! (drops the continuity record and returns to the entry form).

#[cfg(test)]
#[path = "already_submitted_test.rs"]
mod already_submitted_test;

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::hooks::use_params_map;

#[cfg(any(test, feature = "hydrate"))]
fn run_path(token: &str) -> String {
    format!("/join/{token}")
}

/// Headline copy, personalized when the stored record kept a usable name.
fn already_copy(stored_name: Option<&str>) -> String {
    match stored_name {
        Some(name) if !name.trim().is_empty() => {
            format!("You already checked in as {}.", name.trim())
        }
        _ => "You've already checked in for this session.".to_owned(),
    }
}

/// Already-submitted screen with retake and start-over actions.
#[component]
pub fn AlreadySubmittedPage() -> impl IntoView {
    #[cfg(feature = "hydrate")]
    let params = use_params_map();
    #[cfg(feature = "hydrate")]
    let token = move || params.read().get("token").unwrap_or_default();
    #[cfg(feature = "hydrate")]
    let flow = expect_context::<RwSignal<crate::state::join::JoinFlowState>>();

    let stored_name = RwSignal::new(None::<String>);

    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        use crate::storage::backend::BrowserStorage;
        use crate::storage::submissions::SubmissionLedger;

        let tok = token();
        if tok.is_empty() {
            return;
        }
        let record = SubmissionLedger::new(BrowserStorage).read(&tok);
        stored_name.set(record.map(|r| r.guest_name));
    });

    let retake = Callback::new({
        #[cfg(feature = "hydrate")]
        let navigate = leptos_router::hooks::use_navigate();
        move |(): ()| {
            #[cfg(feature = "hydrate")]
            {
                use crate::storage::backend::BrowserStorage;
                use crate::storage::submissions::SubmissionLedger;

                let tok = token();
                let continuity = SubmissionLedger::new(BrowserStorage).read(&tok);
                flow.update(|f| f.seed_retake(continuity));
                navigate(&run_path(&tok), leptos_router::NavigateOptions::default());
            }
        }
    });

    let start_over = Callback::new({
        #[cfg(feature = "hydrate")]
        let navigate = leptos_router::hooks::use_navigate();
        move |(): ()| {
            #[cfg(feature = "hydrate")]
            {
                use crate::storage::backend::BrowserStorage;
                use crate::storage::submissions::SubmissionLedger;

                SubmissionLedger::new(BrowserStorage).clear(&token());
                navigate("/", leptos_router::NavigateOptions::default());
            }
        }
    });

    view! {
        <div class="already-page">
            <div class="already-page__card">
                <h1 class="already-page__title">"Already checked in"</h1>
                <p class="already-page__message">
                    {move || already_copy(stored_name.read().as_deref())}
                </p>
                <p class="already-page__hint">
                    "Each participant checks in once per session. You can retake to update "
                    "your answers, or start over if this device is shared."
                </p>
                <div class="already-page__actions">
                    <button class="btn btn--primary" on:click=move |_| retake.run(())>
                        "Retake check-in"
                    </button>
                    <button class="btn" on:click=move |_| start_over.run(())>
                        "Start over as someone new"
                    </button>
                </div>
            </div>
        </div>
    }
}
