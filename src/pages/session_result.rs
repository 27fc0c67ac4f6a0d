//! Post-submission receipt screen.
//!
//! SYSTEM CONTEXT
//! ==============
//! The run page stashes the receipt and course title in `JoinFlowState`
//! before navigating here, so this screen is a pure read of that context.
//! A direct load without a receipt (refresh, shared URL) bounces back to
//! the join route instead of rendering an empty shell.

#[cfg(test)]
#[path = "session_result_test.rs"]
mod session_result_test;

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::hooks::use_params_map;

use crate::net::types::SubmitReceipt;
use crate::state::join::JoinFlowState;

#[cfg(any(test, feature = "hydrate"))]
fn run_path(token: &str) -> String {
    format!("/join/{token}")
}

/// Lines for the "your response" card, in display order.
fn response_rows(receipt: &SubmitReceipt) -> Vec<(&'static str, String)> {
    let mut rows = vec![("Mood", receipt.mood.clone())];
    if let Some(style) = &receipt.learning_style {
        rows.push(("Learning style", style.clone()));
    }
    rows
}

/// Receipt screen with the recommended activity and a retake path.
#[component]
pub fn SessionResultPage() -> impl IntoView {
    #[cfg(feature = "hydrate")]
    let params = use_params_map();
    #[cfg(feature = "hydrate")]
    let token = move || params.read().get("token").unwrap_or_default();
    let flow = expect_context::<RwSignal<JoinFlowState>>();

    // Nothing to show without a receipt; bounce to the join route.
    #[cfg(feature = "hydrate")]
    {
        let navigate = leptos_router::hooks::use_navigate();
        Effect::new(move || {
            if flow.read().receipt.is_none() {
                navigate(&run_path(&token()), leptos_router::NavigateOptions::default());
            }
        });
    }

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

    view! {
        <div class="result-page">
            <Show
                when=move || flow.read().receipt.is_some()
                fallback=move || view! { <p class="result-page__loading">"Loading..."</p> }
            >
                <div class="result-page__stack">
                    <div class="result-page__card result-page__card--hero">
                        <h1 class="result-page__title">"Check-in complete!"</h1>
                        <p class="result-page__course">
                            {move || flow.read().course_title.clone().unwrap_or_default()}
                        </p>
                    </div>

                    {move || flow.read().receipt.clone().map(render_receipt)}

                    <div class="result-page__actions">
                        <button
                            class="btn btn--primary result-page__retake"
                            on:click=move |_| retake.run(())
                        >
                            "Retake check-in"
                        </button>
                        <a class="btn" href="/">"Home"</a>
                    </div>
                </div>
            </Show>
        </div>
    }
}

fn render_receipt(receipt: SubmitReceipt) -> impl IntoView {
    let rows = response_rows(&receipt)
        .into_iter()
        .map(|(label, value)| view! { <ResultRow label=label value=value/> })
        .collect::<Vec<_>>();
    let updated = receipt.is_baseline_update;
    let message = receipt.message.clone();

    view! {
        {receipt
            .recommended_activity
            .as_ref()
            .map(|rec| {
                let name = rec.activity.name.clone();
                let summary = rec.activity.summary.clone();
                let kind = rec.activity.kind.clone();
                view! {
                    <div class="result-page__card">
                        <span class="result-page__eyebrow">"Recommended for you"</span>
                        <h2 class="result-page__activity-name">{name}</h2>
                        <p class="result-page__activity-summary">{summary}</p>
                        <span class="result-page__activity-badge">{kind}</span>
                    </div>
                }
            })}

        <div class="result-page__card">
            <h2 class="result-page__section-title">"Your response"</h2>
            {rows}
            <Show when=move || updated>
                <p class="result-page__alert result-page__alert--success">
                    "Your learning profile has been updated"
                </p>
            </Show>
            {message.map(|text| view! { <p class="result-page__alert">{text}</p> })}
        </div>
    }
}

#[component]
fn ResultRow(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="result-page__row">
            <span class="result-page__row-label">{label}</span>
            <span class="result-page__row-value">{value}</span>
        </div>
    }
}
