//! Landing page where students type a session code or paste a join link.
//!
//! SYSTEM CONTEXT
//! ==============
//! QR scans land directly on `/join/{token}`; this page covers everyone
//! else. Whatever gets typed or pasted is normalized to a bare token, then
//! checked against the gateway before navigating, so broken links fail
//! inline instead of on the next screen.

#[cfg(test)]
#[path = "join_entry_test.rs"]
mod join_entry_test;

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::NavigateOptions;

#[cfg(any(test, feature = "hydrate"))]
use crate::net::error::GatewayError;
use crate::state::auth::AuthState;
#[cfg(feature = "hydrate")]
use crate::state::join::JoinFlowState;
use crate::util::join_token::resolve_join_token;

/// Normalize raw entry-form input down to a join token.
fn validate_entry_input(raw: &str) -> Result<String, &'static str> {
    let token = resolve_join_token(raw);
    if token.is_empty() {
        return Err("Enter a session code or link first.");
    }
    Ok(token)
}

/// Route for a resolved token.
#[cfg(any(test, feature = "hydrate"))]
fn run_path(token: &str) -> String {
    format!("/join/{token}")
}

/// Inline copy for a failed pre-join lookup. The entry form never redirects
/// on failure; it keeps the input editable.
#[cfg(any(test, feature = "hydrate"))]
fn entry_error_message(error: &GatewayError) -> String {
    match error {
        GatewayError::NotFound(_) => {
            "No active session matches that code. Double-check it with your teacher.".to_owned()
        }
        GatewayError::Closed(_) => "That session has already ended.".to_owned(),
        GatewayError::AlreadySubmitted(_)
        | GatewayError::Unauthorized(_)
        | GatewayError::Http { .. }
        | GatewayError::Transport(_) => {
            "Couldn't reach the session service. Check your connection and try again.".to_owned()
        }
    }
}

/// Entry page with a code field and an optional guest name field.
#[component]
pub fn JoinEntryPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    #[cfg(feature = "hydrate")]
    let flow = expect_context::<RwSignal<JoinFlowState>>();
    #[cfg(feature = "hydrate")]
    let navigate = leptos_router::hooks::use_navigate();

    let code = RwSignal::new(String::new());
    let name = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let signed_in = move || auth.read().is_authenticated();
    let signed_in_name = move || {
        auth.read()
            .session
            .as_ref()
            .map(|s| s.full_name.clone())
            .unwrap_or_default()
    };

    // No token, no button: resolve as they type.
    let join_disabled = move || busy.get() || resolve_join_token(&code.get()).is_empty();

    let on_join = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let token = match validate_entry_input(&code.get()) {
            Ok(token) => token,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            let guest_name = if signed_in() { None } else { Some(name.get()) };
            leptos::task::spawn_local(async move {
                match crate::net::api::fetch_join_session(&token).await {
                    Ok(_) => {
                        flow.update(|f| f.seed_entry(guest_name));
                        navigate(&run_path(&token), NavigateOptions::default());
                    }
                    Err(e) => {
                        info.set(entry_error_message(&e));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = token;
    };

    view! {
        <div class="entry-page">
            <div class="entry-page__card">
                <h1 class="entry-page__title">"ClassPulse"</h1>
                <p class="entry-page__subtitle">"Join your class check-in"</p>

                <form class="entry-page__form" on:submit=on_join>
                    <label class="entry-page__label">
                        "Session code or link"
                        <input
                            class="entry-page__input"
                            type="text"
                            placeholder="e.g. 7F9K2A or a pasted link"
                            prop:value=move || code.get()
                            on:input=move |ev| code.set(event_target_value(&ev))
                        />
                    </label>

                    <Show
                        when=signed_in
                        fallback=move || {
                            view! {
                                <label class="entry-page__label">
                                    "Your name (optional)"
                                    <input
                                        class="entry-page__input"
                                        type="text"
                                        placeholder="Shown to your teacher"
                                        prop:value=move || name.get()
                                        on:input=move |ev| name.set(event_target_value(&ev))
                                    />
                                </label>
                            }
                        }
                    >
                        <p class="entry-page__identity">
                            "Checking in as " <span>{signed_in_name}</span>
                        </p>
                    </Show>

                    <button
                        class="btn btn--primary entry-page__join"
                        type="submit"
                        disabled=join_disabled
                    >
                        {move || if busy.get() { "Checking..." } else { "Join session" }}
                    </button>
                </form>

                <Show when=move || !info.get().is_empty()>
                    <p class="entry-page__message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
