//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::{
    already_submitted::AlreadySubmittedPage, join_entry::JoinEntryPage,
    session_result::SessionResultPage, session_run::SessionRunPage,
    session_start::SessionStartPage,
};
use crate::state::{auth::AuthState, join::JoinFlowState};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the auth and join-flow contexts and sets up client-side routing.
/// The stored credential is read once the client mounts; the server renders
/// every page in its logged-out shape.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let flow = RwSignal::new(JoinFlowState::default());

    provide_context(auth);
    provide_context(flow);

    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        auth.set(AuthState::load(&crate::storage::backend::BrowserStorage));
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/classpulse-client.css"/>
        <Title text="ClassPulse"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=JoinEntryPage/>
                <Route path=(StaticSegment("join"), ParamSegment("token")) view=SessionRunPage/>
                <Route
                    path=(StaticSegment("join"), ParamSegment("token"), StaticSegment("result"))
                    view=SessionResultPage
                />
                <Route
                    path=(
                        StaticSegment("join"),
                        ParamSegment("token"),
                        StaticSegment("already-submitted"),
                    )
                    view=AlreadySubmittedPage
                />
                <Route
                    path=(
                        StaticSegment("courses"),
                        ParamSegment("course_id"),
                        StaticSegment("start"),
                    )
                    view=SessionStartPage
                />
            </Routes>
        </Router>
    }
}
