//! Single-select button list shared by survey questions and the mood check.

use leptos::prelude::*;

/// One selectable entry in a [`ChoiceList`].
#[derive(Clone, PartialEq, Eq)]
pub struct Choice {
    /// Value reported when picked.
    pub id: String,
    /// Text shown on the button.
    pub label: String,
}

/// Vertical list of option buttons with at most one active entry.
///
/// Highlights `selected` and reports picks through `on_pick`. While
/// `disabled` the buttons stay visible but ignore clicks, so an in-flight
/// submission cannot be re-armed from a stale screen.
#[component]
pub fn ChoiceList(
    choices: Vec<Choice>,
    selected: Option<String>,
    on_pick: Callback<String>,
    #[prop(optional)] disabled: bool,
) -> impl IntoView {
    let buttons = choices
        .into_iter()
        .map(|choice| {
            let is_active = selected.as_deref() == Some(choice.id.as_str());
            let id = choice.id;
            let on_click = move |_| {
                if !disabled {
                    on_pick.run(id.clone());
                }
            };

            view! {
                <button
                    class="choice-list__btn"
                    class:choice-list__btn--active=is_active
                    disabled=disabled
                    on:click=on_click
                >
                    {choice.label}
                </button>
            }
        })
        .collect::<Vec<_>>();

    view! { <div class="choice-list">{buttons}</div> }
}
