//! Progress header for the multi-step check-in wizard.

use leptos::prelude::*;

/// "Step X of Y" label with a fill bar underneath.
///
/// Receives plain values; callers re-render it from their own reactive
/// closure whenever the wizard moves.
#[component]
pub fn StepProgress(current: usize, total: usize) -> impl IntoView {
    let label = format!("Step {} of {}", current + 1, total);
    #[allow(clippy::cast_precision_loss)]
    let percent = if total == 0 {
        0.0
    } else {
        (current + 1) as f64 / total as f64 * 100.0
    };
    let fill_style = format!("width: {percent:.0}%;");

    view! {
        <div class="step-progress">
            <span class="step-progress__label">{label}</span>
            <div class="step-progress__track">
                <div class="step-progress__fill" style=fill_style></div>
            </div>
        </div>
    }
}
