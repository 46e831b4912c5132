//! Transient feedback banner for the side panel.

use std::time::Duration;

use dioxus::prelude::*;
use store::{Action, AppState, FeedbackLevel, StateHandle};

use crate::client::{sleep, use_config};
use crate::state::use_app_store;

fn level_class(level: FeedbackLevel) -> &'static str {
    match level {
        FeedbackLevel::Info => "feedback feedback--info",
        FeedbackLevel::Success => "feedback feedback--success",
        FeedbackLevel::Warning => "feedback feedback--warning",
        FeedbackLevel::Error => "feedback feedback--error",
    }
}

/// Countdown key of the visible message. Unrelated dispatches leave it unchanged.
fn feedback_generation(state: &AppState) -> Option<u64> {
    state.feedback.as_ref().map(|f| f.generation)
}

/// Shows the current feedback message and clears it after the configured timeout.
///
/// A newer message restarts the countdown; the expiry of an older one is ignored.
#[component]
pub fn FeedbackBanner() -> Element {
    let mut store = use_app_store();
    let timeout = Duration::from_secs(u64::from(use_config().feedback.timeout_secs));
    let state = store.signal();

    let generation = use_memo(move || feedback_generation(&state.read()));

    use_effect(move || {
        if let Some(generation) = generation() {
            spawn(async move {
                sleep(timeout).await;
                store.dispatch(Action::FeedbackExpired(generation));
            });
        }
    });

    let feedback = state.read().feedback.clone();
    match feedback {
        Some(feedback) => rsx! {
            div {
                class: level_class(feedback.level),
                role: "status",
                "{feedback.message}"
            }
        },
        None => rsx! {},
    }
}

#[cfg(test)]
mod tests {
    use store::PlaceId;

    use super::*;

    #[test]
    fn test_generation_ignores_unrelated_actions() {
        let mut state = AppState::default();
        assert_eq!(feedback_generation(&state), None);

        state.dispatch(Action::Notify(FeedbackLevel::Info, "Saved".to_string()));
        let first = feedback_generation(&state);
        assert!(first.is_some());

        state.dispatch(Action::SetQuery("cof".to_string()));
        state.dispatch(Action::SetQuery("coffee".to_string()));
        state.dispatch(Action::ListingClicked(PlaceId::new("p1")));
        assert_eq!(feedback_generation(&state), first);

        state.dispatch(Action::Notify(FeedbackLevel::Error, "Request failed".to_string()));
        assert_ne!(feedback_generation(&state), first);
    }
}
