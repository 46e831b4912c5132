//! Reactive handle on the shared [`AppState`].

use dioxus::prelude::*;
use store::{Action, AppState, Effect, StateHandle};

/// The app-wide state signal, usable wherever the managers expect a [`StateHandle`].
#[derive(Clone, Copy, PartialEq)]
pub struct AppStore {
    state: Signal<AppState>,
}

impl AppStore {
    pub fn new(state: Signal<AppState>) -> Self {
        Self { state }
    }

    pub fn signal(&self) -> Signal<AppState> {
        self.state
    }
}

impl StateHandle for AppStore {
    fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.state.read())
    }

    fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        tracing::trace!(?action, "dispatch");
        self.state.write().dispatch(action)
    }
}

/// The store provided by [`crate::WaypointProvider`].
pub fn use_app_store() -> AppStore {
    use_context::<AppStore>()
}
