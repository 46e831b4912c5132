//! Root context for the app: configuration, client, state, session lifecycle.

use dioxus::prelude::*;
use store::{Action, AppState, StateHandle};

use crate::client::{load_config, make_client, AppClient};
use crate::geolocation::current_position;
use crate::state::AppStore;

/// Provider component that owns the app state and keeps the session current.
/// Wrap your app with this component before any view that uses [`crate::use_app_store`].
#[component]
pub fn WaypointProvider(children: Element) -> Element {
    let config = use_context_provider(load_config);
    let client: AppClient = use_context_provider(|| make_client(&config));
    let viewport = config.map.default_viewport();
    let state = use_signal(|| AppState::new(viewport));
    let mut store = use_context_provider(|| AppStore::new(state));

    // Check the stored credential on mount
    let verify_client = client.clone();
    let _ = use_resource(move || {
        let client = verify_client.clone();
        async move {
            client.verify(&mut store).await;
        }
    });

    // Reload lists whenever the logged-in user changes
    let user = use_memo(move || state.read().user.clone());
    use_effect(move || {
        let user = user();
        let client = client.clone();
        spawn(async move {
            if user.is_some() {
                client.fetch_lists(&mut store).await;
            }
        });
    });

    // Ask for the browser position once
    use_effect(move || {
        spawn(async move {
            if let Some(viewport) = current_position().await {
                tracing::info!(lat = viewport.lat, long = viewport.long, "Centering on device location");
                store.dispatch(Action::ViewportChanged(viewport));
            }
        });
    });

    rsx! {
        {children}
    }
}
