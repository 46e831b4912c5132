//! Search controller and the map/listing selection side effects that need the backend.

use store::{Action, Effect, PlaceId, StateHandle, TokenStore, Viewport};

use crate::backend::Backend;
use crate::client::Client;

impl<B: Backend, T: TokenStore> Client<B, T> {
    /// Run a text search around `viewport`.
    ///
    /// A blank query does nothing. A failed search keeps the previous results.
    pub async fn search<S: StateHandle>(&self, state: &mut S, query: &str, viewport: Viewport) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }

        state.dispatch(Action::ClearSelection);
        state.dispatch(Action::SearchStarted);
        match self.backend.search(query, viewport).await {
            Ok(results) => {
                tracing::debug!(query, count = results.len(), "Search completed");
                state.dispatch(Action::SearchCompleted(results));
            }
            Err(e) => {
                state.dispatch(Action::SearchFailed);
                self.report(state, &e);
            }
        }
    }

    pub fn clear_search<S: StateHandle>(&self, state: &mut S) {
        state.dispatch(Action::SearchCleared);
    }

    /// Handle a marker click.
    ///
    /// Returns every effect of the click. The view performs the scroll right away
    /// and hands the rest to [`Client::resolve_effects`], so a slow detail lookup
    /// never holds up the listing.
    pub fn select_marker<S: StateHandle>(&self, state: &mut S, place_id: &PlaceId) -> Vec<Effect> {
        state.dispatch(Action::MarkerClicked(place_id.clone()))
    }

    /// Run the detail lookups among `effects`, for markers that came from a saved list.
    pub async fn resolve_effects<S: StateHandle>(&self, state: &mut S, effects: &[Effect]) {
        for effect in effects {
            if let Effect::ResolveDetail(id) = effect {
                self.resolve_detail(state, id).await;
            }
        }
    }

    /// Fetch one place by id and merge it into the displayed set.
    pub async fn resolve_detail<S: StateHandle>(&self, state: &mut S, place_id: &PlaceId) {
        match self.backend.search_by_id(place_id).await {
            Ok(location) => {
                state.dispatch(Action::DetailResolved(location));
            }
            Err(e) => tracing::warn!(place = %place_id, "Failed to resolve place details: {e}"),
        }
    }
}
