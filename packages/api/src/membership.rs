//! Saving places into lists: the listing panel's add/remove actions and the
//! per-place membership dropdown.

use store::models::{FAVORITES, PLANNED};
use store::{
    Action, FeedbackLevel, ListId, ListStatus, Location, PlaceId, StateHandle, TokenStore,
};

use crate::backend::Backend;
use crate::client::Client;

/// Which of the user's lists contain one place, as shown by the dropdown.
#[derive(Clone, Debug, PartialEq)]
pub struct Membership {
    pub place_id: PlaceId,
    pub statuses: Vec<ListStatus>,
}

impl Membership {
    pub fn is_added(&self, list_id: &ListId) -> bool {
        self.statuses
            .iter()
            .any(|s| &s.id == list_id && s.added)
    }
}

impl<B: Backend, T: TokenStore> Client<B, T> {
    /// Save `location` into a list. Anonymous users get a login prompt instead.
    pub async fn add_to_list<S: StateHandle>(
        &self,
        state: &mut S,
        list_id: &ListId,
        location: &Location,
    ) -> bool {
        let list_name = self.list_name(state, list_id);
        if !self.is_authenticated(state) {
            self.notify(
                state,
                FeedbackLevel::Warning,
                format!("Please log in to save to {list_name}"),
            );
            return false;
        }

        match self.backend.add_location(list_id, location).await {
            Ok(()) => {
                tracing::info!(list = %list_id, place = %location.place_id, "Location saved");
                self.notify(
                    state,
                    FeedbackLevel::Success,
                    format!("{} added to {list_name}", location.name),
                );
                true
            }
            Err(e) => {
                self.report(state, &e);
                false
            }
        }
    }

    /// Quick-save into the Favorites or Planned default list, looked up by name.
    pub async fn save_to_default<S: StateHandle>(
        &self,
        state: &mut S,
        name: &str,
        location: &Location,
    ) -> bool {
        if !self.is_authenticated(state) {
            self.notify(
                state,
                FeedbackLevel::Warning,
                format!("Please log in to save to {name}"),
            );
            return false;
        }

        let id = state.read(|s| match name {
            FAVORITES => s.favorites_id.clone(),
            PLANNED => s.planned_id.clone(),
            _ => None,
        });
        match id {
            Some(id) => self.add_to_list(state, &id, location).await,
            None => {
                self.notify(
                    state,
                    FeedbackLevel::Warning,
                    format!("{name} is not available yet"),
                );
                false
            }
        }
    }

    /// Remove a place from a list. The displayed set only changes once the backend agrees.
    pub async fn remove_from_list<S: StateHandle>(
        &self,
        state: &mut S,
        list_id: &ListId,
        location: &Location,
    ) -> bool {
        let list_name = self.list_name(state, list_id);
        if !self.is_authenticated(state) {
            self.notify(
                state,
                FeedbackLevel::Warning,
                format!("Please log in to edit {list_name}"),
            );
            return false;
        }

        match self
            .backend
            .remove_location(list_id, &location.place_id)
            .await
        {
            Ok(()) => {
                tracing::info!(list = %list_id, place = %location.place_id, "Location removed");
                state.dispatch(Action::LocationRemoved {
                    list_id: list_id.clone(),
                    place_id: location.place_id.clone(),
                });
                self.notify(
                    state,
                    FeedbackLevel::Success,
                    format!("{} removed from {list_name}", location.name),
                );
                true
            }
            Err(e) => {
                self.report(state, &e);
                false
            }
        }
    }

    /// Load the membership dropdown for one place.
    pub async fn open_membership<S: StateHandle>(
        &self,
        state: &mut S,
        place_id: &PlaceId,
    ) -> Option<Membership> {
        if !self.is_authenticated(state) {
            self.notify(
                state,
                FeedbackLevel::Warning,
                "Please log in to save places".to_string(),
            );
            return None;
        }

        match self.backend.check_location(place_id).await {
            Ok(statuses) => Some(Membership {
                place_id: place_id.clone(),
                statuses,
            }),
            Err(e) => {
                self.report(state, &e);
                None
            }
        }
    }

    /// Flip one dropdown entry with a single add or remove call.
    pub async fn toggle_membership<S: StateHandle>(
        &self,
        state: &mut S,
        membership: &mut Membership,
        list_id: &ListId,
        location: &Location,
    ) -> bool {
        let added = membership.is_added(list_id);
        let ok = if added {
            self.remove_from_list(state, list_id, location).await
        } else {
            self.add_to_list(state, list_id, location).await
        };

        if ok {
            if let Some(entry) = membership.statuses.iter_mut().find(|s| &s.id == list_id) {
                entry.added = !added;
            }
        }
        ok
    }

    fn list_name<S: StateHandle>(&self, state: &S, list_id: &ListId) -> String {
        state.read(|s| {
            s.list(list_id)
                .map(|l| l.name.clone())
                .unwrap_or_else(|| "list".to_string())
        })
    }
}
