//! List manager: the user's lists and the list-detail view.

use store::{Action, FeedbackLevel, ListId, StateHandle, TokenStore, View};

use crate::backend::Backend;
use crate::client::Client;

impl<B: Backend, T: TokenStore> Client<B, T> {
    /// Reload every list the user owns. No-op when nobody is logged in.
    pub async fn fetch_lists<S: StateHandle>(&self, state: &mut S) {
        if !self.is_authenticated(state) {
            return;
        }
        match self.backend.lists().await {
            Ok(lists) => {
                tracing::debug!(count = lists.len(), "Lists loaded");
                state.dispatch(Action::ListsLoaded(lists));
            }
            Err(e) => self.report(state, &e),
        }
    }

    /// Create a list named `name` (trimmed). Returns whether it was created.
    pub async fn create_list<S: StateHandle>(&self, state: &mut S, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            self.notify(
                state,
                FeedbackLevel::Warning,
                "List name cannot be empty".to_string(),
            );
            return false;
        }

        if let Err(e) = self.backend.create_list(name).await {
            self.report(state, &e);
            return false;
        }
        self.notify(state, FeedbackLevel::Success, format!("Created {name}"));
        self.fetch_lists(state).await;
        true
    }

    /// Delete a user-created list, then return to the profile view.
    ///
    /// Default lists, and lists this state has never loaded, are refused before
    /// any call is made.
    pub async fn delete_list<S: StateHandle>(&self, state: &mut S, id: &ListId) -> bool {
        let (known, is_default) =
            state.read(|s| (s.known_list(id).is_some(), s.is_default_list(id)));
        if is_default {
            self.notify(
                state,
                FeedbackLevel::Warning,
                "Cannot delete a default list".to_string(),
            );
            return false;
        }
        if !known {
            tracing::warn!(list = %id, "Refusing to delete a list that is not loaded");
            self.notify(
                state,
                FeedbackLevel::Warning,
                "List is not loaded yet".to_string(),
            );
            return false;
        }

        if let Err(e) = self.backend.delete_list(id).await {
            self.report(state, &e);
            return false;
        }
        tracing::info!(list = %id, "List deleted");
        self.fetch_lists(state).await;
        state.dispatch(Action::Redirect(View::Profile));
        true
    }

    /// Load one list and display its locations.
    ///
    /// Any failure sends the shell back to the search view.
    pub async fn fetch_list_detail<S: StateHandle>(&self, state: &mut S, id: &ListId) {
        state.dispatch(Action::ClearSelection);
        match self.backend.list_detail(id).await {
            Ok(list) => {
                state.dispatch(Action::ListDetailLoaded(list));
            }
            Err(e) => {
                tracing::warn!(list = %id, "Failed to load list: {e}");
                if e.is_auth_failure() {
                    self.expire_session(state);
                } else if !e.is_not_found() {
                    self.notify(state, FeedbackLevel::Error, e.user_message());
                }
                state.dispatch(Action::Redirect(View::Search));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use store::{AppState, MemoryTokenStore};

    use super::*;
    use crate::{ApiError, MemoryBackend};

    async fn logged_in() -> (Client<MemoryBackend, MemoryTokenStore>, AppState) {
        let backend = MemoryBackend::new();
        backend.add_user("ada", "lovelace");
        let client = Client::new(backend, MemoryTokenStore::new());
        let mut state = AppState::default();
        client.login(&mut state, "ada", "lovelace").await.unwrap();
        client.fetch_lists(&mut state).await;
        client.backend().clear_calls();
        (client, state)
    }

    fn feedback(state: &AppState) -> Option<&str> {
        state.feedback.as_ref().map(|f| f.message.as_str())
    }

    #[tokio::test]
    async fn test_fetch_lists_noop_when_anonymous() {
        let client = Client::new(MemoryBackend::new(), MemoryTokenStore::new());
        let mut state = AppState::default();
        client.fetch_lists(&mut state).await;
        assert!(client.backend().calls().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_lists_exposes_default_ids() {
        let (_client, state) = logged_in().await;
        assert_eq!(state.lists.len(), 2);
        assert!(state.favorites_id.is_some());
        assert!(state.planned_id.is_some());
        assert_ne!(state.favorites_id, state.planned_id);
    }

    #[tokio::test]
    async fn test_create_list_rejects_blank_names() {
        let (client, mut state) = logged_in().await;
        for name in ["", "   "] {
            assert!(!client.create_list(&mut state, name).await);
        }
        assert!(client.backend().calls().is_empty());
        assert_eq!(state.lists.len(), 2);
        assert_eq!(feedback(&state), Some("List name cannot be empty"));
    }

    #[tokio::test]
    async fn test_create_list_trims_and_refetches() {
        let (client, mut state) = logged_in().await;
        assert!(client.create_list(&mut state, "  Brunch  ").await);
        assert_eq!(client.backend().calls(), vec!["create_list", "lists"]);
        assert!(state.lists.iter().any(|l| l.name == "Brunch"));
    }

    #[tokio::test]
    async fn test_delete_default_list_makes_no_call() {
        let (client, mut state) = logged_in().await;
        let favorites = state.favorites_id.clone().unwrap();

        assert!(!client.delete_list(&mut state, &favorites).await);
        assert!(client.backend().calls().is_empty());
        assert_eq!(state.lists.len(), 2);
        assert_eq!(feedback(&state), Some("Cannot delete a default list"));
    }

    #[tokio::test]
    async fn test_delete_default_list_seen_only_in_detail() {
        let backend = MemoryBackend::new();
        backend.add_user("ada", "lovelace");
        let client = Client::new(backend, MemoryTokenStore::new());
        let mut state = AppState::default();
        client.login(&mut state, "ada", "lovelace").await.unwrap();
        let favorites = client
            .backend()
            .lists()
            .await
            .unwrap()
            .into_iter()
            .find(|l| l.is_default)
            .map(|l| l.id)
            .unwrap();

        client.fetch_list_detail(&mut state, &favorites).await;
        assert!(state.lists.is_empty());
        client.backend().clear_calls();

        assert!(!client.delete_list(&mut state, &favorites).await);
        assert!(client.backend().calls().is_empty());
        assert_eq!(feedback(&state), Some("Cannot delete a default list"));
    }

    #[tokio::test]
    async fn test_delete_unknown_list_makes_no_call() {
        let (client, mut state) = logged_in().await;
        assert!(!client.delete_list(&mut state, &ListId::new("999")).await);
        assert!(client.backend().calls().is_empty());
        assert_eq!(feedback(&state), Some("List is not loaded yet"));
    }

    #[tokio::test]
    async fn test_delete_list_redirects_to_profile() {
        let (client, mut state) = logged_in().await;
        client.create_list(&mut state, "Trip").await;
        let id = state
            .lists
            .iter()
            .find(|l| l.name == "Trip")
            .map(|l| l.id.clone())
            .unwrap();

        assert!(client.delete_list(&mut state, &id).await);
        assert_eq!(state.lists.len(), 2);
        assert_eq!(state.redirect, Some(View::Profile));
    }

    #[tokio::test]
    async fn test_list_detail_failure_redirects_to_search() {
        let (client, mut state) = logged_in().await;
        client
            .fetch_list_detail(&mut state, &ListId::new("999"))
            .await;
        assert_eq!(state.redirect, Some(View::Search));
        assert!(state.active_list.is_none());
        assert!(state.user.is_some());
    }

    #[tokio::test]
    async fn test_rejected_credential_logs_out() {
        let (client, mut state) = logged_in().await;
        let token = client.tokens().load().unwrap();
        client.backend().revoke_token(&token);

        client.fetch_lists(&mut state).await;
        assert!(state.user.is_none());
        assert!(state.lists.is_empty());
        assert!(client.tokens().load().is_none());
    }

    #[tokio::test]
    async fn test_backend_error_detail_becomes_feedback() {
        let (client, mut state) = logged_in().await;
        client.backend().fail(
            "create_list",
            ApiError::Backend {
                status: 500,
                detail: None,
            },
        );
        assert!(!client.create_list(&mut state, "Trip").await);
        assert_eq!(feedback(&state), Some("Request failed"));
        assert_eq!(state.lists.len(), 2);
    }
}
