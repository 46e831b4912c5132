//! Session manager: credential verification, login, registration, logout.

use store::{Action, StateHandle, TokenStore, User};

use crate::backend::Backend;
use crate::client::Client;
use crate::error::ApiError;

impl<B: Backend, T: TokenStore> Client<B, T> {
    /// Check the stored credential against the backend.
    ///
    /// Without a stored token this settles as anonymous immediately, with no
    /// network call. A rejected or unverifiable token is deleted. Never fails.
    pub async fn verify<S: StateHandle>(&self, state: &mut S) {
        let Some(token) = self.tokens.load() else {
            state.dispatch(Action::SessionVerified(None));
            return;
        };

        match self.backend.verify_token(&token).await {
            Ok(user) => {
                tracing::info!(username = %user.username, "Session verified");
                self.backend.set_credential(Some(token));
                state.dispatch(Action::SessionVerified(Some(user)));
            }
            Err(e) => {
                tracing::warn!("Stored credential rejected: {e}");
                self.forget_credential();
                state.dispatch(Action::SessionVerified(None));
            }
        }
    }

    /// Log in and persist the issued token.
    ///
    /// On failure the state stays anonymous and the error's
    /// [`user_message`](ApiError::user_message) is meant for the login form.
    pub async fn login<S: StateHandle>(
        &self,
        state: &mut S,
        username: &str,
        password: &str,
    ) -> Result<User, ApiError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(ApiError::Validation(
                "Username and password are required".to_string(),
            ));
        }

        let response = self.backend.login(username, password).await?;
        self.backend
            .set_credential(Some(response.access_token.clone()));

        let user = match response.user {
            Some(user) => user,
            None => match self.backend.verify_token(&response.access_token).await {
                Ok(user) => user,
                Err(e) => {
                    self.backend.set_credential(None);
                    return Err(e);
                }
            },
        };

        self.tokens.save(&response.access_token);
        tracing::info!(username = %user.username, "Logged in");
        state.dispatch(Action::LoggedIn(user.clone()));
        Ok(user)
    }

    /// Create an account. The caller navigates to the login view on success.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<(), ApiError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ApiError::Validation("Username is required".to_string()));
        }
        if password.is_empty() {
            return Err(ApiError::Validation("Password is required".to_string()));
        }
        if password != confirm_password {
            return Err(ApiError::Validation("Passwords do not match".to_string()));
        }
        self.backend.register(username, password).await
    }

    /// Log out. Local state is reset even when the backend call fails.
    pub async fn logout<S: StateHandle>(&self, state: &mut S) {
        if let Err(e) = self.backend.logout().await {
            tracing::warn!("Backend logout failed, clearing session anyway: {e}");
        }
        self.forget_credential();
        state.dispatch(Action::LoggedOut);
    }
}

#[cfg(test)]
mod tests {
    use store::{AppState, MemoryTokenStore};

    use super::*;
    use crate::MemoryBackend;

    fn client() -> Client<MemoryBackend, MemoryTokenStore> {
        let backend = MemoryBackend::new();
        backend.add_user("ada", "lovelace");
        Client::new(backend, MemoryTokenStore::new())
    }

    #[tokio::test]
    async fn test_verify_without_token_makes_no_call() {
        let client = client();
        let mut state = AppState::default();
        client.verify(&mut state).await;

        assert!(client.backend().calls().is_empty());
        assert!(state.user.is_none());
        assert!(state.session_checked);
    }

    #[tokio::test]
    async fn test_verify_valid_token() {
        let client = client();
        let token = client.backend().issue_token("ada");
        client.tokens().save(&token);

        let mut state = AppState::default();
        client.verify(&mut state).await;

        assert_eq!(state.user.as_ref().map(|u| u.username.as_str()), Some("ada"));
        assert_eq!(client.backend().credential(), Some(token));
    }

    #[tokio::test]
    async fn test_verify_rejected_token_is_cleared() {
        let client = client();
        client.tokens().save("stale-token");

        let mut state = AppState::default();
        client.verify(&mut state).await;

        assert!(state.user.is_none());
        assert!(client.tokens().load().is_none());
        assert!(client.backend().credential().is_none());
        assert_eq!(client.backend().calls(), vec!["verify_token"]);
    }

    #[tokio::test]
    async fn test_verify_network_failure_never_errors() {
        let client = client();
        let token = client.backend().issue_token("ada");
        client.tokens().save(&token);
        client
            .backend()
            .fail("verify_token", ApiError::Transport("offline".to_string()));

        let mut state = AppState::default();
        client.verify(&mut state).await;
        assert!(state.user.is_none());
        assert!(client.tokens().load().is_none());
    }

    #[tokio::test]
    async fn test_login_persists_token() {
        let client = client();
        let mut state = AppState::default();
        let user = client.login(&mut state, "ada", "lovelace").await.unwrap();

        assert_eq!(user.username, "ada");
        assert_eq!(state.user, Some(user));
        assert!(client.tokens().load().is_some());
        assert_eq!(client.tokens().load(), client.backend().credential());
    }

    #[tokio::test]
    async fn test_login_failure_reports_backend_detail() {
        let client = client();
        let mut state = AppState::default();
        let err = client.login(&mut state, "ada", "wrong").await.unwrap_err();

        assert_eq!(err.user_message(), "Invalid credentials");
        assert!(state.user.is_none());
        assert!(client.tokens().load().is_none());
    }

    #[tokio::test]
    async fn test_register_password_mismatch_is_local() {
        let client = client();
        let err = client.register("bob", "one", "two").await.unwrap_err();
        assert_eq!(err.user_message(), "Passwords do not match");
        assert!(client.backend().calls().is_empty());

        client.register("bob", "same", "same").await.unwrap();
        assert_eq!(client.backend().calls(), vec!["register"]);
    }

    #[tokio::test]
    async fn test_logout_resets_even_when_backend_fails() {
        let client = client();
        let mut state = AppState::default();
        client.login(&mut state, "ada", "lovelace").await.unwrap();
        client.fetch_lists(&mut state).await;
        assert_eq!(state.lists.len(), 2);

        client
            .backend()
            .fail("logout", ApiError::Transport("offline".to_string()));
        client.logout(&mut state).await;

        assert!(state.user.is_none());
        assert!(state.lists.is_empty());
        assert!(client.tokens().load().is_none());
    }

    #[tokio::test]
    async fn test_logout_resets_when_backend_succeeds() {
        let client = client();
        let mut state = AppState::default();
        client.login(&mut state, "ada", "lovelace").await.unwrap();
        client.fetch_lists(&mut state).await;

        client.logout(&mut state).await;
        assert!(state.user.is_none());
        assert!(state.lists.is_empty());
    }
}
