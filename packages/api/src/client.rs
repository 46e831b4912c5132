//! # Client: managers over a backend and a token store
//!
//! [`Client`] pairs a [`Backend`] with a [`TokenStore`] and exposes the operations
//! the views trigger. It is split across sibling modules by concern:
//!
//! | Module | Operations |
//! |--------|-----------|
//! | `session` | `verify`, `login`, `register`, `logout` |
//! | `lists` | `fetch_lists`, `create_list`, `delete_list`, `fetch_list_detail` |
//! | `search` | `search`, `select_marker`, `resolve_effects`, `resolve_detail` |
//! | `membership` | `add_to_list`, `save_to_default`, `remove_from_list`, `open_membership`, `toggle_membership` |
//!
//! Every operation takes a [`StateHandle`] and reports its outcome by dispatching
//! [`Action`]s; nothing is returned as a hard error to the views except the
//! login/register results that the forms render inline.
//!
//! ## Failure policy
//!
//! [`report`](Client::report) is the single place failed calls are routed
//! through: an authentication failure clears the stored credential and reverts
//! to the unauthenticated state; anything else becomes an error feedback message.

use store::{Action, FeedbackLevel, StateHandle, TokenStore};

use crate::backend::Backend;
use crate::error::ApiError;

/// Backend plus credential persistence.
#[derive(Clone, Debug)]
pub struct Client<B, T> {
    pub(crate) backend: B,
    pub(crate) tokens: T,
}

impl<B: Backend, T: TokenStore> Client<B, T> {
    pub fn new(backend: B, tokens: T) -> Self {
        Self { backend, tokens }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn tokens(&self) -> &T {
        &self.tokens
    }

    /// Route a failed call into state.
    pub fn report<S: StateHandle>(&self, state: &mut S, err: &ApiError) {
        if err.is_auth_failure() {
            self.expire_session(state);
        } else {
            tracing::warn!("Backend call failed: {err}");
            state.dispatch(Action::Notify(FeedbackLevel::Error, err.user_message()));
        }
    }

    /// Forget the credential after the backend rejected it.
    pub(crate) fn expire_session<S: StateHandle>(&self, state: &mut S) {
        tracing::info!("Credential rejected, reverting to anonymous session");
        self.forget_credential();
        state.dispatch(Action::LoggedOut);
    }

    pub(crate) fn forget_credential(&self) {
        self.tokens.clear();
        self.backend.set_credential(None);
    }

    pub(crate) fn notify<S: StateHandle>(&self, state: &mut S, level: FeedbackLevel, message: String) {
        state.dispatch(Action::Notify(level, message));
    }

    pub(crate) fn is_authenticated<S: StateHandle>(&self, state: &S) -> bool {
        state.read(|s| s.is_authenticated())
    }
}
