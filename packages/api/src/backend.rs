//! # The backend seam
//!
//! [`Backend`] lists every REST operation the client consumes. [`crate::HttpClient`]
//! implements it over HTTP; [`crate::MemoryBackend`] implements it in memory for
//! tests. The managers in [`crate::Client`] only ever talk to this trait.
//!
//! Credentials are installed with [`set_credential`](Backend::set_credential) once a
//! session is established; every later call carries them.

use std::future::Future;

use serde::{Deserialize, Serialize};
use store::{List, ListId, ListStatus, Location, PlaceId, User, Viewport};

use crate::error::ApiError;

/// Successful `POST /auth/login` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Some deployments embed the user; otherwise it is resolved by verifying the token.
    #[serde(default)]
    pub user: Option<User>,
}

/// Async interface to the remote search / auth / list API.
pub trait Backend {
    /// Install or remove the bearer token sent with subsequent calls.
    fn set_credential(&self, token: Option<String>);

    fn verify_token(&self, token: &str) -> impl Future<Output = Result<User, ApiError>>;
    fn login(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = Result<LoginResponse, ApiError>>;
    fn register(&self, username: &str, password: &str) -> impl Future<Output = Result<(), ApiError>>;
    fn logout(&self) -> impl Future<Output = Result<(), ApiError>>;

    fn search(
        &self,
        query: &str,
        viewport: Viewport,
    ) -> impl Future<Output = Result<Vec<Location>, ApiError>>;
    fn search_by_id(&self, place_id: &PlaceId) -> impl Future<Output = Result<Location, ApiError>>;

    fn lists(&self) -> impl Future<Output = Result<Vec<List>, ApiError>>;
    fn create_list(&self, name: &str) -> impl Future<Output = Result<(), ApiError>>;
    fn list_detail(&self, id: &ListId) -> impl Future<Output = Result<List, ApiError>>;
    fn delete_list(&self, id: &ListId) -> impl Future<Output = Result<(), ApiError>>;

    fn check_location(
        &self,
        place_id: &PlaceId,
    ) -> impl Future<Output = Result<Vec<ListStatus>, ApiError>>;
    fn add_location(
        &self,
        list_id: &ListId,
        location: &Location,
    ) -> impl Future<Output = Result<(), ApiError>>;
    fn remove_location(
        &self,
        list_id: &ListId,
        place_id: &PlaceId,
    ) -> impl Future<Output = Result<(), ApiError>>;
}
