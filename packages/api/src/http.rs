//! # HTTP backend
//!
//! [`HttpClient`] is the production [`Backend`]: a thin wrapper around a shared
//! [`reqwest::Client`] that joins endpoint paths onto the configured base URL,
//! attaches `Authorization: Bearer <token>` when a credential is installed, and
//! turns non-success responses into [`ApiError`]s carrying the backend's `detail`.
//!
//! The same code runs natively and in the browser (reqwest uses `fetch` on WASM).

use std::sync::{Arc, RwLock};

use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use store::{ClientConfig, List, ListId, ListStatus, Location, PlaceId, User, Viewport};

use crate::backend::{Backend, LoginResponse};
use crate::error::{parse_detail, ApiError};

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Location>,
}

#[derive(Deserialize)]
struct SearchByIdResponse {
    result: Location,
}

/// REST client for the Waypoint backend.
#[derive(Clone, Debug)]
pub struct HttpClient {
    base_url: String,
    http: reqwest::Client,
    credential: Arc<RwLock<Option<String>>>,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            credential: Arc::new(RwLock::new(None)),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The bearer token currently attached to requests.
    pub fn credential(&self) -> Option<String> {
        self.credential.read().ok().and_then(|c| c.clone())
    }

    /// Build `<base>/<segments...>`, percent-encoding each segment.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::Transport(format!("Invalid base URL {}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport(format!("Invalid base URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn get(&self, segments: &[&str]) -> Result<RequestBuilder, ApiError> {
        Ok(self.authorized(self.http.get(self.endpoint(segments)?)))
    }

    pub(crate) fn post(&self, segments: &[&str]) -> Result<RequestBuilder, ApiError> {
        Ok(self.authorized(self.http.post(self.endpoint(segments)?)))
    }

    pub(crate) fn delete(&self, segments: &[&str]) -> Result<RequestBuilder, ApiError> {
        Ok(self.authorized(self.http.delete(self.endpoint(segments)?)))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.credential() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send and decode a JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = Self::checked(request).await?;
        Ok(response.json::<T>().await?)
    }

    /// Send and discard the body.
    pub(crate) async fn send_empty(&self, request: RequestBuilder) -> Result<(), ApiError> {
        Self::checked(request).await?;
        Ok(())
    }

    async fn checked(request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let detail = parse_detail(&body);
        tracing::debug!(status = status.as_u16(), ?detail, "backend call failed");
        Err(ApiError::from_status(status.as_u16(), detail))
    }
}

impl Backend for HttpClient {
    fn set_credential(&self, token: Option<String>) {
        if let Ok(mut slot) = self.credential.write() {
            *slot = token;
        }
    }

    async fn verify_token(&self, token: &str) -> Result<User, ApiError> {
        self.send_json(self.get(&["auth", "verify-token", token])?).await
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let form = [("username", username), ("password", password)];
        self.send_json(self.post(&["auth", "login"])?.form(&form))
            .await
    }

    async fn register(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({ "username": username, "password": password });
        self.send_empty(self.post(&["auth", "register"])?.json(&body))
            .await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.send_empty(self.post(&["auth", "logout"])?).await
    }

    async fn search(&self, query: &str, viewport: Viewport) -> Result<Vec<Location>, ApiError> {
        let lat = viewport.lat.to_string();
        let long = viewport.long.to_string();
        let params = [("query", query), ("lat", lat.as_str()), ("long", long.as_str())];
        let response: SearchResponse = self
            .send_json(self.get(&["searchQuery"])?.query(&params))
            .await?;
        Ok(response.results)
    }

    async fn search_by_id(&self, place_id: &PlaceId) -> Result<Location, ApiError> {
        let response: SearchByIdResponse = self
            .send_json(self.get(&["searchByID"])?.query(&[("id", place_id.as_str())]))
            .await?;
        Ok(response.result)
    }

    async fn lists(&self) -> Result<Vec<List>, ApiError> {
        self.send_json(self.get(&["lists"])?).await
    }

    async fn create_list(&self, name: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({ "name": name });
        self.send_empty(self.post(&["lists"])?.json(&body)).await
    }

    async fn list_detail(&self, id: &ListId) -> Result<List, ApiError> {
        self.send_json(self.get(&["lists", id.as_str()])?).await
    }

    async fn delete_list(&self, id: &ListId) -> Result<(), ApiError> {
        self.send_empty(self.delete(&["lists", id.as_str()])?).await
    }

    async fn check_location(&self, place_id: &PlaceId) -> Result<Vec<ListStatus>, ApiError> {
        self.send_json(self.get(&["locations", "check-location", place_id.as_str()])?)
            .await
    }

    async fn add_location(&self, list_id: &ListId, location: &Location) -> Result<(), ApiError> {
        self.send_empty(self.post(&["locations", list_id.as_str()])?.json(location))
            .await
    }

    async fn remove_location(&self, list_id: &ListId, place_id: &PlaceId) -> Result<(), ApiError> {
        self.send_empty(self.delete(&["locations", list_id.as_str(), place_id.as_str()])?)
            .await
    }
}
