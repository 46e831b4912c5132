use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use store::models::{FAVORITES, PLANNED};
use store::{List, ListId, ListStatus, Location, PlaceId, User, Viewport};

use crate::backend::{Backend, LoginResponse};
use crate::error::ApiError;

/// In-memory Backend for testing and offline demos.
///
/// Behaves like the REST service: registering creates the Favorites and Planned
/// default lists, list operations require a valid bearer credential, and every
/// call is recorded so tests can assert which requests were (not) made.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    accounts: Vec<Account>,
    tokens: HashMap<String, String>,
    lists: Vec<StoredList>,
    places: Vec<Location>,
    credential: Option<String>,
    calls: Vec<&'static str>,
    failures: HashMap<&'static str, ApiError>,
    next_id: u64,
}

#[derive(Debug)]
struct Account {
    id: u64,
    username: String,
    password: String,
}

#[derive(Debug)]
struct StoredList {
    id: u64,
    owner: String,
    name: String,
    is_default: bool,
    locations: Vec<Location>,
}

impl StoredList {
    fn to_list(&self, with_locations: bool) -> List {
        List {
            id: ListId::from(self.id),
            name: self.name.clone(),
            is_default: self.is_default,
            locations: if with_locations {
                self.locations.clone()
            } else {
                Vec::new()
            },
        }
    }
}

impl Inner {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn record(&mut self, call: &'static str) -> Result<(), ApiError> {
        self.calls.push(call);
        match self.failures.get(call) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn create_account(&mut self, username: &str, password: &str) -> u64 {
        let id = self.next_id();
        self.accounts.push(Account {
            id,
            username: username.to_string(),
            password: password.to_string(),
        });
        for name in [FAVORITES, PLANNED] {
            let list_id = self.next_id();
            self.lists.push(StoredList {
                id: list_id,
                owner: username.to_string(),
                name: name.to_string(),
                is_default: true,
                locations: Vec::new(),
            });
        }
        id
    }

    fn issue_token(&mut self, username: &str) -> String {
        let token = format!("token-{}-{}", username, self.next_id());
        self.tokens.insert(token.clone(), username.to_string());
        token
    }

    fn user_for_token(&self, token: &str) -> Option<User> {
        let username = self.tokens.get(token)?;
        self.accounts
            .iter()
            .find(|a| &a.username == username)
            .map(|a| User {
                id: a.id.to_string(),
                username: a.username.clone(),
            })
    }

    fn current_user(&self) -> Result<String, ApiError> {
        self.credential
            .as_deref()
            .and_then(|t| self.tokens.get(t))
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized(Some("Not authenticated".to_string())))
    }

    fn owned_list(&mut self, owner: &str, id: &ListId) -> Result<&mut StoredList, ApiError> {
        self.lists
            .iter_mut()
            .find(|l| l.owner == owner && ListId::from(l.id) == *id)
            .ok_or_else(|| ApiError::NotFound(Some("List not found".to_string())))
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the place catalogue that `search` and `search_by_id` read from.
    pub fn with_places(self, places: Vec<Location>) -> Self {
        self.inner.lock().unwrap().places = places;
        self
    }

    /// Create an account (with its default lists) without recording a call.
    pub fn add_user(&self, username: &str, password: &str) -> String {
        self.inner
            .lock()
            .unwrap()
            .create_account(username, password)
            .to_string()
    }

    /// Issue a valid token for an existing account without recording a call.
    pub fn issue_token(&self, username: &str) -> String {
        self.inner.lock().unwrap().issue_token(username)
    }

    /// Invalidate a previously issued token.
    pub fn revoke_token(&self, token: &str) {
        self.inner.lock().unwrap().tokens.remove(token);
    }

    /// Make every later call to `endpoint` (e.g. `"logout"`) fail with `err`.
    pub fn fail(&self, endpoint: &'static str, err: ApiError) {
        self.inner.lock().unwrap().failures.insert(endpoint, err);
    }

    pub fn recover(&self, endpoint: &'static str) {
        self.inner.lock().unwrap().failures.remove(endpoint);
    }

    /// Names of the endpoints called so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().unwrap().calls.clear();
    }

    pub fn credential(&self) -> Option<String> {
        self.inner.lock().unwrap().credential.clone()
    }

    /// Server-side view of a user's lists, for assertions.
    pub fn lists_of(&self, username: &str) -> Vec<List> {
        self.inner
            .lock()
            .unwrap()
            .lists
            .iter()
            .filter(|l| l.owner == username)
            .map(|l| l.to_list(true))
            .collect()
    }
}

impl Backend for MemoryBackend {
    fn set_credential(&self, token: Option<String>) {
        self.inner.lock().unwrap().credential = token;
    }

    async fn verify_token(&self, token: &str) -> Result<User, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.record("verify_token")?;
        inner
            .user_for_token(token)
            .ok_or_else(|| ApiError::Unauthorized(Some("Token expired".to_string())))
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.record("login")?;
        let valid = inner
            .accounts
            .iter()
            .any(|a| a.username == username && a.password == password);
        if !valid {
            return Err(ApiError::Unauthorized(Some("Invalid credentials".to_string())));
        }
        Ok(LoginResponse {
            access_token: inner.issue_token(username),
            token_type: Some("bearer".to_string()),
            user: None,
        })
    }

    async fn register(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.record("register")?;
        if inner.accounts.iter().any(|a| a.username == username) {
            return Err(ApiError::Rejected(Some("Username already taken".to_string())));
        }
        inner.create_account(username, password);
        Ok(())
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.record("logout")?;
        if let Some(token) = inner.credential.take() {
            inner.tokens.remove(&token);
        }
        Ok(())
    }

    async fn search(&self, query: &str, _viewport: Viewport) -> Result<Vec<Location>, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.record("search")?;
        let needle = query.to_lowercase();
        let mut results: Vec<Location> = inner
            .places
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p
                        .category
                        .as_deref()
                        .is_some_and(|c| c.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        results.sort_by(|a, b| {
            b.score
                .unwrap_or(0.0)
                .partial_cmp(&a.score.unwrap_or(0.0))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(results)
    }

    async fn search_by_id(&self, place_id: &PlaceId) -> Result<Location, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.record("search_by_id")?;
        inner
            .places
            .iter()
            .find(|p| &p.place_id == place_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(Some("Location not found".to_string())))
    }

    async fn lists(&self) -> Result<Vec<List>, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.record("lists")?;
        let owner = inner.current_user()?;
        Ok(inner
            .lists
            .iter()
            .filter(|l| l.owner == owner)
            .map(|l| l.to_list(false))
            .collect())
    }

    async fn create_list(&self, name: &str) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.record("create_list")?;
        let owner = inner.current_user()?;
        let id = inner.next_id();
        inner.lists.push(StoredList {
            id,
            owner,
            name: name.to_string(),
            is_default: false,
            locations: Vec::new(),
        });
        Ok(())
    }

    async fn list_detail(&self, id: &ListId) -> Result<List, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.record("list_detail")?;
        let owner = inner.current_user()?;
        Ok(inner.owned_list(&owner, id)?.to_list(true))
    }

    async fn delete_list(&self, id: &ListId) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.record("delete_list")?;
        let owner = inner.current_user()?;
        let list = inner.owned_list(&owner, id)?;
        if list.is_default {
            return Err(ApiError::Forbidden(Some(
                "Default lists cannot be deleted".to_string(),
            )));
        }
        let raw = list.id;
        inner.lists.retain(|l| l.id != raw);
        Ok(())
    }

    async fn check_location(&self, place_id: &PlaceId) -> Result<Vec<ListStatus>, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.record("check_location")?;
        let owner = inner.current_user()?;
        Ok(inner
            .lists
            .iter()
            .filter(|l| l.owner == owner)
            .map(|l| ListStatus {
                id: ListId::from(l.id),
                name: l.name.clone(),
                added: l.locations.iter().any(|loc| &loc.place_id == place_id),
            })
            .collect())
    }

    async fn add_location(&self, list_id: &ListId, location: &Location) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.record("add_location")?;
        let owner = inner.current_user()?;
        let list = inner.owned_list(&owner, list_id)?;
        if list.locations.iter().any(|l| l.place_id == location.place_id) {
            return Err(ApiError::Rejected(Some("Location already in list".to_string())));
        }
        list.locations.push(location.clone());
        if !inner.places.iter().any(|p| p.place_id == location.place_id) {
            inner.places.push(location.clone());
        }
        Ok(())
    }

    async fn remove_location(&self, list_id: &ListId, place_id: &PlaceId) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.record("remove_location")?;
        let owner = inner.current_user()?;
        let list = inner.owned_list(&owner, list_id)?;
        let before = list.locations.len();
        list.locations.retain(|l| &l.place_id != place_id);
        if list.locations.len() == before {
            return Err(ApiError::NotFound(Some("Location not in list".to_string())));
        }
        Ok(())
    }
}
