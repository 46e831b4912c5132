//! # Application state container
//!
//! [`AppState`] holds everything the shell shares between views: the session,
//! the user's lists, the search box, the map viewport, the side panel, the
//! displayed set with its selection, and the transient feedback message. Views
//! never mutate it directly; they [`dispatch`](AppState::dispatch) an [`Action`]
//! and render whatever the reducer leaves behind.
//!
//! The reducer is where the cross-view invariants live:
//!
//! - replacing the displayed set (new search, new list) clears the selection;
//! - logging out empties the user, the lists and any list-backed display;
//! - a marker click forces the panel visible.
//!
//! [`StateHandle`] abstracts "something that can be read and dispatched into" so
//! the async managers in the `api` crate work against a plain `AppState` in tests
//! and against a reactive signal in the UI.

use crate::models::{List, ListId, Location, PlaceId, User, Viewport, FAVORITES, PLANNED};
use crate::selection::{DisplaySource, Effect, Selection};

/// Severity of a feedback message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A short self-clearing message shown in the panel.
#[derive(Clone, Debug, PartialEq)]
pub struct Feedback {
    pub level: FeedbackLevel,
    pub message: String,
    /// Bumped on every new message so stale countdowns can be ignored.
    pub generation: u64,
}

/// Views the shell can be asked to navigate to.
#[derive(Clone, Debug, PartialEq)]
pub enum View {
    Search,
    Profile,
    Login,
    List(ListId),
}

/// What the search panel should show, exactly one at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    Loading,
    Empty,
    Results(usize),
}

impl SearchStatus {
    pub fn label(&self) -> String {
        match self {
            SearchStatus::Loading => "Loading results...".to_string(),
            SearchStatus::Empty => "Nothing to display".to_string(),
            SearchStatus::Results(1) => "1 result".to_string(),
            SearchStatus::Results(n) => format!("{n} results"),
        }
    }

    /// Whether the listing rows belong on screen next to this status.
    pub fn shows_listing(&self) -> bool {
        matches!(self, SearchStatus::Results(_))
    }
}

/// Search box and the last result set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<Location>,
    pub loading: bool,
}

impl SearchState {
    pub fn status(&self) -> SearchStatus {
        if self.loading {
            SearchStatus::Loading
        } else if self.results.is_empty() {
            SearchStatus::Empty
        } else {
            SearchStatus::Results(self.results.len())
        }
    }
}

/// State transitions accepted by [`AppState::dispatch`].
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Result of verifying the stored credential on load.
    SessionVerified(Option<User>),
    LoggedIn(User),
    /// Logout, or a credential the backend no longer accepts.
    LoggedOut,
    ListsLoaded(Vec<List>),
    ListDetailLoaded(List),
    /// A location left a list (remove call or dropdown uncheck).
    LocationRemoved { list_id: ListId, place_id: PlaceId },
    SetQuery(String),
    SearchStarted,
    SearchCompleted(Vec<Location>),
    SearchFailed,
    SearchCleared,
    /// Re-display the last search results (entering the search view).
    ShowSearchResults,
    /// Show no markers and no listings.
    ClearDisplay,
    ViewportChanged(Viewport),
    MarkerClicked(PlaceId),
    ListingClicked(PlaceId),
    DetailResolved(Location),
    ClearSelection,
    TogglePanel,
    ShowPanel,
    Notify(FeedbackLevel, String),
    FeedbackExpired(u64),
    Redirect(View),
    RedirectHandled,
}

/// The single state container owned by the shell.
#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    pub user: Option<User>,
    /// False until the stored credential has been checked once.
    pub session_checked: bool,
    pub lists: Vec<List>,
    pub favorites_id: Option<ListId>,
    pub planned_id: Option<ListId>,
    /// The list shown in the list-detail view.
    pub active_list: Option<List>,
    pub search: SearchState,
    pub viewport: Viewport,
    pub panel_visible: bool,
    pub selection: Selection,
    pub feedback: Option<Feedback>,
    pub redirect: Option<View>,
    feedback_generation: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl AppState {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            user: None,
            session_checked: false,
            lists: Vec::new(),
            favorites_id: None,
            planned_id: None,
            active_list: None,
            search: SearchState::default(),
            viewport,
            panel_visible: true,
            selection: Selection::new(),
            feedback: None,
            redirect: None,
            feedback_generation: 0,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn list(&self, id: &ListId) -> Option<&List> {
        self.lists.iter().find(|l| &l.id == id)
    }

    /// A list known from the collection or from the list-detail view.
    pub fn known_list(&self, id: &ListId) -> Option<&List> {
        self.list(id)
            .or_else(|| self.active_list.as_ref().filter(|l| &l.id == id))
    }

    /// Whether `id` names Favorites or Planned by any source this state has seen.
    pub fn is_default_list(&self, id: &ListId) -> bool {
        self.favorites_id.as_ref() == Some(id)
            || self.planned_id.as_ref() == Some(id)
            || self.known_list(id).is_some_and(|l| l.is_default)
    }

    /// Apply one action, returning the view effects it produced.
    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::SessionVerified(user) => {
                self.session_checked = true;
                match user {
                    Some(user) => self.user = Some(user),
                    None => self.reset_session(),
                }
            }
            Action::LoggedIn(user) => {
                self.session_checked = true;
                self.user = Some(user);
            }
            Action::LoggedOut => {
                self.session_checked = true;
                self.reset_session();
            }
            Action::ListsLoaded(lists) => {
                self.favorites_id = find_default(&lists, FAVORITES);
                self.planned_id = find_default(&lists, PLANNED);
                self.lists = lists;
            }
            Action::ListDetailLoaded(list) => {
                self.selection
                    .replace(DisplaySource::List(list.id.clone()), list.locations.clone());
                self.active_list = Some(list);
            }
            Action::LocationRemoved { list_id, place_id } => {
                if let Some(list) = self.active_list.as_mut().filter(|l| l.id == list_id) {
                    list.locations.retain(|l| l.place_id != place_id);
                }
                if self.selection.source() == &DisplaySource::List(list_id) {
                    self.selection.remove(&place_id);
                }
            }
            Action::SetQuery(query) => self.search.query = query,
            Action::SearchStarted => self.search.loading = true,
            Action::SearchCompleted(results) => {
                self.search.loading = false;
                self.search.results = results.clone();
                self.selection.replace(DisplaySource::Search, results);
            }
            Action::SearchFailed => self.search.loading = false,
            Action::SearchCleared => {
                self.search = SearchState::default();
                self.selection.clear();
            }
            Action::ShowSearchResults => {
                self.active_list = None;
                self.selection
                    .replace(DisplaySource::Search, self.search.results.clone());
            }
            Action::ClearDisplay => {
                self.active_list = None;
                self.selection.clear();
            }
            Action::ViewportChanged(viewport) => self.viewport = viewport,
            Action::MarkerClicked(place_id) => {
                self.panel_visible = true;
                return self.selection.select_from_map(&place_id);
            }
            Action::ListingClicked(place_id) => {
                return self.selection.select_from_listing(&place_id);
            }
            Action::DetailResolved(location) => {
                if let Some(list) = self.active_list.as_mut() {
                    if let Some(slot) = list
                        .locations
                        .iter_mut()
                        .find(|l| l.place_id == location.place_id)
                    {
                        *slot = location.clone();
                    }
                }
                self.selection.merge_detail(location);
            }
            Action::ClearSelection => self.selection.deselect(),
            Action::TogglePanel => self.panel_visible = !self.panel_visible,
            Action::ShowPanel => self.panel_visible = true,
            Action::Notify(level, message) => {
                self.feedback_generation += 1;
                self.feedback = Some(Feedback {
                    level,
                    message,
                    generation: self.feedback_generation,
                });
            }
            Action::FeedbackExpired(generation) => {
                if self.feedback.as_ref().map(|f| f.generation) == Some(generation) {
                    self.feedback = None;
                }
            }
            Action::Redirect(view) => self.redirect = Some(view),
            Action::RedirectHandled => self.redirect = None,
        }
        Vec::new()
    }

    fn reset_session(&mut self) {
        self.user = None;
        self.lists.clear();
        self.favorites_id = None;
        self.planned_id = None;
        self.active_list = None;
        if matches!(self.selection.source(), DisplaySource::List(_)) {
            self.selection.clear();
        }
    }
}

fn find_default(lists: &[List], name: &str) -> Option<ListId> {
    lists
        .iter()
        .find(|l| l.is_default && l.name == name)
        .map(|l| l.id.clone())
}

/// Read access plus dispatch, implemented by [`AppState`] and by UI signals.
pub trait StateHandle {
    fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R;
    fn dispatch(&mut self, action: Action) -> Vec<Effect>;
}

impl StateHandle for AppState {
    fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(self)
    }

    fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        AppState::dispatch(self, action)
    }
}
