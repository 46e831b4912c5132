pub mod config;
pub mod models;
pub mod selection;
pub mod state;
pub mod token;

pub use config::ClientConfig;
pub use models::{List, ListId, ListStatus, Location, PlaceId, User, Viewport};
pub use selection::{DisplaySource, Effect, Selection};
pub use state::{Action, AppState, Feedback, FeedbackLevel, SearchStatus, StateHandle, View};
pub use token::{MemoryTokenStore, TokenStore};

#[cfg(not(target_arch = "wasm32"))]
pub use token::FileTokenStore;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use token::LocalStorageTokenStore;
