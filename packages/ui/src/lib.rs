//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod client;
pub use client::{load_config, make_client, sleep, use_client, use_config, AppClient, PlatformTokens};

mod state;
pub use state::{use_app_store, AppStore};

mod provider;
pub use provider::WaypointProvider;

pub mod effects;
pub use effects::{apply_effects, listing_dom_id};

mod geolocation;
pub use geolocation::current_position;

mod navbar;
pub use navbar::Navbar;

pub mod map;
pub use map::MapView;

mod listing;
pub use listing::ListingPanel;

mod membership;
pub use membership::MembershipDropdown;

mod feedback;
pub use feedback::FeedbackBanner;

pub const UI_CSS: Asset = asset!("/assets/ui.css");
