//! Layout shared by every view: navbar, map, and the side panel.

use dioxus::prelude::*;
use store::{Action, StateHandle};
use ui::{use_app_store, FeedbackBanner, MapView, Navbar};

use crate::Route;

#[component]
pub fn Shell() -> Element {
    let mut store = use_app_store();
    let state = store.signal();
    let nav = use_navigator();

    // Follow navigation requests recorded by the managers
    let redirect = use_memo(move || state.read().redirect.clone());
    use_effect(move || {
        if let Some(view) = redirect() {
            store.dispatch(Action::RedirectHandled);
            nav.push(Route::from(view));
        }
    });

    let (panel_visible, username, favorites_id, planned_id) = {
        let snapshot = state.read();
        (
            snapshot.panel_visible,
            snapshot.user.as_ref().map(|u| u.username.clone()),
            snapshot.favorites_id.clone(),
            snapshot.planned_id.clone(),
        )
    };

    rsx! {
        div {
            class: "app",
            Navbar {
                span {
                    class: "navbar-links",
                    onclick: move |_| {
                        store.dispatch(Action::ShowPanel);
                    },
                    Link { to: Route::Search {}, "Search" }
                    if let Some(id) = favorites_id {
                        Link { to: Route::ListDetail { list_id: id.to_string() }, "Favorites" }
                    }
                    if let Some(id) = planned_id {
                        Link { to: Route::ListDetail { list_id: id.to_string() }, "Planned" }
                    }
                    if let Some(username) = username {
                        Link { to: Route::Profile {}, "{username}" }
                    } else {
                        Link { to: Route::Login {}, "Log in" }
                    }
                }
            }
            div {
                class: "app-main",
                MapView {}
                aside {
                    class: if panel_visible { "panel" } else { "panel panel--hidden" },
                    FeedbackBanner {}
                    Outlet::<Route> {}
                }
            }
        }
    }
}
