use dioxus::prelude::*;
use store::{Action, StateHandle};

use crate::icons::FaBars;
use crate::state::use_app_store;
use crate::{Icon, UI_CSS};

/// Top bar with the panel toggle. Navigation links are passed as children.
#[component]
pub fn Navbar(children: Element) -> Element {
    let mut store = use_app_store();

    rsx! {
        document::Link { rel: "stylesheet", href: UI_CSS }
        div {
            class: "navbar",
            button {
                class: "navbar-toggle",
                title: "Toggle panel",
                onclick: move |_| {
                    store.dispatch(Action::TogglePanel);
                },
                Icon { icon: FaBars, width: 16, height: 16 }
            }
            span { class: "navbar-brand", "Waypoint" }
            {children}
        }
    }
}
