//! Listing panel: one row per displayed location, kept in step with the map selection.

use dioxus::prelude::*;
use store::models::{FAVORITES, PLANNED};
use store::{Action, ListId, Location, StateHandle};

use crate::client::use_client;
use crate::effects::{apply_effects, listing_dom_id};
use crate::membership::MembershipDropdown;
use crate::state::use_app_store;

/// The displayed locations. Pass `list_id` when they come from a saved list to
/// offer removal from it.
#[component]
pub fn ListingPanel(list_id: Option<ListId>) -> Element {
    let store = use_app_store();
    let state = store.signal();
    let (locations, selected) = {
        let snapshot = state.read();
        (
            snapshot.selection.locations().to_vec(),
            snapshot.selection.selected_id().cloned(),
        )
    };

    rsx! {
        ul {
            class: "listing",
            for location in locations {
                ListingItem {
                    key: "{location.place_id}",
                    selected: selected.as_ref() == Some(&location.place_id),
                    location: location,
                    list_id: list_id.clone(),
                }
            }
        }
    }
}

#[component]
fn ListingItem(
    location: Location,
    selected: bool,
    #[props(!optional)] list_id: Option<ListId>,
) -> Element {
    let mut store = use_app_store();
    let client = use_client();
    let mut show_lists = use_signal(|| false);
    let dom_id = listing_dom_id(&location.place_id);

    let place_id = location.place_id.clone();
    let select = move |_| {
        let effects = store.dispatch(Action::ListingClicked(place_id.clone()));
        apply_effects(&effects);
    };

    let save = {
        let client = client.clone();
        let location = location.clone();
        move |list_name: &'static str| {
            let client = client.clone();
            let location = location.clone();
            spawn(async move {
                client.save_to_default(&mut store, list_name, &location).await;
            });
        }
    };
    let save_planned = save.clone();

    let removable = list_id.is_some();
    let remove = {
        let location = location.clone();
        move |evt: MouseEvent| {
            evt.stop_propagation();
            let Some(list_id) = list_id.clone() else {
                return;
            };
            let client = client.clone();
            let location = location.clone();
            spawn(async move {
                client.remove_from_list(&mut store, &list_id, &location).await;
            });
        }
    };

    rsx! {
        li {
            id: "{dom_id}",
            class: if selected { "listing-item listing-item--selected" } else { "listing-item" },
            onclick: select,
            div {
                class: "listing-title",
                strong { "{location.name}" }
                if let Some(category) = location.category_label() {
                    span { class: "listing-category", "{category}" }
                }
            }
            if !location.address.is_empty() {
                p { class: "listing-address", "{location.address}" }
            }
            div {
                class: "listing-actions",
                button {
                    onclick: move |evt: MouseEvent| {
                        evt.stop_propagation();
                        save(FAVORITES);
                    },
                    "Favorite"
                }
                button {
                    onclick: move |evt: MouseEvent| {
                        evt.stop_propagation();
                        save_planned(PLANNED);
                    },
                    "Plan"
                }
                button {
                    onclick: move |evt: MouseEvent| {
                        evt.stop_propagation();
                        show_lists.set(!show_lists());
                    },
                    "Lists"
                }
                if removable {
                    button { class: "danger", onclick: remove, "Remove" }
                }
            }
            if show_lists() {
                MembershipDropdown { location: location.clone() }
            }
        }
    }
}
