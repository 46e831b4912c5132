use dioxus::prelude::*;
use store::{ListId, StateHandle};
use ui::{use_app_store, use_client, ListingPanel};

use crate::Route;

/// One saved list on the map and in the panel.
#[component]
pub fn ListDetail(list_id: String) -> Element {
    let store = use_app_store();
    let client = use_client();
    let state = store.signal();
    let id = ListId::new(&list_id);

    // Reload whenever the route points at another list
    let load_client = client.clone();
    use_effect(use_reactive!(|list_id| {
        let client = load_client.clone();
        let mut store = store;
        spawn(async move {
            client.fetch_list_detail(&mut store, &ListId::new(&list_id)).await;
        });
    }));

    let list = state
        .read()
        .active_list
        .clone()
        .filter(|l| l.id == id);
    let Some(list) = list else {
        return rsx! {
            p { class: "search-status", "Loading list..." }
        };
    };

    let delete_id = list.id.clone();
    let on_delete = move |_| {
        let client = client.clone();
        let id = delete_id.clone();
        let mut store = store;
        spawn(async move {
            client.delete_list(&mut store, &id).await;
        });
    };
    let count = list.locations.len();

    rsx! {
        div {
            class: "list-header",
            Link { to: Route::Profile {}, "← Lists" }
            h2 { "{list.name}" }
            p {
                class: "search-status",
                if count == 1 { "1 place" } else { "{count} places" }
            }
            if !list.is_default {
                button { class: "danger", onclick: on_delete, "Delete list" }
            }
        }
        ListingPanel { list_id: list.id.clone() }
    }
}
