use api::Membership;
use dioxus::prelude::*;
use store::{ListId, ListStatus, Location, StateHandle};

use crate::client::use_client;
use crate::state::use_app_store;

/// Text shown in place of the checkboxes, if any.
fn placeholder(authenticated: bool, loaded: bool) -> Option<&'static str> {
    if !authenticated {
        Some("Log in to save places to your lists")
    } else if !loaded {
        Some("Loading lists...")
    } else {
        None
    }
}

/// Checkbox per list showing whether `location` is saved in it.
#[component]
pub fn MembershipDropdown(location: Location) -> Element {
    let mut store = use_app_store();
    let client = use_client();
    let mut membership = use_signal(|| None::<Membership>);
    let mut loaded = use_signal(|| false);
    let authenticated = store.read(|s| s.is_authenticated());

    let open_client = client.clone();
    let place_id = location.place_id.clone();
    use_effect(move || {
        let client = open_client.clone();
        let place_id = place_id.clone();
        if !store.signal().peek().is_authenticated() {
            return;
        }
        spawn(async move {
            let opened = client.open_membership(&mut store, &place_id).await;
            membership.set(opened);
            loaded.set(true);
        });
    });

    let on_toggle = EventHandler::new(move |list_id: ListId| {
        let client = client.clone();
        let location = location.clone();
        spawn(async move {
            let Some(mut current) = membership() else {
                return;
            };
            client
                .toggle_membership(&mut store, &mut current, &list_id, &location)
                .await;
            membership.set(Some(current));
        });
    });

    if let Some(text) = placeholder(authenticated, loaded()) {
        return rsx! {
            div { class: "membership membership--placeholder", "{text}" }
        };
    }
    let Some(current) = membership() else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "membership",
            onclick: move |evt: MouseEvent| evt.stop_propagation(),
            for status in current.statuses {
                MembershipEntry { key: "{status.id}", status: status, on_toggle: on_toggle }
            }
        }
    }
}

#[component]
fn MembershipEntry(status: ListStatus, on_toggle: EventHandler<ListId>) -> Element {
    let id = status.id.clone();
    rsx! {
        label {
            class: "membership-entry",
            input {
                r#type: "checkbox",
                checked: status.added,
                onchange: move |_| on_toggle.call(id.clone()),
            }
            "{status.name}"
        }
    }
}
