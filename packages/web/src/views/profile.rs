use dioxus::prelude::*;
use store::{Action, List, StateHandle};
use ui::{use_app_store, use_client};

use crate::Route;

#[component]
pub fn Profile() -> Element {
    let mut store = use_app_store();
    let client = use_client();
    let nav = use_navigator();
    let state = store.signal();
    let mut new_list_name = use_signal(String::new);

    // The profile shows no markers
    use_effect(move || {
        store.dispatch(Action::ClearDisplay);
    });

    let (user, lists, favorites_id, planned_id) = {
        let snapshot = state.read();
        (
            snapshot.user.clone(),
            snapshot.lists.clone(),
            snapshot.favorites_id.clone(),
            snapshot.planned_id.clone(),
        )
    };

    let Some(user) = user else {
        return rsx! {
            p {
                "Log in to see your lists. "
                Link { to: Route::Login {}, "Log in" }
            }
        };
    };

    let create_client = client.clone();
    let handle_create = move |evt: FormEvent| {
        evt.prevent_default();
        let client = create_client.clone();
        spawn(async move {
            if client.create_list(&mut store, &new_list_name()).await {
                new_list_name.set(String::new());
            }
        });
    };

    let handle_logout = move |_| {
        let client = client.clone();
        spawn(async move {
            client.logout(&mut store).await;
            nav.push(Route::Search {});
        });
    };

    rsx! {
        h2 { "{user.username}" }

        div {
            class: "quick-links",
            if let Some(id) = favorites_id {
                Link { to: Route::ListDetail { list_id: id.to_string() }, "Favorites" }
            }
            " "
            if let Some(id) = planned_id {
                Link { to: Route::ListDetail { list_id: id.to_string() }, "Planned" }
            }
        }

        h3 { "Your lists" }
        ul {
            class: "profile-lists",
            for list in lists {
                ListRow { key: "{list.id}", list: list }
            }
        }

        form {
            class: "new-list-form",
            onsubmit: handle_create,
            input {
                r#type: "text",
                placeholder: "New list name",
                value: new_list_name(),
                oninput: move |evt: FormEvent| new_list_name.set(evt.value()),
            }
            button { r#type: "submit", "Create list" }
        }

        button { onclick: handle_logout, "Log out" }
    }
}

#[component]
fn ListRow(list: List) -> Element {
    let mut store = use_app_store();
    let client = use_client();
    let id = list.id.clone();

    let on_delete = move |_| {
        let client = client.clone();
        let id = id.clone();
        spawn(async move {
            client.delete_list(&mut store, &id).await;
        });
    };

    rsx! {
        li {
            Link { to: Route::ListDetail { list_id: list.id.to_string() }, "{list.name}" }
            if !list.is_default {
                button { class: "danger", onclick: on_delete, "Delete" }
            }
        }
    }
}
