use dioxus::prelude::*;
use store::{Action, StateHandle};
use ui::{use_app_store, use_client, ListingPanel};

#[component]
pub fn Search() -> Element {
    let mut store = use_app_store();
    let client = use_client();
    let state = store.signal();

    // Coming back to this view shows the last results again
    use_effect(move || {
        store.dispatch(Action::ShowSearchResults);
    });

    let search_client = client.clone();
    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = search_client.clone();
        let (query, viewport) = store.read(|s| (s.search.query.clone(), s.viewport));
        spawn(async move {
            client.search(&mut store, &query, viewport).await;
        });
    };

    let (query, status) = {
        let snapshot = state.read();
        (snapshot.search.query.clone(), snapshot.search.status())
    };
    let label = status.label();

    rsx! {
        form {
            class: "search-form",
            onsubmit: onsubmit,
            input {
                r#type: "search",
                placeholder: "Search places near the map centre",
                value: "{query}",
                oninput: move |evt| {
                    store.dispatch(Action::SetQuery(evt.value()));
                },
            }
            button { r#type: "submit", "Search" }
            button {
                r#type: "button",
                onclick: move |_| client.clear_search(&mut store),
                "Clear"
            }
        }
        p { class: "search-status", "{label}" }
        if status.shows_listing() {
            ListingPanel {}
        }
    }
}
