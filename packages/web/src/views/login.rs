//! Login page view with username/password form.

use dioxus::prelude::*;
use store::StateHandle;
use ui::{use_app_store, use_client};

use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let mut store = use_app_store();
    let client = use_client();
    let nav = use_navigator();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            error.set(None);
            loading.set(true);
            match client.login(&mut store, &username(), &password()).await {
                Ok(user) => {
                    tracing::info!(username = %user.username, "Login succeeded");
                    nav.push(Route::Search {});
                }
                Err(e) => {
                    error.set(Some(e.user_message()));
                    password.set(String::new());
                }
            }
            loading.set(false);
        });
    };

    if let Some(name) = store.read(|s| s.user.as_ref().map(|u| u.username.clone())) {
        return rsx! {
            p {
                "Logged in as {name}. "
                Link { to: Route::Profile {}, "Your lists" }
            }
        };
    }

    rsx! {
        h2 { "Log in" }

        form {
            class: "auth-form",
            onsubmit: handle_login,

            if let Some(err) = error() {
                div { class: "form-error", "{err}" }
            }

            input {
                r#type: "text",
                placeholder: "Username",
                value: username(),
                oninput: move |evt: FormEvent| username.set(evt.value()),
            }
            input {
                r#type: "password",
                placeholder: "Password",
                value: password(),
                oninput: move |evt: FormEvent| password.set(evt.value()),
            }

            button {
                r#type: "submit",
                disabled: loading(),
                if loading() { "Logging in..." } else { "Log in" }
            }
        }

        p {
            "No account yet? "
            Link { to: Route::Register {}, "Sign up" }
        }
    }
}
