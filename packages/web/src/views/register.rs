//! Registration page view with username/password form.

use dioxus::prelude::*;
use store::{Action, FeedbackLevel, StateHandle};
use ui::{use_app_store, use_client};

use crate::Route;

/// Register page component.
#[component]
pub fn Register() -> Element {
    let mut store = use_app_store();
    let client = use_client();
    let nav = use_navigator();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            error.set(None);
            loading.set(true);
            match client
                .register(&username(), &password(), &confirm_password())
                .await
            {
                Ok(()) => {
                    store.dispatch(Action::Notify(
                        FeedbackLevel::Success,
                        "Account created, please log in".to_string(),
                    ));
                    nav.push(Route::Login {});
                }
                Err(e) => {
                    tracing::warn!("Registration failed: {e}");
                    error.set(Some(e.user_message()));
                }
            }
            loading.set(false);
        });
    };

    rsx! {
        h2 { "Create Account" }

        form {
            class: "auth-form",
            onsubmit: handle_register,

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
            input {
                r#type: "password",
                placeholder: "Confirm password",
                value: confirm_password(),
                oninput: move |evt: FormEvent| confirm_password.set(evt.value()),
            }

            button {
                r#type: "submit",
                disabled: loading(),
                if loading() { "Creating account..." } else { "Sign up" }
            }
        }

        p {
            "Already have an account? "
            Link { to: Route::Login {}, "Log in" }
        }
    }
}
