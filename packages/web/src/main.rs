use dioxus::prelude::*;

use store::View;
use ui::WaypointProvider;
use views::{ListDetail, Login, Profile, Register, Search, Shell};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Search {},
        #[route("/profile")]
        Profile {},
        #[route("/login")]
        Login {},
        #[route("/register")]
        Register {},
        #[route("/list/:list_id")]
        ListDetail { list_id: String },
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

impl From<View> for Route {
    fn from(view: View) -> Self {
        match view {
            View::Search => Route::Search {},
            View::Profile => Route::Profile {},
            View::Login => Route::Login {},
            View::List(id) => Route::ListDetail {
                list_id: id.to_string(),
            },
        }
    }
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        WaypointProvider {
            Router::<Route> {}
        }
    }
}

/// Unknown paths land on the search view
#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let nav = use_navigator();
    tracing::warn!(path = %segments.join("/"), "Unknown route");
    nav.replace(Route::Search {});
    rsx! {}
}
