use dioxus::prelude::*;

use crate::{Route, auth::use_auth};

#[component]
pub fn Unauthorized() -> Element {
    let signed_in_as = use_auth().user_type();

    rsx! {
        div { class: "status-page",
            h1 { class: "page-title", "Access denied" }
            p { class: "page-subtitle", "Your account cannot open this page." }
            if let Some(user_type) = signed_in_as {
                Link { to: Route::dashboard(user_type), class: "btn btn-primary", "Back to your dashboard" }
            } else {
                Link { to: Route::Landing {}, class: "btn btn-primary", "Home" }
            }
        }
    }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));

    rsx! {
        div { class: "status-page",
            h1 { class: "page-title", "Page not found" }
            p { class: "page-subtitle", "Nothing lives at " code { "{path}" } "." }
            Link { to: Route::Landing {}, class: "btn btn-primary", "Home" }
        }
    }
}
