use dioxus::prelude::*;

use crate::{Route, auth::use_auth};

/// Centered card around the sign-in forms.
#[component]
pub fn AuthLayout() -> Element {
    let app_name = use_auth().config().app_name;

    rsx! {
        div { class: "login-page",
            div { class: "login-card",
                div { class: "login-header",
                    Link { to: Route::Landing {}, class: "login-title", "{app_name}" }
                }
                Outlet::<Route> {}
            }
        }
    }
}
