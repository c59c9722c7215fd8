use dioxus::prelude::*;
use types::UserType;

use crate::{Route, auth::use_auth};

#[component]
pub fn Landing() -> Element {
    let auth = use_auth();
    let app_name = auth.config().app_name;
    let signed_in_as = auth.user_type();

    rsx! {
        div { class: "login-page",
            div { class: "login-card",
                div { class: "login-header",
                    h1 { class: "login-title", "{app_name}" }
                    p { class: "login-subtitle", "Store administration and customer accounts" }
                }
                if let Some(user_type) = signed_in_as {
                    Link {
                        to: Route::dashboard(user_type),
                        class: "btn btn-primary login-btn",
                        "Go to your dashboard"
                    }
                } else {
                    div { class: "landing-actions",
                        Link {
                            to: Route::sign_in(UserType::User, None),
                            class: "btn btn-primary login-btn",
                            "Customer sign in"
                        }
                        Link {
                            to: Route::sign_in(UserType::Admin, None),
                            class: "btn btn-secondary login-btn",
                            "Administrator sign in"
                        }
                    }
                }
            }
        }
    }
}
