use dioxus::prelude::*;

use crate::auth::use_auth;

#[component]
pub fn UserProfile() -> Element {
    let Some(session) = use_auth().session() else {
        return rsx! {};
    };
    let profile = &session.profile;
    let (initial, name) = (profile.initial(), profile.display_name());
    let customer_id = session.customer_id.as_deref().unwrap_or("—");

    rsx! {
        div {
            div { class: "page-header",
                h1 { class: "page-title", "Profile" }
                p { class: "page-subtitle", "Details of the account you are signed in with." }
            }
            div { class: "card",
                div { class: "card-header",
                    div { class: "sidebar-avatar", "{initial}" }
                    h2 { class: "card-title", "{name}" }
                }
                dl { class: "detail-list",
                    dt { "Email" }
                    dd { "{profile.email}" }
                    dt { "Mobile" }
                    dd { if profile.mobile.is_empty() { "—" } else { "{profile.mobile}" } }
                    dt { "Customer ID" }
                    dd { code { "{customer_id}" } }
                }
            }
        }
    }
}
