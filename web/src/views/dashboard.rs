use dioxus::prelude::*;
use types::UserType;

use crate::{Route, auth::use_auth, nav_config::menu_for};

#[component]
pub fn AdminDashboard() -> Element {
    rsx! {
        Dashboard {
            user_type: UserType::Admin,
            subtitle: "Manage the catalog, accounts and orders.",
        }
    }
}

#[component]
pub fn UserDashboard() -> Element {
    rsx! {
        Dashboard {
            user_type: UserType::User,
            subtitle: "Track your orders and keep your details up to date.",
        }
    }
}

/// Welcome header plus a card for every page in the role's menu.
#[component]
fn Dashboard(user_type: UserType, subtitle: String) -> Element {
    let auth = use_auth();
    let name = auth
        .session()
        .map(|s| s.profile.display_name().to_string())
        .unwrap_or_default();
    let menu = use_hook(move || menu_for(user_type));
    let current_path = use_route::<Route>().to_string();

    let cards: Vec<_> = match &menu {
        Ok(menu) => menu
            .links()
            .into_iter()
            .filter_map(|item| Some((item.title().to_string(), item.path()?.to_string(), item.icon().glyph())))
            .filter(|(_, path, _)| *path != current_path)
            .collect(),
        Err(_) => Vec::new(),
    };

    rsx! {
        div {
            div { class: "page-header",
                h1 { class: "page-title", "Welcome, {name}" }
                p { class: "page-subtitle", "{subtitle}" }
            }
            div { class: "dashboard-grid",
                for (title, path, glyph) in cards {
                    Link {
                        key: "{path}",
                        to: path,
                        class: "dashboard-card",
                        span { class: "dashboard-card-icon", "{glyph}" }
                        h3 { class: "dashboard-card-title", "{title}" }
                    }
                }
            }
        }
    }
}
