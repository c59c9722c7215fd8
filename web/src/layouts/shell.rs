use dioxus::prelude::*;
use types::nav::NavMenu;
use ui::{NavContent, ToastHost};

use crate::{Route, auth::use_auth};

/// Header, sidebar and content area shared by the admin and user areas.
///
/// The sidebar collapses to an icon rail on wide screens and becomes a
/// drawer on narrow ones; the drawer closes whenever the path changes.
#[component]
pub fn DashboardShell(menu: NavMenu, children: Element) -> Element {
    let mut auth = use_auth();
    let current_path = use_route::<Route>().to_string();
    let mut collapsed = use_signal(|| false);
    let mut drawer_open = use_signal(|| false);

    use_effect(use_reactive((&current_path,), move |(_,)| {
        drawer_open.set(false);
    }));

    let app_name = auth.config().app_name;
    let trail = menu.active_trail(&current_path).join(" / ");
    let profile = auth.session().map(|s| s.profile).unwrap_or_default();
    let role = auth.user_type().map(|t| t.as_str()).unwrap_or_default();
    let initial = profile.initial();
    let name = profile.display_name().to_string();

    let sidebar_class = match (collapsed(), drawer_open()) {
        (_, true) => "sidebar sidebar-open",
        (true, false) => "sidebar sidebar-collapsed",
        (false, false) => "sidebar",
    };

    rsx! {
        div { class: if collapsed() { "app-layout app-layout-collapsed" } else { "app-layout" },
            header { class: "app-header",
                button {
                    class: "header-menu-toggle",
                    r#type: "button",
                    aria_label: "Toggle navigation",
                    onclick: move |_| {
                        let open = drawer_open();
                        drawer_open.set(!open);
                    },
                    "☰"
                }
                span { class: "header-title", "{app_name}" }
                if !trail.is_empty() {
                    span { class: "header-breadcrumb text-muted", "{trail}" }
                }
                div { class: "header-user",
                    div { class: "sidebar-avatar", "{initial}" }
                    div { class: "sidebar-user-info",
                        div { class: "sidebar-user-name", "{name}" }
                        div { class: "sidebar-user-role", "{role}" }
                    }
                    button {
                        class: "btn btn-link sidebar-logout",
                        r#type: "button",
                        onclick: move |_| auth.logout(),
                        "Sign out"
                    }
                }
            }

            if drawer_open() {
                div { class: "sidebar-backdrop", onclick: move |_| drawer_open.set(false) }
            }

            aside { class: sidebar_class,
                NavContent {
                    menu,
                    current_path: current_path.clone(),
                    collapsed: collapsed() && !drawer_open(),
                }
                div { class: "sidebar-footer",
                    button {
                        class: "sidebar-collapse",
                        r#type: "button",
                        title: if collapsed() { "Expand sidebar" } else { "Collapse sidebar" },
                        onclick: move |_| {
                            let value = collapsed();
                            collapsed.set(!value);
                        },
                        if collapsed() { "»" } else { "«" }
                    }
                }
            }

            main { class: "main-content",
                {children}
            }

            ToastHost {}
        }
    }
}
