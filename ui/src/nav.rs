use dioxus::prelude::*;
use types::nav::{ActiveState, NavItem, NavMenu};

/// Sidebar menu. Active state is derived from `current_path` on every
/// render.
#[component]
pub fn NavContent(
    menu: NavMenu,
    current_path: String,
    #[props(default)] collapsed: bool,
) -> Element {
    rsx! {
        nav { class: if collapsed { "sidebar-nav sidebar-nav-collapsed" } else { "sidebar-nav" },
            ul { class: "nav-list",
                for (i, item) in menu.items().iter().enumerate() {
                    NavEntry {
                        key: "{i}",
                        item: item.clone(),
                        current_path: current_path.clone(),
                        collapsed,
                        depth: 0,
                    }
                }
            }
        }
    }
}

fn state_class(state: ActiveState) -> &'static str {
    match state {
        ActiveState::Active => "active",
        ActiveState::ChildActive => "child-active",
        ActiveState::Inactive => "",
    }
}

#[component]
fn NavEntry(item: NavItem, current_path: String, collapsed: bool, depth: usize) -> Element {
    let state = item.active_state(&current_path);
    let tooltip = collapsed.then(|| item.title().to_string());
    let glyph = item.icon().glyph();
    let indent = format!("padding-left: {}rem", 0.75 + depth as f32 * 0.9);

    let mut expanded = use_signal(|| item.should_auto_expand(&current_path, collapsed));

    // Open when the current page lands inside this group. Never closes on its
    // own; only the toggle does that.
    let group = item.clone();
    use_effect(use_reactive(
        (&current_path, &collapsed),
        move |(path, collapsed)| {
            if group.should_auto_expand(&path, collapsed) {
                expanded.set(true);
            }
        },
    ));

    match &item {
        NavItem::Link { title, path, info, .. } => {
            let class = format!("nav-link {}", state_class(state));
            rsx! {
                li { class: "nav-item", title: tooltip,
                    Link { to: path.clone(), class,
                        span { class: "nav-link-inner", style: indent,
                            span { class: "nav-icon", "{glyph}" }
                            if !collapsed {
                                span { class: "nav-label", "{title}" }
                                if let Some(badge) = info {
                                    span { class: "nav-badge", "{badge}" }
                                }
                            }
                        }
                    }
                }
            }
        }
        NavItem::Group { title, info, children, .. } => {
            let class = format!("nav-link nav-toggle {}", state_class(state));
            let is_open = expanded() && !collapsed;
            rsx! {
                li { class: "nav-item nav-group", title: tooltip,
                    button {
                        class,
                        style: indent,
                        r#type: "button",
                        aria_expanded: "{is_open}",
                        onclick: move |_| {
                            if !collapsed {
                                let open = expanded();
                                expanded.set(!open);
                            }
                        },
                        span { class: "nav-icon", "{glyph}" }
                        if !collapsed {
                            span { class: "nav-label", "{title}" }
                            if let Some(badge) = info {
                                span { class: "nav-badge", "{badge}" }
                            }
                            span { class: if is_open { "nav-caret open" } else { "nav-caret" }, "▸" }
                        }
                    }
                    if is_open {
                        ul { class: "nav-sublist",
                            for (i, child) in children.iter().enumerate() {
                                NavEntry {
                                    key: "{i}",
                                    item: child.clone(),
                                    current_path: current_path.clone(),
                                    collapsed,
                                    depth: depth + 1,
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
