use dioxus::prelude::*;
use ui::ErrorBanner;

use crate::{Route, guard::UserRoute, layouts::DashboardShell, nav_config::user_menu};

#[component]
pub fn UserLayout() -> Element {
    let menu = use_hook(user_menu);

    let content = match menu {
        Ok(menu) => rsx! {
            DashboardShell { menu, Outlet::<Route> {} }
        },
        Err(error) => rsx! {
            ErrorBanner { message: error.to_string() }
        },
    };

    rsx! {
        UserRoute { {content} }
    }
}
