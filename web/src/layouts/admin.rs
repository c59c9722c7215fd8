use dioxus::prelude::*;
use ui::ErrorBanner;

use crate::{Route, guard::AdminRoute, layouts::DashboardShell, nav_config::admin_menu};

#[component]
pub fn AdminLayout() -> Element {
    let menu = use_hook(admin_menu);

    let content = match menu {
        Ok(menu) => rsx! {
            DashboardShell { menu, Outlet::<Route> {} }
        },
        Err(error) => rsx! {
            ErrorBanner { message: error.to_string() }
        },
    };

    rsx! {
        AdminRoute { {content} }
    }
}
