//! Sidebar menus for each role.

use types::{
    Result, UserType,
    nav::{Icon, NavItem, NavMenu},
};

use crate::Route;

fn link(title: &str, route: Route, icon: Icon) -> NavItem {
    NavItem::link(title, route.to_string(), icon)
}

pub fn menu_for(user_type: UserType) -> Result<NavMenu> {
    match user_type {
        UserType::Admin => admin_menu(),
        UserType::User => user_menu(),
    }
}

pub fn admin_menu() -> Result<NavMenu> {
    NavMenu::new(vec![
        link("Dashboard", Route::AdminDashboard {}, Icon::Dashboard),
        NavItem::group(
            "Catalog",
            Icon::Catalog,
            vec![
                link("Brands", Route::AdminBrands {}, Icon::Brand),
                link("Models", Route::AdminModels {}, Icon::Model),
            ],
        ),
        NavItem::group(
            "People",
            Icon::People,
            vec![
                link("Users", Route::AdminUsers {}, Icon::User),
                link("Vendors", Route::AdminVendors {}, Icon::Vendor),
            ],
        ),
        link("Orders", Route::AdminOrders {}, Icon::Order),
    ])
}

pub fn user_menu() -> Result<NavMenu> {
    NavMenu::new(vec![
        link("Dashboard", Route::UserDashboard {}, Icon::Dashboard),
        link("My Orders", Route::UserOrders {}, Icon::Order),
        link("Profile", Route::UserProfile {}, Icon::Profile),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::nav::ActiveState;

    fn assert_links_in_area(menu: &NavMenu, user_type: UserType) {
        for item in menu.links() {
            let path = item.path().unwrap();
            assert!(path.starts_with(user_type.area_prefix()), "{path}");
            let route: Route = path.parse().unwrap();
            assert!(!matches!(route, Route::NotFound { .. }), "{path}");
        }
    }

    #[test]
    fn menus_are_valid_and_routable() {
        for user_type in [UserType::Admin, UserType::User] {
            assert_links_in_area(&menu_for(user_type).unwrap(), user_type);
        }
    }

    #[test]
    fn admin_catalog_group_tracks_its_pages() {
        let menu = admin_menu().unwrap();
        let catalog = &menu.items()[1];
        assert!(catalog.has_toggle());
        assert_eq!(catalog.active_state("/admin/models"), ActiveState::ChildActive);
        assert_eq!(catalog.active_state("/admin/users"), ActiveState::Inactive);
        assert_eq!(menu.active_trail("/admin/brands"), ["Catalog", "Brands"]);
    }
}
