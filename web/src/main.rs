use dioxus::prelude::*;

mod auth;
mod guard;
mod layouts;
mod nav_config;
mod storage;
mod views;

use auth::AuthProvider;
use layouts::{AdminLayout, AuthLayout, UserLayout};
use types::{
    Config, UserType,
    config::DEFAULT_APP_NAME,
    entity::{Brand, Model, Order, User, Vendor},
};
use ui::{ErrorBanner, use_toast_provider};
use views::{
    AdminDashboard, AdminSignIn, EntityPage, Landing, NotFound, Unauthorized, UserDashboard,
    UserProfile, UserSignIn,
};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/")]
    Landing {},
    #[route("/unauthorized")]
    Unauthorized {},
    #[layout(AuthLayout)]
        #[route("/sign-in?:redirect")]
        UserSignIn { redirect: Option<String> },
        #[route("/admin/sign-in?:redirect")]
        AdminSignIn { redirect: Option<String> },
    #[end_layout]
    #[nest("/admin")]
        #[layout(AdminLayout)]
            #[route("/dashboard")]
            AdminDashboard {},
            #[route("/brands")]
            AdminBrands {},
            #[route("/models")]
            AdminModels {},
            #[route("/users")]
            AdminUsers {},
            #[route("/orders")]
            AdminOrders {},
            #[route("/vendors")]
            AdminVendors {},
        #[end_layout]
    #[end_nest]
    #[nest("/user")]
        #[layout(UserLayout)]
            #[route("/dashboard")]
            UserDashboard {},
            #[route("/orders")]
            UserOrders {},
            #[route("/profile")]
            UserProfile {},
        #[end_layout]
    #[end_nest]
    #[redirect("/admin", || Route::AdminDashboard {})]
    #[redirect("/user", || Route::UserDashboard {})]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

impl Route {
    pub fn sign_in(user_type: UserType, redirect: Option<String>) -> Self {
        match user_type {
            UserType::Admin => Route::AdminSignIn { redirect },
            UserType::User => Route::UserSignIn { redirect },
        }
    }

    pub fn dashboard(user_type: UserType) -> Self {
        match user_type {
            UserType::Admin => Route::AdminDashboard {},
            UserType::User => Route::UserDashboard {},
        }
    }

    /// Parse an in-app path, falling back to the landing page.
    pub fn from_path(path: &str) -> Self {
        path.parse().unwrap_or(Route::Landing {})
    }
}

#[component]
fn AdminBrands() -> Element {
    rsx! { EntityPage::<Brand> { scope: UserType::Admin } }
}

#[component]
fn AdminModels() -> Element {
    rsx! { EntityPage::<Model> { scope: UserType::Admin } }
}

#[component]
fn AdminUsers() -> Element {
    rsx! { EntityPage::<User> { scope: UserType::Admin } }
}

#[component]
fn AdminOrders() -> Element {
    rsx! { EntityPage::<Order> { scope: UserType::Admin } }
}

#[component]
fn AdminVendors() -> Element {
    rsx! { EntityPage::<Vendor> { scope: UserType::Admin } }
}

#[component]
fn UserOrders() -> Element {
    rsx! { EntityPage::<Order> { scope: UserType::User } }
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::logger::initialize_default();

    #[cfg(feature = "web")]
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(Config::from_build_env);
    use_toast_provider();

    let title = match &config {
        Ok(config) => config.app_name.clone(),
        Err(_) => DEFAULT_APP_NAME.to_string(),
    };

    let content = match config {
        Ok(config) => rsx! {
            AuthProvider { config, Router::<Route> {} }
        },
        Err(error) => {
            tracing::error!(%error, "invalid configuration");
            rsx! {
                div { class: "status-page",
                    ErrorBanner { message: error.to_string() }
                }
            }
        }
    };

    rsx! {
        document::Title { "{title}" }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        {content}
    }
}
