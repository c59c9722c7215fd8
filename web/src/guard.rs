use dioxus::prelude::*;
use types::{
    UserType,
    access::{GateDecision, decide},
};
use ui::Loading;

use crate::{Route, auth::use_auth};

/// Renders `children` only for a signed-in `required_role`. Everyone else is
/// redirected: to that role's sign-in page when signed out, to
/// `/unauthorized` when signed in as someone else.
#[component]
pub fn ProtectedRoute(required_role: UserType, children: Element) -> Element {
    let auth = use_auth();
    let route = use_route::<Route>();
    let path = route.to_string();

    use_effect(use_reactive((&path,), move |(_,)| auth.verify()));

    match decide(auth.snapshot(), Some(required_role)) {
        GateDecision::Loading => rsx! { Loading {} },
        GateDecision::Allow => rsx! { {children} },
        GateDecision::SignIn => {
            tracing::debug!(%path, "not signed in, redirecting");
            navigator().replace(Route::sign_in(required_role, Some(path)));
            rsx! { Loading { label: "Redirecting to sign in..." } }
        }
        GateDecision::Unauthorized => {
            tracing::debug!(%path, "wrong role, redirecting");
            navigator().replace(Route::Unauthorized {});
            rsx! { Loading { label: "Redirecting..." } }
        }
    }
}

#[component]
pub fn AdminRoute(children: Element) -> Element {
    rsx! {
        ProtectedRoute { required_role: UserType::Admin, {children} }
    }
}

#[component]
pub fn UserRoute(children: Element) -> Element {
    rsx! {
        ProtectedRoute { required_role: UserType::User, {children} }
    }
}
