//! Route-guard decisions.

use crate::UserType;

/// What the guard sees of the auth context on a given render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthSnapshot {
    pub is_loading: bool,
    pub user_type: Option<UserType>,
}

impl AuthSnapshot {
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            user_type: None,
        }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn signed_in(user_type: UserType) -> Self {
        Self {
            is_loading: false,
            user_type: Some(user_type),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_type.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Session is still being restored; show a spinner, decide nothing.
    Loading,
    /// Render the protected children.
    Allow,
    /// Send the visitor to sign in, remembering where they were going.
    SignIn,
    /// Signed in with the wrong role.
    Unauthorized,
}

pub fn decide(snapshot: AuthSnapshot, required_role: Option<UserType>) -> GateDecision {
    if snapshot.is_loading {
        return GateDecision::Loading;
    }

    match (snapshot.user_type, required_role) {
        (None, _) => GateDecision::SignIn,
        (Some(actual), Some(required)) if actual != required => GateDecision::Unauthorized,
        (Some(_), _) => GateDecision::Allow,
    }
}

/// Where to go after signing in as `user_type`.
///
/// The redirect is honoured only when it points inside the role's own area
/// and is not the sign-in page itself.
pub fn post_sign_in_target(user_type: UserType, redirect: Option<&str>) -> String {
    redirect
        .map(str::trim)
        .filter(|path| path.starts_with(user_type.area_prefix()))
        .filter(|path| !path.starts_with(user_type.sign_in_path()))
        .map(String::from)
        .unwrap_or_else(|| user_type.dashboard_path().to_string())
}
