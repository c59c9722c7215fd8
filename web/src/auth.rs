use api::ApiClient;
use dioxus::prelude::*;
use jiff::Timestamp;
use types::{Config, Error, Session, UserType, access::AuthSnapshot};

use crate::{Route, storage::session_store};

/// Session state shared with the whole tree. Use `use_auth()` to access.
#[derive(Clone, Copy)]
pub struct AuthContext {
    session: Signal<Option<Session>>,
    loading: Signal<bool>,
    config: Signal<Config>,
}

impl AuthContext {
    pub fn snapshot(&self) -> AuthSnapshot {
        AuthSnapshot {
            is_loading: (self.loading)(),
            user_type: self.user_type(),
        }
    }

    pub fn is_loading(&self) -> bool {
        (self.loading)()
    }

    pub fn user_type(&self) -> Option<UserType> {
        self.session.read().as_ref().map(|s| s.user_type)
    }

    pub fn session(&self) -> Option<Session> {
        self.session.read().clone()
    }

    pub fn config(&self) -> Config {
        self.config.read().clone()
    }

    /// REST client carrying the current token. Does not subscribe the caller
    /// to session changes.
    pub fn api(&self) -> ApiClient {
        let token = self.session.peek().as_ref().and_then(|s| s.token.clone());
        ApiClient::new(self.config.peek().api_url.clone()).with_token(token)
    }

    pub fn login(&mut self, session: Session) {
        if let Err(error) = session_store().persist(&session) {
            tracing::warn!(%error, "failed to persist session");
        }
        tracing::info!(user_type = %session.user_type, "signed in");
        self.session.set(Some(session));
    }

    /// Forget the session and go back to the landing page.
    pub fn logout(&mut self) {
        tracing::info!("signed out");
        self.forget();
        navigator().push(Route::Landing {});
    }

    /// Drop a session the API no longer accepts. Guards then send the visitor
    /// to sign in.
    pub fn expire(&mut self) {
        if self.session.peek().is_none() {
            return;
        }
        tracing::info!("session expired");
        self.forget();
    }

    fn forget(&mut self) {
        if let Err(error) = session_store().clear() {
            tracing::warn!(%error, "failed to clear persisted session");
        }
        self.session.set(None);
    }

    /// Check the session with the API in the background, when verification
    /// is enabled.
    pub fn verify(&self) {
        if !self.config.peek().verify_sessions {
            return;
        }
        let mut auth = *self;
        spawn(async move { auth.check().await });
    }

    async fn check(&mut self) {
        let Some(session) = self.session.peek().clone() else {
            return;
        };
        if session.token.is_none() {
            tracing::warn!(user_type = %session.user_type, "session has no token");
            self.expire();
            return;
        }

        match self.api().verify_session().await {
            Ok(()) => tracing::debug!("session verified"),
            Err(error @ (Error::Unauthorized | Error::Api(_))) => {
                if !self.still_holds(&session) {
                    tracing::debug!(%error, "session changed during verification, ignoring");
                    return;
                }
                tracing::info!(%error, "session rejected by the API");
                self.expire();
            }
            Err(error) => tracing::warn!(%error, "could not verify session, keeping it"),
        }
    }

    fn still_holds(&self, checked: &Session) -> bool {
        self.session
            .peek()
            .as_ref()
            .is_some_and(|current| current.same_token(checked))
    }

    async fn initialize(mut self) {
        let restored = session_store().restore(Timestamp::now());
        if let Some(session) = &restored {
            tracing::debug!(user_type = %session.user_type, "restored session");
        }
        self.session.set(restored);

        if self.config.peek().verify_sessions {
            self.check().await;
        }
        self.loading.set(false);
    }
}

/// Restores the persisted session and provides [`AuthContext`] to
/// `children`.
#[component]
pub fn AuthProvider(config: Config, children: Element) -> Element {
    let auth = use_context_provider(|| AuthContext {
        session: Signal::new(None),
        loading: Signal::new(true),
        config: Signal::new(config.clone()),
    });

    use_hook(move || spawn(auth.initialize()));

    rsx! { {children} }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
}
