use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc, str::FromStr};

use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use jiff::Timestamp;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Keys written to browser storage. `logout` removes every one of them.
pub mod keys {
    pub const USER_TYPE: &str = "userType";
    pub const IS_AUTHENTICATED: &str = "isAuthenticated";
    pub const AUTH_TOKEN: &str = "authToken";
    pub const USER_DATA: &str = "userData";
    pub const CUSTOMER_ID: &str = "customerId";
    pub const USER: &str = "user";

    pub const ALL: [&str; 6] = [USER_TYPE, IS_AUTHENTICATED, AUTH_TOKEN, USER_DATA, CUSTOMER_ID, USER];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Admin,
    User,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Admin => "admin",
            UserType::User => "user",
        }
    }

    pub fn sign_in_path(&self) -> &'static str {
        match self {
            UserType::Admin => "/admin/sign-in",
            UserType::User => "/sign-in",
        }
    }

    pub fn dashboard_path(&self) -> &'static str {
        match self {
            UserType::Admin => "/admin/dashboard",
            UserType::User => "/user/dashboard",
        }
    }

    /// Path prefix of the pages this role may visit.
    pub fn area_prefix(&self) -> &'static str {
        match self {
            UserType::Admin => "/admin/",
            UserType::User => "/user/",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "admin" => Ok(UserType::Admin),
            "user" => Ok(UserType::User),
            other => Err(Error::Storage(format!("unknown user type '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: String,
}

impl Profile {
    /// Name to greet the user with.
    pub fn display_name(&self) -> &str {
        if !self.name.is_empty() {
            &self.name
        } else if !self.email.is_empty() {
            &self.email
        } else {
            "there"
        }
    }

    pub fn initial(&self) -> String {
        self.display_name()
            .chars()
            .next()
            .unwrap_or('?')
            .to_uppercase()
            .to_string()
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub user_type: UserType,
    pub token: Option<SecretString>,
    pub profile: Profile,
    pub customer_id: Option<String>,
}

impl Session {
    pub fn new(user_type: UserType, profile: Profile) -> Self {
        Self {
            user_type,
            token: None,
            profile,
            customer_id: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into().into());
        self
    }

    /// Whether both sessions carry the same token, so a check of one still
    /// applies to the other.
    pub fn same_token(&self, other: &Session) -> bool {
        match (&self.token, &other.token) {
            (Some(a), Some(b)) => a.expose_secret() == b.expose_secret(),
            (None, None) => true,
            _ => false,
        }
    }

    /// True when the token is a JWT whose `exp` claim is not after `now`.
    /// Opaque tokens never expire client-side.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.token
            .as_ref()
            .and_then(|token| token_expiry(token.expose_secret()))
            .is_some_and(|exp| exp <= now)
    }
}

/// Read the `exp` claim of a JWT without checking its signature.
pub fn token_expiry(token: &str) -> Option<Timestamp> {
    #[derive(Deserialize)]
    struct Claims {
        exp: Option<i64>,
    }

    let mut parts = token.split('.');
    let (_header, payload, _signature) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let bytes = BASE64_URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;
    Timestamp::from_second(claims.exp?).ok()
}

/// Body of a successful sign-in.
#[derive(Debug, Clone, Deserialize)]
pub struct SignInResponse {
    #[serde(with = "secret_string")]
    pub token: SecretString,
    #[serde(default)]
    pub user: SignInUser,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignInUser {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: String,
}

impl SignInResponse {
    pub fn into_session(self, user_type: UserType) -> Session {
        let customer_id = match user_type {
            UserType::User => self.user.id,
            UserType::Admin => None,
        };

        Session {
            user_type,
            token: Some(self.token),
            profile: Profile {
                name: self.user.name,
                email: self.user.email,
                mobile: self.user.mobile,
            },
            customer_id,
        }
    }
}

mod secret_string {
    use secrecy::SecretString;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.into())
    }
}

/// Key/value persistence the session lives in.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Storage backed by a shared in-memory map. Clones see the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let storage = Self::default();
        storage.entries.borrow_mut().extend(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        );
        storage
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Reads and writes a [`Session`] under the fixed storage [`keys`].
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: Storage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The persisted session, if the authentication flag is set.
    pub fn load(&self) -> Result<Option<Session>> {
        let flag = self.storage.get(keys::IS_AUTHENTICATED)?;
        if flag.as_deref().map(str::trim) != Some("true") {
            return Ok(None);
        }

        let user_type: UserType = self
            .storage
            .get(keys::USER_TYPE)?
            .ok_or_else(|| Error::Storage("userType is missing".into()))?
            .parse()?;

        let token = self
            .storage
            .get(keys::AUTH_TOKEN)?
            .filter(|t| !t.trim().is_empty())
            .map(SecretString::from);

        let mut profile: Profile = match self.storage.get(keys::USER_DATA)? {
            Some(json) if !json.trim().is_empty() => serde_json::from_str(&json)?,
            _ => Profile::default(),
        };
        if profile.name.is_empty() {
            profile.name = self.storage.get(keys::USER)?.unwrap_or_default();
        }

        let customer_id = self
            .storage
            .get(keys::CUSTOMER_ID)?
            .filter(|id| !id.is_empty());

        Ok(Some(Session {
            user_type,
            token,
            profile,
            customer_id,
        }))
    }

    /// Load the session for app start. Malformed or expired data counts as
    /// no session and is wiped.
    pub fn restore(&self, now: Timestamp) -> Option<Session> {
        match self.load() {
            Ok(Some(session)) if session.is_expired(now) => {
                tracing::info!(user_type = %session.user_type, "persisted session has expired");
                self.clear_quietly();
                None
            }
            Ok(session) => session,
            Err(error) => {
                tracing::warn!(%error, "discarding malformed persisted session");
                self.clear_quietly();
                None
            }
        }
    }

    pub fn persist(&self, session: &Session) -> Result<()> {
        self.storage
            .set(keys::USER_TYPE, session.user_type.as_str())?;
        self.storage.set(keys::IS_AUTHENTICATED, "true")?;
        match &session.token {
            Some(token) => self.storage.set(keys::AUTH_TOKEN, token.expose_secret())?,
            None => self.storage.remove(keys::AUTH_TOKEN)?,
        }
        self.storage
            .set(keys::USER_DATA, &serde_json::to_string(&session.profile)?)?;
        match &session.customer_id {
            Some(id) => self.storage.set(keys::CUSTOMER_ID, id)?,
            None => self.storage.remove(keys::CUSTOMER_ID)?,
        }
        self.storage.set(keys::USER, &session.profile.name)?;
        Ok(())
    }

    /// Remove every session key. Keeps going past failures and reports the
    /// first one.
    pub fn clear(&self) -> Result<()> {
        let mut first_error = None;
        for key in keys::ALL {
            if let Err(error) = self.storage.remove(key) {
                first_error.get_or_insert(error);
            }
        }
        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn clear_quietly(&self) {
        if let Err(error) = self.clear() {
            tracing::warn!(%error, "failed to clear persisted session");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt_with_exp(exp: i64) -> String {
        let header = BASE64_URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = BASE64_URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"42","exp":{exp}}}"#));
        format!("{header}.{payload}.c2lnbmF0dXJl")
    }

    #[test]
    fn flag_and_role_alone_rehydrate() {
        let storage = MemoryStorage::with_entries([
            (keys::IS_AUTHENTICATED, "true"),
            (keys::USER_TYPE, "admin"),
        ]);
        let session = SessionStore::new(storage).load().unwrap().unwrap();
        assert_eq!(session.user_type, UserType::Admin);
        assert!(session.token.is_none());
        assert_eq!(session.profile, Profile::default());
    }

    #[test]
    fn empty_storage_has_no_session() {
        let store = SessionStore::new(MemoryStorage::default());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn false_flag_has_no_session() {
        let storage = MemoryStorage::with_entries([
            (keys::IS_AUTHENTICATED, "false"),
            (keys::USER_TYPE, "admin"),
        ]);
        assert!(SessionStore::new(storage).load().unwrap().is_none());
    }

    #[test]
    fn malformed_user_data_is_an_error_and_restore_wipes_it() {
        let storage = MemoryStorage::with_entries([
            (keys::IS_AUTHENTICATED, "true"),
            (keys::USER_TYPE, "user"),
            (keys::USER_DATA, "{not json"),
        ]);
        let store = SessionStore::new(storage.clone());
        assert!(matches!(store.load(), Err(Error::Decode(_))));

        assert!(store.restore(Timestamp::now()).is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn unknown_role_is_malformed() {
        let storage = MemoryStorage::with_entries([
            (keys::IS_AUTHENTICATED, "true"),
            (keys::USER_TYPE, "superuser"),
        ]);
        let store = SessionStore::new(storage);
        assert!(matches!(store.load(), Err(Error::Storage(_))));
        assert!(store.restore(Timestamp::now()).is_none());
    }

    #[test]
    fn persist_then_load_keeps_profile_and_customer() {
        let storage = MemoryStorage::default();
        let store = SessionStore::new(storage.clone());
        let mut session = Session::new(
            UserType::User,
            Profile {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                mobile: "555-0100".into(),
            },
        )
        .with_token("opaque-token");
        session.customer_id = Some("c-17".into());

        store.persist(&session).unwrap();
        assert_eq!(storage.get(keys::USER).unwrap().as_deref(), Some("Ada"));

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.user_type, UserType::User);
        assert_eq!(loaded.profile, session.profile);
        assert_eq!(loaded.customer_id.as_deref(), Some("c-17"));
        assert_eq!(
            loaded.token.as_ref().map(|t| t.expose_secret().to_string()),
            Some("opaque-token".to_string())
        );
    }

    #[test]
    fn legacy_user_key_fills_missing_name() {
        let storage = MemoryStorage::with_entries([
            (keys::IS_AUTHENTICATED, "true"),
            (keys::USER_TYPE, "user"),
            (keys::USER, "Grace"),
        ]);
        let session = SessionStore::new(storage).load().unwrap().unwrap();
        assert_eq!(session.profile.name, "Grace");
    }

    #[test]
    fn clear_removes_every_key() {
        let storage = MemoryStorage::with_entries(keys::ALL.map(|k| (k, "x")));
        storage.set("theme", "dark").unwrap();
        let store = SessionStore::new(storage.clone());

        store.clear().unwrap();

        for key in keys::ALL {
            assert!(!storage.contains(key), "{key} survived clear");
        }
        assert!(storage.contains("theme"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn jwt_expiry_is_read() {
        let token = jwt_with_exp(1_700_000_000);
        assert_eq!(
            token_expiry(&token),
            Some(Timestamp::from_second(1_700_000_000).unwrap())
        );
        assert_eq!(token_expiry("opaque-token"), None);
        assert_eq!(token_expiry("a.b.c.d"), None);
    }

    #[test]
    fn expired_tokens_are_not_restored() {
        let now = Timestamp::from_second(1_800_000_000).unwrap();
        let storage = MemoryStorage::with_entries([
            (keys::IS_AUTHENTICATED, "true"),
            (keys::USER_TYPE, "admin"),
        ]);
        storage
            .set(keys::AUTH_TOKEN, &jwt_with_exp(1_700_000_000))
            .unwrap();
        let store = SessionStore::new(storage.clone());

        assert!(store.restore(now).is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn live_tokens_are_restored() {
        let now = Timestamp::from_second(1_600_000_000).unwrap();
        let storage = MemoryStorage::with_entries([
            (keys::IS_AUTHENTICATED, "true"),
            (keys::USER_TYPE, "admin"),
        ]);
        storage
            .set(keys::AUTH_TOKEN, &jwt_with_exp(1_700_000_000))
            .unwrap();

        let session = SessionStore::new(storage).restore(now).unwrap();
        assert!(!session.is_expired(now));
    }

    #[test]
    fn sign_in_response_becomes_session() {
        let json = r#"{
            "token": "tok",
            "user": { "_id": "c-9", "name": "Lin", "email": "lin@example.com" }
        }"#;
        let response: SignInResponse = serde_json::from_str(json).unwrap();
        let session = response.clone().into_session(UserType::User);
        assert_eq!(session.customer_id.as_deref(), Some("c-9"));
        assert_eq!(session.profile.name, "Lin");
        assert_eq!(session.profile.mobile, "");

        let admin = response.into_session(UserType::Admin);
        assert!(admin.customer_id.is_none());
    }

    #[test]
    fn sessions_compare_by_token() {
        let profile = Profile::default();
        let a = Session::new(UserType::Admin, profile.clone()).with_token("tok-a");
        let b = Session::new(UserType::Admin, profile.clone()).with_token("tok-b");
        let bare = Session::new(UserType::Admin, profile);

        assert!(a.same_token(&a.clone()));
        assert!(!a.same_token(&b));
        assert!(!a.same_token(&bare));
        assert!(bare.same_token(&bare.clone()));
    }

    #[test]
    fn profile_display_name_falls_back() {
        let profile = Profile {
            email: "x@example.com".into(),
            ..Profile::default()
        };
        assert_eq!(profile.display_name(), "x@example.com");
        assert_eq!(profile.initial(), "X");
        assert_eq!(Profile::default().display_name(), "there");
    }
}
