//! Where the session is persisted: `localStorage` in the browser, a
//! per-thread map everywhere else.

use types::session::SessionStore;

#[cfg(feature = "web")]
pub use browser::BrowserStorage;

#[cfg(not(feature = "web"))]
pub type BrowserStorage = types::session::MemoryStorage;

pub fn session_store() -> SessionStore<BrowserStorage> {
    SessionStore::new(local())
}

#[cfg(feature = "web")]
fn local() -> BrowserStorage {
    BrowserStorage
}

#[cfg(not(feature = "web"))]
fn local() -> BrowserStorage {
    thread_local! {
        static STORAGE: BrowserStorage = BrowserStorage::default();
    }
    STORAGE.with(Clone::clone)
}

#[cfg(feature = "web")]
mod browser {
    use types::{Error, Result, err, session::Storage};

    /// `window.localStorage`, looked up on every access.
    #[derive(Debug, Clone, Copy)]
    pub struct BrowserStorage;

    impl BrowserStorage {
        fn local_storage() -> Result<web_sys::Storage> {
            web_sys::window()
                .ok_or_else(|| err!("no window"))?
                .local_storage()
                .map_err(js_error)?
                .ok_or_else(|| err!("localStorage is unavailable"))
        }
    }

    fn js_error(value: impl std::fmt::Debug) -> Error {
        Error::Storage(format!("{value:?}"))
    }

    impl Storage for BrowserStorage {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Self::local_storage()?.get_item(key).map_err(js_error)
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            Self::local_storage()?.set_item(key, value).map_err(js_error)
        }

        fn remove(&self, key: &str) -> Result<()> {
            Self::local_storage()?.remove_item(key).map_err(js_error)
        }
    }
}
