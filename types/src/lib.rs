pub mod access;
pub mod config;
pub mod entity;
mod error;
pub mod form;
pub mod listing;
pub mod nav;
pub mod session;

pub use config::Config;
pub use error::{Error, Result};
pub use session::{Profile, Session, UserType};
