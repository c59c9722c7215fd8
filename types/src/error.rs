use thiserror::Error;

/// A cloneable error for client rendering.
///
/// Errors end up in signals and toasts, so every variant carries its message
/// as an owned string rather than the source error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The API answered `success: false`.
    #[error("{0}")]
    Api(String),
    /// The API rejected the session token.
    #[error("your session is no longer valid")]
    Unauthorized,
    #[error("request failed: {0}")]
    Http(String),
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("invalid menu: {0}")]
    InvalidMenu(String),
    #[error("{0}")]
    Other(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Unauthorized)
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        if error.status() == Some(reqwest::StatusCode::UNAUTHORIZED) {
            return Error::Unauthorized;
        }
        Error::Http(error.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Decode(error.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(error: url::ParseError) -> Self {
        Error::Config(error.to_string())
    }
}

impl From<base64::DecodeError> for Error {
    fn from(error: base64::DecodeError) -> Self {
        Error::Decode(error.to_string())
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

/// Build an [`Error::Other`] from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::Other(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn err_macro_formats() {
        let e = err!("missing {}", "userType");
        assert_eq!(e, Error::Other("missing userType".into()));
        assert_eq!(e.to_string(), "missing userType");
    }

    #[test]
    fn api_errors_display_raw_message() {
        assert_eq!(Error::Api("timeout".into()).to_string(), "timeout");
        assert!(Error::Unauthorized.is_unauthorized());
        assert!(!Error::Api("timeout".into()).is_unauthorized());
    }
}
