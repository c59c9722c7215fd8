use url::Url;

use crate::{Error, Result};

pub const DEFAULT_APP_NAME: &str = "Storefront";
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/";

/// Settings baked into the bundle at build time.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub app_name: String,
    /// Always ends with `/` so relative endpoint paths join beneath it.
    pub api_url: Url,
    /// Verify the session token with the API on startup and on every
    /// protected navigation.
    pub verify_sessions: bool,
}

impl Config {
    /// Read `DASHBOARD_APP_NAME`, `DASHBOARD_API_URL` and
    /// `DASHBOARD_VERIFY_SESSIONS` as they were set when the bundle was
    /// compiled.
    pub fn from_build_env() -> Result<Self> {
        Self::from_lookup(|name| {
            let value = match name {
                "DASHBOARD_APP_NAME" => option_env!("DASHBOARD_APP_NAME"),
                "DASHBOARD_API_URL" => option_env!("DASHBOARD_API_URL"),
                "DASHBOARD_VERIFY_SESSIONS" => option_env!("DASHBOARD_VERIFY_SESSIONS"),
                _ => None,
            };
            value.map(String::from)
        })
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let app_name = lookup("DASHBOARD_APP_NAME")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_APP_NAME.into());

        let api_url = lookup("DASHBOARD_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into());
        let api_url = normalize_base_url(&api_url)?;

        let verify_sessions = match lookup("DASHBOARD_VERIFY_SESSIONS") {
            Some(value) => parse_flag(&value).ok_or_else(|| {
                Error::Config(format!(
                    "DASHBOARD_VERIFY_SESSIONS must be a boolean, got '{value}'"
                ))
            })?,
            None => false,
        };

        Ok(Self {
            app_name,
            api_url,
            verify_sessions,
        })
    }
}

fn normalize_base_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let mut url = Url::parse(raw)?;
    if url.cannot_be_a_base() {
        return Err(Error::Config(format!("'{raw}' cannot be used as a base URL")));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.app_name, DEFAULT_APP_NAME);
        assert_eq!(config.api_url.as_str(), DEFAULT_API_URL);
        assert!(!config.verify_sessions);
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let config =
            Config::from_lookup(lookup(&[("DASHBOARD_API_URL", "https://shop.example/api/v2")]))
                .unwrap();
        assert_eq!(config.api_url.as_str(), "https://shop.example/api/v2/");
        assert_eq!(
            config.api_url.join("admin/brands").unwrap().as_str(),
            "https://shop.example/api/v2/admin/brands"
        );
    }

    #[test]
    fn verify_flag_parses() {
        let config =
            Config::from_lookup(lookup(&[("DASHBOARD_VERIFY_SESSIONS", "Yes")])).unwrap();
        assert!(config.verify_sessions);

        let err = Config::from_lookup(lookup(&[("DASHBOARD_VERIFY_SESSIONS", "maybe")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn invalid_url_is_rejected() {
        let err = Config::from_lookup(lookup(&[("DASHBOARD_API_URL", "not a url")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn blank_app_name_falls_back() {
        let config = Config::from_lookup(lookup(&[("DASHBOARD_APP_NAME", "  ")])).unwrap();
        assert_eq!(config.app_name, DEFAULT_APP_NAME);
    }
}
