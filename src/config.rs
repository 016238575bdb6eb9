use std::env;

use reqwest::Url;

use crate::error::{invalid_input_error, Error};

pub const API_BASE_VAR: &str = "ROUTE_PLANNER_API_BASE";
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub api_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
        }
    }
}

impl Config {
    /// Reads `.env` when present, then the process environment.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        let api_base = match env::var(API_BASE_VAR) {
            Ok(value) => value,
            Err(env::VarError::NotPresent) => DEFAULT_API_BASE.into(),
            Err(err) => return Err(err.into()),
        };

        Self::default().with_api_base(api_base)
    }

    /// An explicit base URL wins; the environment is not consulted then.
    pub fn resolve(api_base: Option<String>) -> Result<Self, Error> {
        match api_base {
            Some(api_base) => Self::default().with_api_base(api_base),
            None => Self::from_env(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Result<Self, Error> {
        let api_base = api_base.into();
        let api_base = api_base.trim();

        let is_http = match Url::parse(api_base) {
            Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
            Err(_) => false,
        };
        if !is_http {
            return Err(invalid_input_error(format!(
                "API base must be an http(s) URL: {}",
                api_base
            )));
        }

        self.api_base = api_base.to_string();
        Ok(self)
    }
}

#[test]
fn default_points_at_local_backend() {
    assert_eq!(Config::default().api_base, "http://127.0.0.1:5000");
}

#[test]
fn api_base_override() {
    let config = Config::default()
        .with_api_base(" https://routes.example.lk ")
        .unwrap();

    assert_eq!(config.api_base, "https://routes.example.lk");
}

#[test]
fn api_base_must_be_http() {
    let err = Config::default().with_api_base("routes.example.lk").unwrap_err();

    assert_eq!(err.code, 101);
}

#[test]
fn api_base_needs_a_host() {
    for value in ["http://", "https://", "ftp://routes.example.lk", "localhost:5000"] {
        let err = Config::default().with_api_base(value).unwrap_err();
        assert_eq!(err.code, 101, "{}", value);
    }
}

#[test]
fn explicit_api_base_ignores_environment() {
    env::set_var(API_BASE_VAR, "localhost:5000");

    let config = Config::resolve(Some("http://127.0.0.1:9".into())).unwrap();
    assert_eq!(config.api_base, "http://127.0.0.1:9");

    assert!(Config::resolve(None).is_err());

    env::remove_var(API_BASE_VAR);
}
