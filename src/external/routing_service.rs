use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    api::{CityAPI, RouteAPI, API},
    config::Config,
    entities::{City, RouteRequest, RouteResponse},
    error::{malformed_response_error, rejected_error, upstream_error, Error},
};

/// Body the routing service sends along with a non-2xx status.
#[derive(Clone, Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Value,
}

impl ErrorBody {
    /// Server text worth showing; empty, zero, false and null do not count.
    fn message(self) -> Option<String> {
        match self.error {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s),
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            other => Some(other.to_string()),
        }
    }
}

/// HTTP client for the route-planning backend.
#[derive(Clone, Debug)]
pub struct RoutingService {
    api_base: String,
    client: reqwest::Client,
}

impl RoutingService {
    pub fn new(config: &Config) -> Self {
        Self {
            api_base: config.api_base.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

#[async_trait]
impl CityAPI for RoutingService {
    #[tracing::instrument(skip(self), fields(api_base = %self.api_base))]
    async fn list_cities(&self) -> Result<Vec<City>, Error> {
        let res = self.client.get(self.url("/api/cities")).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(upstream_error(status.as_u16()));
        }

        let body = res.text().await?;
        let cities: Vec<City> = serde_json::from_str(&body)?;

        tracing::info!("loaded {} cities", cities.len());

        Ok(cities)
    }
}

#[async_trait]
impl RouteAPI for RoutingService {
    #[tracing::instrument(skip(self), fields(api_base = %self.api_base))]
    async fn find_route(&self, request: RouteRequest) -> Result<RouteResponse, Error> {
        let res = self
            .client
            .post(self.url("/api/route"))
            .json(&request)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return match serde_json::from_str::<ErrorBody>(&body).map(ErrorBody::message) {
                Ok(Some(message)) => Err(rejected_error(message)),
                _ => Err(upstream_error(status.as_u16())),
            };
        }

        serde_json::from_str(&body).map_err(malformed_response_error)
    }
}

impl API for RoutingService {}

#[test]
fn trailing_slash_is_dropped_from_base() {
    let service = RoutingService::new(&Config {
        api_base: "http://localhost:5000/".into(),
    });

    assert_eq!(service.api_base(), "http://localhost:5000");
    assert_eq!(service.url("/api/cities"), "http://localhost:5000/api/cities");
}

#[test]
fn error_body_message() {
    let message = |body: &str| {
        serde_json::from_str::<ErrorBody>(body)
            .unwrap()
            .message()
    };

    assert_eq!(message(r#"{"error": "no route"}"#), Some("no route".into()));
    assert_eq!(message(r#"{"error": 42}"#), Some("42".into()));
    assert_eq!(message(r#"{"error": true}"#), Some("true".into()));
    assert_eq!(message(r#"{"error": ""}"#), None);
    assert_eq!(message(r#"{"error": 0}"#), None);
    assert_eq!(message(r#"{"error": null}"#), None);
    assert_eq!(message(r#"{"detail": "x"}"#), None);
}
