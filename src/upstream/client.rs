use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::schema::UnitsOfMeasurement;

/// OpenWeatherMap data API routes the gateway forwards to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    CurrentWeather,
    DailyForecast,
    PeriodForecast,
}

impl Endpoint {
    /// Path relative to the provider base URL
    pub fn path(self) -> &'static str {
        match self {
            Self::CurrentWeather => "/weather",
            Self::DailyForecast => "/forecast/daily",
            Self::PeriodForecast => "/forecast",
        }
    }
}

/// Caller-supplied query for one upstream call
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamQuery {
    pub lat: f64,
    pub lon: f64,
    pub units: UnitsOfMeasurement,
    pub lang: Option<String>,
    pub cnt: Option<u8>,
}

impl UpstreamQuery {
    /// Query pairs without the credential; absent options are not sent
    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("lat", self.lat.to_string()),
            ("lon", self.lon.to_string()),
            ("units", self.units.as_str().to_string()),
        ];
        if let Some(lang) = &self.lang {
            pairs.push(("lang", lang.clone()));
        }
        if let Some(cnt) = self.cnt {
            pairs.push(("cnt", cnt.to_string()));
        }
        pairs
    }
}

/// A non-2xx upstream response, status and body taken verbatim
#[derive(Debug, Clone)]
pub struct UpstreamError {
    pub status: StatusCode,
    pub body: Value,
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Upstream responded with HTTP {}", .0.status)]
    Status(UpstreamError),

    #[error("Failed to reach upstream: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Upstream body is not valid JSON: {0}")]
    MalformedBody(#[source] serde_json::Error),
}

impl FetchError {
    /// The request URL carries `appid`, so it never leaves the client
    fn transport(source: reqwest::Error) -> Self {
        Self::Transport(source.without_url())
    }
}

/// Thin client for the OpenWeatherMap data API.
///
/// Every call carries the configured `appid`. No retries, no caching.
pub struct UpstreamClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl UpstreamClient {
    pub fn new(client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Issue a single GET and return the decoded JSON body unmodified
    pub async fn fetch(&self, endpoint: Endpoint, query: &UpstreamQuery) -> Result<Value, FetchError> {
        let url = format!("{}{}", self.base_url, endpoint.path());

        let response = self
            .client
            .get(&url)
            .query(&query.pairs())
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(FetchError::transport)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(FetchError::transport)?;

        if !status.is_success() {
            return Err(FetchError::Status(UpstreamError {
                status,
                body: error_body(&bytes),
            }));
        }

        serde_json::from_slice(&bytes).map_err(FetchError::MalformedBody)
    }
}

/// Error bodies are usually JSON; anything else is kept as a string
fn error_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
