// HTTP client module: a small blocking client that POSTs one JSON body per
// call and hands back the status and the raw response text. The dispatch
// loop only sees the `Transport` trait, so tests can script replies.

use crate::error::TransportError;
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use std::time::Duration;

/// Environment variable holding an optional per-request timeout in seconds.
pub const TIMEOUT_ENV: &str = "CSV_CURL_TIMEOUT_SECS";

/// A completed HTTP exchange, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a serialized JSON body to a URL.
pub trait Transport {
    fn post_json(&self, url: &str, body: &str) -> Result<Reply, TransportError>;
}

/// reqwest-backed transport used by the binary.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    /// Build a client configured from `CSV_CURL_TIMEOUT_SECS`. When the
    /// variable is unset requests wait as long as the server takes.
    pub fn from_env() -> Result<Self> {
        let timeout = match std::env::var(TIMEOUT_ENV) {
            Ok(raw) => Some(parse_timeout(&raw)?),
            Err(_) => None,
        };
        Self::with_timeout(timeout)
    }

    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient { client })
    }
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    let secs: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{TIMEOUT_ENV} must be a number of seconds, got {raw:?}"))?;
    if !secs.is_finite() || secs <= 0.0 {
        anyhow::bail!("{TIMEOUT_ENV} must be positive, got {raw:?}");
    }
    Ok(Duration::from_secs_f64(secs))
}

impl Transport for ApiClient {
    fn post_json(&self, url: &str, body: &str) -> Result<Reply, TransportError> {
        let res = self
            .client
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body.to_string())
            .send()?;
        let status = res.status().as_u16();
        let body = res.text()?;
        Ok(Reply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_is_2xx_only() {
        let reply = |status| Reply { status, body: String::new() };
        assert!(reply(200).is_success());
        assert!(reply(204).is_success());
        assert!(reply(299).is_success());
        assert!(!reply(199).is_success());
        assert!(!reply(301).is_success());
        assert!(!reply(404).is_success());
        assert!(!reply(500).is_success());
    }

    #[test]
    fn timeout_values() {
        assert_eq!(parse_timeout("2").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_timeout(" 0.5 ").unwrap(), Duration::from_millis(500));
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("-1").is_err());
        assert!(parse_timeout("soon").is_err());
    }

    #[test]
    fn unreachable_host_is_a_transport_error() {
        // Bind then drop to get a local port with nothing listening.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = ApiClient::with_timeout(None).unwrap();
        let err = client
            .post_json(&format!("http://127.0.0.1:{port}/"), "{}")
            .unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
