use super::{Transport, TransportError, TransportResponse};
use reqwest::header::CONTENT_TYPE;
use reqwest::Proxy;
use std::collections::BTreeMap;
use std::env;
use std::time::Duration;
use tracing::{trace, warn};
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 32;
const DEFAULT_POOL_IDLE_TIMEOUT_SECS: u64 = 90;

/// Connection settings for [`HttpTransport`].
///
/// Environment overrides:
///
/// - `WIALON_HTTP_TIMEOUT_SECS` (default 30)
/// - `WIALON_HTTP_POOL_MAX_IDLE_PER_HOST` (default 32)
/// - `WIALON_HTTP_POOL_IDLE_TIMEOUT_SECS` (default 90)
/// - `WIALON_PROXY_URL` (unset by default)
///
/// Unparsable numbers fall back to the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    pub timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub pool_idle_timeout: Duration,
    pub proxy_url: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            pool_idle_timeout: Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT_SECS),
            proxy_url: None,
        }
    }
}

impl HttpSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read overrides through `lookup` (the process environment in [`HttpSettings::from_env`]).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parse_u64 = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u64>().ok());
        Self {
            timeout: Duration::from_secs(
                parse_u64("WIALON_HTTP_TIMEOUT_SECS").unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            pool_max_idle_per_host: lookup("WIALON_HTTP_POOL_MAX_IDLE_PER_HOST")
                .and_then(|s| s.trim().parse::<usize>().ok())
                .unwrap_or(DEFAULT_POOL_MAX_IDLE_PER_HOST),
            pool_idle_timeout: Duration::from_secs(
                parse_u64("WIALON_HTTP_POOL_IDLE_TIMEOUT_SECS")
                    .unwrap_or(DEFAULT_POOL_IDLE_TIMEOUT_SECS),
            ),
            proxy_url: lookup("WIALON_PROXY_URL").filter(|s| !s.trim().is_empty()),
        }
    }
}

/// Blocking HTTP transport backed by `reqwest`.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Build a transport from [`HttpSettings::from_env`].
    pub fn from_env() -> Result<Self, TransportError> {
        Self::with_settings(&HttpSettings::from_env())
    }

    pub fn with_settings(settings: &HttpSettings) -> Result<Self, TransportError> {
        let mut builder = reqwest::blocking::Client::builder()
            .timeout(settings.timeout)
            .pool_max_idle_per_host(settings.pool_max_idle_per_host)
            .pool_idle_timeout(Some(settings.pool_idle_timeout));

        if let Some(proxy_url) = settings.proxy_url.as_deref() {
            match Proxy::all(proxy_url) {
                Ok(proxy) => builder = builder.proxy(proxy),
                Err(e) => warn!(proxy_url, error = %e, "ignoring invalid proxy URL"),
            }
        }

        let client = builder.build()?;
        Ok(Self { client })
    }

    /// Wrap an already configured client (custom TLS, headers, timeouts).
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn get(
        &self,
        url: &Url,
        query: &BTreeMap<String, String>,
    ) -> Result<TransportResponse, TransportError> {
        let response = self.client.get(url.clone()).query(query).send()?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text()?;

        trace!(http_status = status, bytes = body.len(), "wialon transport response");

        Ok(TransportResponse {
            status,
            content_type,
            body,
        })
    }
}
