use crate::client::config::{ClientConfig, SessionKey, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SCHEME};
use crate::client::core::Wialon;
use crate::client::endpoint::Endpoints;
use crate::transport::{HttpTransport, Transport};
use crate::{Error, ErrorContext, Result};
use std::collections::BTreeMap;
use std::sync::Arc;
use url::Url;

/// Builder for [`Wialon`] clients.
///
/// Defaults target the hosted service: `http://hst-api.wialon.com:80`, session
/// key `sid`, no session, no extra parameters.
pub struct WialonBuilder {
    scheme: String,
    host: String,
    port: u16,
    /// Full root URL; takes precedence over scheme/host/port (self-hosted installs, mock servers)
    base_url_override: Option<String>,
    sid: Option<String>,
    sdk_pro: bool,
    extra_params: BTreeMap<String, String>,
    transport: Option<Arc<dyn Transport>>,
    strict_content_type: bool,
}

impl WialonBuilder {
    pub fn new() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            base_url_override: None,
            sid: None,
            sdk_pro: false,
            extra_params: BTreeMap::new(),
            transport: None,
            strict_content_type: false,
        }
    }

    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Use a full root URL instead of scheme/host/port.
    pub fn base_url_override(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    /// Start with an existing session id.
    pub fn sid(mut self, sid: impl Into<String>) -> Self {
        self.sid = Some(sid.into());
        self
    }

    /// SDK Pro installations expect the session in `ssid` instead of `sid`.
    pub fn sdk_pro(mut self, enable: bool) -> Self {
        self.sdk_pro = enable;
        self
    }

    pub fn extra_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_params.insert(key.into(), value.into());
        self
    }

    pub fn extra_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.extra_params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Inject a transport. Default is [`HttpTransport::from_env`].
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Treat non-JSON responses as decode errors instead of returning them undecoded.
    ///
    /// Also enabled by `WIALON_STRICT_CONTENT_TYPE=1`.
    pub fn strict_content_type(mut self, enable: bool) -> Self {
        self.strict_content_type = enable;
        self
    }

    pub fn build(self) -> Result<Wialon> {
        let endpoints = match self.base_url_override.as_deref() {
            Some(raw) => {
                let root = Url::parse(raw).map_err(|e| {
                    Error::configuration(format!("Invalid base URL {}: {}", raw, e))
                        .with_context(ErrorContext::new().with_source("builder"))
                        .with_cause(e)
                })?;
                Endpoints::from_root(root)?
            }
            None => Endpoints::new(&self.scheme, &self.host, self.port)?,
        };

        let strict_content_type = self.strict_content_type
            || strict_content_type_from(|key| std::env::var(key).ok());

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::from_env().map_err(|e| {
                Error::configuration(format!("Cannot create HTTP client: {}", e))
                    .with_context(ErrorContext::new().with_source("builder"))
                    .with_cause(e)
            })?),
        };

        let config = ClientConfig::new(
            endpoints,
            SessionKey::for_sdk_pro(self.sdk_pro),
            self.sid,
            self.extra_params,
        );

        Ok(Wialon {
            config,
            transport,
            strict_content_type,
        })
    }
}

/// `WIALON_STRICT_CONTENT_TYPE=1` read through `lookup`.
fn strict_content_type_from(lookup: impl Fn(&str) -> Option<String>) -> bool {
    lookup("WIALON_STRICT_CONTENT_TYPE").as_deref().map(str::trim) == Some("1")
}

impl Default for WialonBuilder {
    fn default() -> Self {
        Self::new()
    }
}
