//! Endpoint resolution: root, API and event-polling URLs.

use super::config::DEFAULT_HOST;
use crate::{Error, ErrorContext, Result};
use url::Url;

const HOSTED_API_PATH: &str = "wialon/ajax.html";
const API_PATH: &str = "ajax.html";
const EVENTS_PATH: &str = "avl_evts";

/// URLs derived once from scheme, host and port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    root: Url,
    api: Url,
    events: Url,
}

impl Endpoints {
    /// The API path branch compares `host` exactly as given, before the URL
    /// parser normalizes it: only the literal hosted name gets `/wialon/ajax.html`.
    pub fn new(scheme: &str, host: &str, port: u16) -> Result<Self> {
        let raw = format!("{}://{}:{}", scheme, host, port);
        let root = Url::parse(&raw).map_err(|e| invalid_url(&raw, e))?;
        Self::resolve(root, host == DEFAULT_HOST)
    }

    /// Resolve from an already parsed root URL, branching on its normalized host.
    ///
    /// Paths are joined relative to the root, so a root with a trailing slash
    /// (`http://host/sub/`) keeps its path prefix and one without it does not.
    pub fn from_root(root: Url) -> Result<Self> {
        let hosted = match root.host_str() {
            Some(host) => host == DEFAULT_HOST,
            None => {
                return Err(Error::configuration(format!("URL has no host: {}", root))
                    .with_context(ErrorContext::new().with_source("endpoint_resolver")))
            }
        };
        Self::resolve(root, hosted)
    }

    fn resolve(root: Url, hosted: bool) -> Result<Self> {
        // The hosted service serves the API one level deeper than self-hosted installs.
        let api_path = if hosted { HOSTED_API_PATH } else { API_PATH };

        let api = root.join(api_path).map_err(|e| invalid_url(api_path, e))?;
        let events = root.join(EVENTS_PATH).map_err(|e| invalid_url(EVENTS_PATH, e))?;

        Ok(Self { root, api, events })
    }

    /// `scheme://host:port`
    pub fn root(&self) -> &Url {
        &self.root
    }

    /// Endpoint for every generic action call.
    pub fn api(&self) -> &Url {
        &self.api
    }

    /// Dedicated event-polling endpoint.
    pub fn events(&self) -> &Url {
        &self.events
    }
}

fn invalid_url(raw: &str, err: url::ParseError) -> Error {
    Error::configuration(format!("Invalid URL {}: {}", raw, err))
        .with_context(ErrorContext::new().with_source("endpoint_resolver"))
        .with_cause(err)
}
