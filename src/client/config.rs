//! Client configuration: connection endpoints, session id, default query parameters.

use super::endpoint::Endpoints;
use arc_swap::{ArcSwap, ArcSwapOption};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

pub const DEFAULT_SCHEME: &str = "http";
pub const DEFAULT_HOST: &str = "hst-api.wialon.com";
pub const DEFAULT_PORT: u16 = 80;

/// Name of the query parameter that carries the session id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionKey {
    /// `sid`, used by the hosted service and standard installations
    #[default]
    Sid,
    /// `ssid`, used by SDK Pro installations
    Ssid,
}

impl SessionKey {
    pub fn for_sdk_pro(sdk_pro: bool) -> Self {
        if sdk_pro {
            Self::Ssid
        } else {
            Self::Sid
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sid => "sid",
            Self::Ssid => "ssid",
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-client configuration.
///
/// The session key and endpoints are fixed at construction. The session id and
/// the extra default parameters are swapped atomically, so they can be updated
/// through `&self` while other calls are in flight; each call works on the
/// snapshot it took when encoding its query.
pub struct ClientConfig {
    endpoints: Endpoints,
    session_key: SessionKey,
    sid: ArcSwapOption<String>,
    extra_params: ArcSwap<BTreeMap<String, String>>,
}

impl ClientConfig {
    pub fn new(
        endpoints: Endpoints,
        session_key: SessionKey,
        sid: Option<String>,
        extra_params: BTreeMap<String, String>,
    ) -> Self {
        Self {
            endpoints,
            session_key,
            sid: ArcSwapOption::new(sid.map(Arc::new)),
            extra_params: ArcSwap::from_pointee(extra_params),
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn session_key(&self) -> SessionKey {
        self.session_key
    }

    pub fn sid(&self) -> Option<String> {
        self.sid.load_full().map(|sid| (*sid).clone())
    }

    pub fn set_sid(&self, sid: Option<String>) {
        self.sid.store(sid.map(Arc::new));
    }

    /// Snapshot of the default parameters sent with every generic call.
    pub fn extra_params(&self) -> Arc<BTreeMap<String, String>> {
        self.extra_params.load_full()
    }

    /// Add or overwrite default parameters. Keys not mentioned are kept.
    pub fn update_extra_params<I, K, V>(&self, params: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let updates: Vec<(String, String)> = params
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.extra_params.rcu(|current| {
            let mut next = (**current).clone();
            next.extend(updates.iter().cloned());
            next
        });
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoints", &self.endpoints)
            .field("session_key", &self.session_key)
            .field("sid", &self.sid.load().is_some().then_some("<redacted>"))
            .field("extra_params", &self.extra_params.load_full())
            .finish()
    }
}
