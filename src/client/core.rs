use crate::client::config::ClientConfig;
use crate::client::request::{ActionRequest, EncodedQuery, Params};
use crate::client::response::{classify, Response};
use crate::transport::Transport;
use crate::{Error, ErrorContext, Result};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};
use url::Url;
use uuid::Uuid;

const EVENTS_ACTION: &str = "avl_evts";

/// Wialon Remote API client.
///
/// Every remote action goes through [`Wialon::invoke`] / [`Wialon::call`]: the
/// action name is translated to a service path, the arguments are JSON-encoded
/// and the response is classified into a [`Response`] or an [`Error`]. Calls
/// block until their single round trip completes.
pub struct Wialon {
    pub(crate) config: ClientConfig,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) strict_content_type: bool,
}

impl Wialon {
    /// Client for the hosted service with default settings and no session.
    pub fn new() -> Result<Self> {
        crate::client::builder::WialonBuilder::new().build()
    }

    pub fn builder() -> crate::client::builder::WialonBuilder {
        crate::client::builder::WialonBuilder::new()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn sid(&self) -> Option<String> {
        self.config.sid()
    }

    /// Replace the session id. Only calls started afterwards use it.
    pub fn set_sid(&self, sid: impl Into<String>) {
        self.config.set_sid(Some(sid.into()));
    }

    pub fn clear_sid(&self) {
        self.config.set_sid(None);
    }

    /// Add or overwrite default query parameters sent with every generic call.
    pub fn update_extra_params<I, K, V>(&self, params: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.config.update_extra_params(params);
    }

    /// Call any action by name with call-site style arguments.
    ///
    /// Keyword arguments form one parameter object; positional arguments form
    /// a batch (a JSON array of sub-calls). Exactly one of them must be
    /// non-empty.
    pub fn invoke(
        &self,
        action: &str,
        positional: Vec<Value>,
        keyword: Map<String, Value>,
    ) -> Result<Response> {
        let request = ActionRequest::from_args(action, positional, keyword)?;
        self.execute(&request)
    }

    /// Call any action by name with typed parameters.
    pub fn call(&self, action: &str, params: impl Into<Params>) -> Result<Response> {
        let request = ActionRequest::new(action, params.into())?;
        self.execute(&request)
    }

    pub fn execute(&self, request: &ActionRequest) -> Result<Response> {
        let query = request.encode(&self.config)?;
        self.request(request.action(), self.config.endpoints().api(), &query)
    }

    /// Poll the event endpoint. Only the session key is sent.
    pub fn avl_evts(&self) -> Result<Response> {
        let query = EncodedQuery::session_only(&self.config);
        self.request(EVENTS_ACTION, self.config.endpoints().events(), &query)
    }

    fn request(&self, action: &str, url: &Url, query: &EncodedQuery) -> Result<Response> {
        let request_id = Uuid::new_v4().to_string();
        let start = Instant::now();
        debug!(
            action,
            svc = query.get("svc").unwrap_or(""),
            url = url.as_str(),
            request_id = request_id.as_str(),
            "wialon request"
        );

        let outcome = self
            .transport
            .get(url, query.as_map())
            .map_err(|e| {
                Error::transport(e.to_string())
                    .with_context(
                        ErrorContext::new()
                            .with_action(action)
                            .with_details(url.to_string())
                            .with_source("transport"),
                    )
                    .with_cause(e)
            })
            .and_then(|response| classify(action, response, self.strict_content_type));

        match &outcome {
            Ok(_) => debug!(
                action,
                request_id = request_id.as_str(),
                duration_ms = start.elapsed().as_millis() as u64,
                "wialon request succeeded"
            ),
            Err(e) => info!(
                action,
                code = e.code(),
                kind = ?e.kind(),
                request_id = request_id.as_str(),
                duration_ms = start.elapsed().as_millis() as u64,
                "wialon request failed"
            ),
        }
        outcome
    }
}

impl std::fmt::Debug for Wialon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wialon")
            .field("config", &self.config)
            .field("strict_content_type", &self.strict_content_type)
            .finish_non_exhaustive()
    }
}
