//! Request encoding: action name + arguments into the query sent to the service.

use super::config::ClientConfig;
use crate::{Error, ErrorContext, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Arguments of one action call.
///
/// `Named` is a single call's parameter object; `Batch` is an ordered list of
/// independent sub-calls the service executes one by one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Params {
    Named(Map<String, Value>),
    Batch(Vec<Value>),
}

impl Params {
    /// An empty parameter object, for actions that take no arguments.
    pub fn empty() -> Self {
        Params::Named(Map::new())
    }

    /// Named parameters from a JSON value. Only objects are accepted.
    pub fn named(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Params::Named(map)),
            other => Err(Error::usage(format!(
                "named parameters must be a JSON object, got {}",
                other
            ))),
        }
    }

    pub fn batch(items: impl IntoIterator<Item = Value>) -> Self {
        Params::Batch(items.into_iter().collect())
    }

    /// Choose from call-site arguments: keyword-only is a single call,
    /// positional-only is a batch. Both, or neither, is rejected.
    pub fn from_args(positional: Vec<Value>, keyword: Map<String, Value>) -> Result<Self> {
        match (positional.is_empty(), keyword.is_empty()) {
            (true, false) => Ok(Params::Named(keyword)),
            (false, true) => Ok(Params::Batch(positional)),
            (false, false) => Err(Error::usage(
                "positional and keyword arguments cannot be combined in one call",
            )),
            (true, true) => Err(Error::usage(
                "either positional (batch) or keyword arguments are required",
            )),
        }
    }

    pub fn is_batch(&self) -> bool {
        matches!(self, Params::Batch(_))
    }

    /// JSON text for the `params` query value. Non-ASCII text is kept literal.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            Error::usage(format!("cannot encode params: {}", e))
                .with_context(ErrorContext::new().with_source("request_encoder"))
                .with_cause(e)
        })
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Params::Named(map)
    }
}

impl From<Vec<Value>> for Params {
    fn from(items: Vec<Value>) -> Self {
        Params::Batch(items)
    }
}

/// Service path for an action: only the first `_` becomes `/`.
///
/// `core_login` → `core/login`, `unit_update_name` → `unit/update_name`.
pub fn service_path(action: &str) -> String {
    action.replacen('_', "/", 1)
}

/// One validated action call.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRequest {
    action: String,
    params: Params,
}

impl ActionRequest {
    pub fn new(action: impl Into<String>, params: Params) -> Result<Self> {
        let action = action.into();
        if action.trim().is_empty() {
            return Err(Error::usage("action name must not be empty")
                .with_context(ErrorContext::new().with_source("request_encoder")));
        }
        Ok(Self { action, params })
    }

    pub fn from_args(
        action: impl Into<String>,
        positional: Vec<Value>,
        keyword: Map<String, Value>,
    ) -> Result<Self> {
        let action = action.into();
        let params = Params::from_args(positional, keyword).map_err(|e| {
            e.with_context(
                ErrorContext::new()
                    .with_action(action.clone())
                    .with_source("request_encoder"),
            )
        })?;
        Self::new(action, params)
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn svc(&self) -> String {
        service_path(&self.action)
    }

    /// Build the query: default parameters first, then `svc`, `params` and the
    /// session key on top, so per-call keys win on collision.
    pub fn encode(&self, config: &ClientConfig) -> Result<EncodedQuery> {
        let mut query: BTreeMap<String, String> = (*config.extra_params()).clone();
        query.insert("svc".to_string(), self.svc());
        query.insert("params".to_string(), self.params.to_json()?);
        if let Some(sid) = config.sid() {
            query.insert(config.session_key().as_str().to_string(), sid);
        }
        Ok(EncodedQuery(query))
    }
}

/// Query parameters ready for the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedQuery(BTreeMap<String, String>);

impl EncodedQuery {
    /// Query for the event-polling endpoint: only the session key.
    pub fn session_only(config: &ClientConfig) -> Self {
        let mut query = BTreeMap::new();
        if let Some(sid) = config.sid() {
            query.insert(config.session_key().as_str().to_string(), sid);
        }
        EncodedQuery(query)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
