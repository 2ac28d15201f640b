//! Response classification: raw transport response to success payload or [`Error`].

use crate::error_code::reason_for;
use crate::transport::TransportResponse;
use crate::{Error, ErrorContext, Result};
use serde_json::{Map, Value};
use tracing::warn;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Successful outcome of an action call.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// A JSON object without an `error` key
    Object(Map<String, Value>),
    /// A JSON array (batch results) without per-item errors
    List(Vec<Value>),
    /// Any other JSON value (number, string, bool, null)
    Scalar(Value),
    /// The body was not declared as JSON and was left undecoded
    Undecoded {
        content_type: Option<String>,
        body: String,
    },
}

impl Response {
    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        match self {
            Response::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Response::List(items) => Some(items),
            _ => None,
        }
    }

    /// Field of an object response.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    pub fn is_undecoded(&self) -> bool {
        matches!(self, Response::Undecoded { .. })
    }

    /// The decoded JSON value; `None` for undecoded bodies.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Response::Object(map) => Some(Value::Object(map)),
            Response::List(items) => Some(Value::Array(items)),
            Response::Scalar(value) => Some(value),
            Response::Undecoded { .. } => None,
        }
    }
}

/// `true` when the media type essence is `application/json` (parameters such
/// as `charset` are ignored).
pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|ct| ct.split(';').next())
        .map(|essence| essence.trim().eq_ignore_ascii_case(JSON_CONTENT_TYPE))
        .unwrap_or(false)
}

/// Classify a transport response for `action`.
///
/// With `strict_content_type` a non-JSON body is a decode error; otherwise it
/// is returned as [`Response::Undecoded`].
pub fn classify(
    action: &str,
    response: TransportResponse,
    strict_content_type: bool,
) -> Result<Response> {
    let is_json = is_json_content_type(response.content_type.as_deref());

    // A JSON body is classified by shape whatever the status; the service may
    // answer `{"error": n}` with a 4xx/5xx.
    if !response.is_success() && !is_json {
        return Err(Error::transport(format!("HTTP {}", response.status)).with_context(
            ErrorContext::new()
                .with_action(action)
                .with_details(format!("status: {}", response.status))
                .with_source("response_classifier"),
        ));
    }

    if !is_json {
        let shown = response.content_type.as_deref().unwrap_or("<none>");
        if strict_content_type {
            return Err(Error::decode(format!("unexpected content type {}", shown))
                .with_context(
                    ErrorContext::new()
                        .with_action(action)
                        .with_details(format!("content_type: {}", shown))
                        .with_source("response_classifier"),
                ));
        }
        warn!(
            action,
            content_type = shown,
            bytes = response.body.len(),
            "non-JSON response left undecoded"
        );
        return Ok(Response::Undecoded {
            content_type: response.content_type,
            body: response.body,
        });
    }

    let value: Value = serde_json::from_str(&response.body).map_err(|e| {
        Error::decode(&e)
            .with_context(
                ErrorContext::new()
                    .with_action(action)
                    .with_source("response_classifier"),
            )
            .with_cause(e)
    })?;

    classify_value(action, value)
}

/// Classify an already decoded body by shape.
///
/// - object with `error` → service error with that code
/// - array → per-item errors are merged into one error with code `0`
/// - anything else → success, unmodified
pub fn classify_value(action: &str, value: Value) -> Result<Response> {
    match value {
        Value::Object(map) => match map.get("error") {
            Some(raw) => match error_code(raw) {
                Some(code) => Err(Error::service(code, action)),
                None => Err(Error::decode(format!(
                    "unrecognised error value {} for {}",
                    raw, action
                ))
                .with_context(
                    ErrorContext::new()
                        .with_action(action)
                        .with_source("response_classifier"),
                )),
            },
            None => Ok(Response::Object(map)),
        },
        Value::Array(items) => {
            let mut errors: Vec<String> = items
                .iter()
                .filter_map(|item| item.as_object()?.get("error"))
                .map(describe_item_error)
                .collect();
            if errors.is_empty() {
                return Ok(Response::List(items));
            }
            let failed = errors.len();
            errors.push(action.to_string());
            Err(Error::batch(errors.join(" ")).with_context(
                ErrorContext::new()
                    .with_action(action)
                    .with_details(format!("{} of {} items failed", failed, items.len()))
                    .with_source("response_classifier"),
            ))
        }
        other => Ok(Response::Scalar(other)),
    }
}

fn error_code(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// "<reason> (<code>)", or "(<code>)" when the code is not in the table.
fn describe_item_error(raw: &Value) -> String {
    match error_code(raw) {
        Some(code) => match reason_for(code) {
            Some(reason) => format!("{} ({})", reason, code),
            None => format!("({})", code),
        },
        None => format!("({})", raw),
    }
}
