//! Transport layer: the "do a GET, hand back status + body" capability.
//!
//! The client only depends on the [`Transport`] trait. [`HttpTransport`] is the
//! default implementation on top of a blocking `reqwest` client; tests and
//! embedders can plug in their own.

mod http;

pub use http::{HttpSettings, HttpTransport};

use std::collections::BTreeMap;
use url::Url;

/// Raw outcome of a GET that reached the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    /// Value of the `Content-Type` header, if any.
    pub content_type: Option<String>,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, content_type: Option<&str>, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: content_type.map(str::to_string),
            body: body.into(),
        }
    }

    /// JSON 200 response, handy for fakes.
    pub fn json(body: impl Into<String>) -> Self {
        Self::new(200, Some("application/json"), body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking GET capability used by the client for every round trip.
pub trait Transport: Send + Sync {
    fn get(
        &self,
        url: &Url,
        query: &BTreeMap<String, String>,
    ) -> Result<TransportResponse, TransportError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
