use crate::error_code::{reason_for, ServiceErrorCode};
use thiserror::Error;

/// Structured error context for debugging: where the failure was produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Action the call was made for (e.g. "core_search_items")
    pub action: Option<String>,
    /// Additional details (e.g. the URL, HTTP status, content type)
    pub details: Option<String>,
    /// Component that raised the error (e.g. "transport", "response_classifier")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// What produced an [`Error`]. Informational only: callers branch on [`Error::code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Connection, timeout or HTTP-level failure before a usable body
    Transport,
    /// JSON body could not be decoded (or was not JSON in strict mode)
    Decode,
    /// Service answered `{"error": code}`
    Service,
    /// One or more sub-calls of a batch answered with an error
    Batch,
    /// The client was called with invalid arguments
    Usage,
    /// The client could not be constructed from the given settings
    Configuration,
}

/// The single error type of the client.
///
/// Every failure carries a numeric code: the service's code for
/// [`ErrorKind::Service`], `0` for everything raised locally (transport,
/// decoding, usage, and merged batch errors).
#[derive(Debug, Error)]
#[error("{}", render(.code, .text))]
pub struct Error {
    code: i64,
    text: String,
    kind: ErrorKind,
    context: ErrorContext,
    #[source]
    cause: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

// "<reason> <text> (<code>)" for known codes, "<text> (<code>)" otherwise.
fn render(code: &i64, text: &str) -> String {
    match reason_for(*code) {
        Some(reason) if text.is_empty() => format!("{} ({})", reason, code),
        Some(reason) => format!("{} {} ({})", reason, text, code),
        None => format!("{} ({})", text, code),
    }
}

impl Error {
    /// Create an error from a raw code and context text, as a caller would raise it.
    ///
    /// Codes `>= 1` are service codes ([`ErrorKind::Service`]). Code `0` and
    /// below are usage errors; local transport, decode and configuration
    /// failures have their own constructors ([`Error::transport`],
    /// [`Error::decode`], [`Error::configuration`]) so that their kind is right.
    pub fn new(code: i64, text: impl Into<String>) -> Self {
        let kind = if code >= 1 {
            ErrorKind::Service
        } else {
            ErrorKind::Usage
        };
        Self::with_kind(code, text, kind)
    }

    fn with_kind(code: i64, text: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            code,
            text: text.into(),
            kind,
            context: ErrorContext::new(),
            cause: None,
        }
    }

    /// Service reported `{"error": code}` for `action`.
    pub fn service(code: i64, action: impl Into<String>) -> Self {
        let action = action.into();
        Self::with_kind(code, action.clone(), ErrorKind::Service)
            .with_context(ErrorContext::new().with_action(action).with_source("response_classifier"))
    }

    /// Merged per-item errors of a batch response.
    pub fn batch(text: impl Into<String>) -> Self {
        Self::with_kind(0, text, ErrorKind::Batch)
    }

    pub fn transport(text: impl Into<String>) -> Self {
        Self::with_kind(0, text, ErrorKind::Transport)
    }

    /// Body could not be decoded. The text is prefixed with `Invalid response: `.
    pub fn decode(details: impl std::fmt::Display) -> Self {
        Self::with_kind(0, format!("Invalid response: {}", details), ErrorKind::Decode)
    }

    pub fn usage(text: impl Into<String>) -> Self {
        Self::with_kind(0, text, ErrorKind::Usage)
    }

    pub fn configuration(text: impl Into<String>) -> Self {
        Self::with_kind(0, text, ErrorKind::Configuration)
    }

    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_cause(
        mut self,
        cause: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Numeric code: the service's code, or `0` for local failures.
    pub fn code(&self) -> i64 {
        self.code
    }

    /// Context text (usually the action name, or a description of a local failure).
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn context(&self) -> &ErrorContext {
        &self.context
    }

    /// Human-readable reason when the code is in the service table.
    pub fn reason(&self) -> Option<&'static str> {
        reason_for(self.code)
    }

    pub fn service_code(&self) -> Option<ServiceErrorCode> {
        ServiceErrorCode::from_code(self.code)
    }

    /// `true` for failures raised by the client itself (code `0`).
    pub fn is_local(&self) -> bool {
        self.code == 0
    }
}
