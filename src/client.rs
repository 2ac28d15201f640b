//! Wialon client: configuration, request encoding, dispatch and response classification.
//!
//! Keep the public surface small and predictable. Implementation details are
//! split into submodules under `src/client/`.

pub mod actions;
pub mod builder;
pub mod config;
pub mod core;
pub mod endpoint;
pub mod request;
pub mod response;

#[cfg(test)]
pub(crate) mod fake;

pub use builder::WialonBuilder;
pub use config::{ClientConfig, SessionKey, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SCHEME};
pub use self::core::Wialon;
pub use endpoint::Endpoints;
pub use request::{service_path, ActionRequest, EncodedQuery, Params};
pub use response::{classify, classify_value, is_json_content_type, Response};
