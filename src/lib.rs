//! # wialon
//!
//! Generic client for the Wialon Remote API.
//!
//! ## Overview
//!
//! Every remote operation is an *action* addressed by name (`core_login`,
//! `core_search_items`, `unit_update_name`, ...). The client translates the name
//! to a service path (`core/search_items`), sends the JSON-encoded parameters
//! together with the session id in one GET request, and classifies the reply
//! into a [`Response`] or a single structured [`Error`] with a numeric code.
//!
//! New actions need no client changes: [`Wialon::call`] and [`Wialon::invoke`]
//! accept any name.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use serde_json::json;
//! use wialon::{Params, Wialon};
//!
//! fn main() -> wialon::Result<()> {
//!     let wialon = Wialon::new()?;
//!
//!     // Login-style action: the returned `eid` becomes the session id.
//!     wialon.login("token_login", Params::named(json!({"token": "..."}))?)?;
//!
//!     let units = wialon.call(
//!         "core_search_items",
//!         Params::named(json!({
//!             "spec": {"itemsType": "avl_unit", "propName": "sys_name",
//!                      "propValueMask": "*", "sortType": "sys_name"},
//!             "force": 1, "flags": 1, "from": 0, "to": 0
//!         }))?,
//!     )?;
//!     println!("{:?}", units.get("items"));
//!
//!     let events = wialon.avl_evts()?;
//!     println!("{:?}", events);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client, builder, request encoding, response classification |
//! | [`transport`] | `Transport` trait and the blocking HTTP implementation |
//! | [`error_code`] | Service error code table |
//! | [`error`] | The unified error type |

pub mod client;
pub mod error_code;
pub mod transport;

pub use client::{
    service_path, ActionRequest, ClientConfig, EncodedQuery, Endpoints, Params, Response,
    SessionKey, Wialon, WialonBuilder,
};
pub use error_code::ServiceErrorCode;
pub use transport::{HttpSettings, HttpTransport, Transport, TransportError, TransportResponse};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext, ErrorKind};
