//! Typed shortcuts for frequently used actions.
//!
//! These only forward to [`Wialon::call`]; any other action works the same way
//! through [`Wialon::call`] or [`Wialon::invoke`] without adding code here.

use super::core::Wialon;
use super::request::Params;
use super::response::Response;
use crate::Result;
use serde_json::Value;
use tracing::info;

macro_rules! actions {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        impl Wialon {
            $(
                $(#[$meta])*
                pub fn $name(&self, params: impl Into<Params>) -> Result<Response> {
                    self.call(stringify!($name), params)
                }
            )*
        }

        /// Names of the actions that have a typed shortcut.
        pub const KNOWN_ACTIONS: &[&str] = &[$(stringify!($name)),*];
    };
}

actions! {
    /// `core/login`: user name + password login (returns `eid`).
    core_login,
    /// `core/logout`
    core_logout,
    /// `token/login`: token login (returns `eid`).
    token_login,
    /// `core/search_items`
    core_search_items,
    /// `core/search_item`
    core_search_item,
    /// `core/update_data_flags`
    core_update_data_flags,
    /// `core/batch`: several sub-calls in one request.
    core_batch,
    /// `unit/update_name`
    unit_update_name,
    /// `messages/load_interval`
    messages_load_interval,
    /// `report/exec_report`
    report_exec_report,
}

impl Wialon {
    /// Run a login-style action and adopt the returned `eid` as session id.
    ///
    /// The response is returned unchanged; the session stays as it was when
    /// the response has no string `eid`.
    pub fn login(&self, action: &str, params: impl Into<Params>) -> Result<Response> {
        let response = self.call(action, params)?;
        if let Some(eid) = response.get("eid").and_then(Value::as_str) {
            self.set_sid(eid);
            info!(action, "wialon session established");
        }
        Ok(response)
    }
}
