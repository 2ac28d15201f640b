//! Wialon service error codes.
//!
//! The remote service reports failures as `{"error": <code>}`. This module is the
//! closed table of codes the client knows a human-readable reason for.
//!
//! ## Code ranges
//!
//! | Range | Description                               |
//! |-------|-------------------------------------------|
//! | 1-9   | Session, service, input and auth failures |
//! | 1001+ | Conditions specific to individual actions |
//!
//! Code `0` is never sent by the service; the client reserves it for local
//! failures (transport, decoding, usage).
//!
//! ## Example
//!
//! ```rust
//! use wialon::error_code::ServiceErrorCode;
//!
//! let code = ServiceErrorCode::from_code(4).unwrap();
//! assert_eq!(code.reason(), "Invalid input");
//! assert!(ServiceErrorCode::from_code(42).is_none());
//! ```

use std::fmt;

/// Error code a Wialon server can return in an `error` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceErrorCode {
    /// 1: Session id missing, expired or unknown
    InvalidSession,
    /// 2: Service path does not exist
    InvalidService,
    /// 3: Result could not be produced
    InvalidResult,
    /// 4: Malformed or missing parameters
    InvalidInput,
    /// 5: Request failed on the server side
    RequestFailed,
    /// 6: Unclassified server failure
    Unknown,
    /// 7: Caller lacks rights for the item or action
    AccessDenied,
    /// 8: Bad credentials
    BadCredentials,
    /// 9: Authorization server is down
    AuthUnavailable,
    /// 1001: No messages in the requested interval
    NoMessageInInterval,
    /// 1002: Unique property collision
    DuplicateItem,
    /// 1003: Only one concurrent request of this kind is allowed
    RequestLimited,
}

impl ServiceErrorCode {
    pub const ALL: [ServiceErrorCode; 12] = [
        Self::InvalidSession,
        Self::InvalidService,
        Self::InvalidResult,
        Self::InvalidInput,
        Self::RequestFailed,
        Self::Unknown,
        Self::AccessDenied,
        Self::BadCredentials,
        Self::AuthUnavailable,
        Self::NoMessageInInterval,
        Self::DuplicateItem,
        Self::RequestLimited,
    ];

    /// Returns the numeric code as sent by the service.
    #[inline]
    pub fn code(&self) -> i64 {
        match self {
            Self::InvalidSession => 1,
            Self::InvalidService => 2,
            Self::InvalidResult => 3,
            Self::InvalidInput => 4,
            Self::RequestFailed => 5,
            Self::Unknown => 6,
            Self::AccessDenied => 7,
            Self::BadCredentials => 8,
            Self::AuthUnavailable => 9,
            Self::NoMessageInInterval => 1001,
            Self::DuplicateItem => 1002,
            Self::RequestLimited => 1003,
        }
    }

    /// Returns the short English reason for this code.
    #[inline]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::InvalidSession => "Invalid session",
            Self::InvalidService => "Invalid service",
            Self::InvalidResult => "Invalid result",
            Self::InvalidInput => "Invalid input",
            Self::RequestFailed => "Error performing request",
            Self::Unknown => "Unknown error",
            Self::AccessDenied => "Access denied",
            Self::BadCredentials => "Invalid user name or password",
            Self::AuthUnavailable => {
                "Authorization server is unavailable, please try again later"
            }
            Self::NoMessageInInterval => "No message for selected interval",
            Self::DuplicateItem => "Item with such unique property already exists",
            Self::RequestLimited => "Only one request of given time is allowed at the moment",
        }
    }

    /// Exact-match lookup. Codes outside the table return `None`.
    pub fn from_code(code: i64) -> Option<Self> {
        let known = match code {
            1 => Self::InvalidSession,
            2 => Self::InvalidService,
            3 => Self::InvalidResult,
            4 => Self::InvalidInput,
            5 => Self::RequestFailed,
            6 => Self::Unknown,
            7 => Self::AccessDenied,
            8 => Self::BadCredentials,
            9 => Self::AuthUnavailable,
            1001 => Self::NoMessageInInterval,
            1002 => Self::DuplicateItem,
            1003 => Self::RequestLimited,
            _ => return None,
        };
        Some(known)
    }
}

/// Reason for a raw code, if the code is in the table.
pub fn reason_for(code: i64) -> Option<&'static str> {
    ServiceErrorCode::from_code(code).map(|c| c.reason())
}

impl fmt::Display for ServiceErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.reason(), self.code())
    }
}
