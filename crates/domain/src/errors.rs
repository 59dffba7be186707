//! Error types used throughout the client

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Service error code the array returns when an instance does not exist.
pub const ERROR_CODE_RESOURCE_NOT_FOUND: i64 = 0x7d13005;

/// Input validation failure, raised before any network I/O.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name is empty")]
    NameEmpty,

    #[error("name is {len} characters long, the maximum is {max}")]
    NameTooLong { len: usize, max: usize },

    #[error("name '{0}' must start with a letter and may only contain letters, digits, '_', '-' and ':'")]
    InvalidCharacters(String),

    #[error("invalid retention duration: {0}")]
    InvalidDuration(String),

    #[error("requested size {requested} is not larger than the current size {current}")]
    SizeNotLarger { current: u64, requested: u64 },

    #[error("{0} must not be empty")]
    MissingField(&'static str),

    #[error("per_page must be at least 1")]
    InvalidPageSize,
}

/// Main error type for Unisphere operations
#[derive(Error, Debug)]
pub enum UnisphereError {
    /// Input rejected before any request was issued.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Connection, TLS or I/O failure, surfaced verbatim.
    #[error("transport error: {0}")]
    Transport(String),

    /// The login endpoint rejected the credentials, or re-authentication
    /// failed.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Structured error envelope returned by the array.
    #[error("{0}")]
    Api(ApiError),

    /// Sentinel for a missing resource, derived from the array's
    /// resource-not-found error code.
    #[error("{kind} '{identifier}' was not found")]
    NotFound { kind: &'static str, identifier: String },

    /// The initiator already belongs to a different host.
    #[error("initiator '{initiator}' is already attached to host '{host_id}'")]
    InitiatorOwnedElsewhere { initiator: String, host_id: String },

    /// The array does not carry the license a request depends on.
    #[error("the array is not licensed for {0}")]
    UnlicensedFeature(&'static str),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl UnisphereError {
    /// True when the error is (or carries) a resource-not-found condition.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Api(api) => api.error_code == ERROR_CODE_RESOURCE_NOT_FOUND,
            _ => false,
        }
    }

    /// HTTP status carried by a structured service error, if any.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Api(api) => Some(api.http_status_code),
            _ => None,
        }
    }
}

/// Result type alias for Unisphere operations
pub type Result<T> = std::result::Result<T, UnisphereError>;

/// One localized message from the error envelope, keyed by locale tag
/// (for example `en-US`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedMessage(pub BTreeMap<String, String>);

impl LocalizedMessage {
    /// Message for a single locale.
    pub fn for_locale(locale: &str, text: impl Into<String>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(locale.to_string(), text.into());
        Self(map)
    }
}

/// Structured error body the array returns on non-2xx responses.
///
/// Wire shape:
/// `{"error": {"messages": [{"en-US": "..."}], "httpStatusCode": n, "errorCode": n}}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    #[serde(default)]
    pub messages: Vec<LocalizedMessage>,
    #[serde(default)]
    pub http_status_code: u16,
    #[serde(default)]
    pub error_code: i64,
}

impl ApiError {
    /// Envelope stand-in for responses without a decodable JSON body.
    pub fn from_status(status: u16, reason: &str) -> Self {
        Self {
            messages: vec![LocalizedMessage::for_locale("en-US", reason)],
            http_status_code: status,
            error_code: 0,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut texts = self
            .messages
            .iter()
            .flat_map(|m| m.0.values())
            .map(String::as_str)
            .peekable();
        if texts.peek().is_none() {
            write!(
                f,
                "HTTP {} (error code 0x{:x})",
                self.http_status_code, self.error_code
            )
        } else {
            let joined = texts.collect::<Vec<_>>().join("; ");
            write!(
                f,
                "{} (HTTP {}, error code 0x{:x})",
                joined, self.http_status_code, self.error_code
            )
        }
    }
}

/// Outer wrapper of the error body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ApiError,
}
