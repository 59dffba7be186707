//! Transport layer: reqwest construction, header policy, body defaults,
//! structured error extraction and optional wire tracing.

mod trace;
mod transport;

pub use transport::{Body, RawResponse, RestClient};

pub(crate) use transport::classify_failure;

/// Opts the client out of the service's browser CSRF flow. Required on
/// every request.
pub const HEADER_EMC_REST_CLIENT: &str = "X-EMC-REST-CLIENT";
/// CSRF token header, echoed on state-changing requests after login.
pub const HEADER_CSRF_TOKEN: &str = "EMC-CSRF-TOKEN";

pub(crate) const CONTENT_TYPE_JSON: &str = "application/json";
pub(crate) const CONTENT_TYPE_OCTET: &str = "binary/octet-stream";
