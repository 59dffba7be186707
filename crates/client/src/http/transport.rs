//! HTTP transport over reqwest.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client as ReqwestClient, Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use unisphere_domain::{ApiError, ErrorEnvelope, Result, UnisphereError};

use super::{trace, CONTENT_TYPE_JSON, CONTENT_TYPE_OCTET, HEADER_EMC_REST_CLIENT};
use crate::config::ClientConfig;
use crate::uri;

/// Request body variants.
///
/// Bodies are buffered so the bounded 401 retry can resend them.
#[derive(Debug, Clone)]
pub enum Body {
    /// JSON-encoded record; defaults Content-Type to `application/json`.
    Json(serde_json::Value),
    /// Raw octet body; defaults Content-Type to `binary/octet-stream` and
    /// is never written to the trace log.
    Octet(Vec<u8>),
}

impl Body {
    /// JSON body from any serializable record.
    pub fn json<T: serde::Serialize>(value: &T) -> Result<Self> {
        let value = serde_json::to_value(value)
            .map_err(|e| UnisphereError::Internal(format!("failed to serialize body: {e}")))?;
        Ok(Self::Json(value))
    }
}

/// Undecoded response, exposed for the session layer which reads the CSRF
/// token out of the login response headers.
#[derive(Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

/// HTTP client owning the connection pool, cookie jar and TLS settings.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: ReqwestClient,
    base_url: String,
    trace_http: bool,
}

impl RestClient {
    /// Build the transport from the immutable client configuration.
    ///
    /// A cookie jar is always attached so server-set session cookies
    /// survive across requests.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        if config.endpoint.trim().is_empty() {
            return Err(UnisphereError::Config("endpoint must not be empty".into()));
        }

        let mut builder = ReqwestClient::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .use_rustls_tls();

        if config.insecure {
            builder = builder.danger_accept_invalid_certs(true);
        }
        if config.use_system_certs {
            builder = builder.tls_built_in_webpki_certs(false).tls_built_in_native_certs(true);
        }

        let http = builder
            .build()
            .map_err(|e| UnisphereError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, base_url: config.endpoint.clone(), trace_http: config.trace_http })
    }

    /// Send a request and decode a 2xx JSON body into `R`; non-2xx
    /// responses become structured errors and never touch `R`.
    pub async fn send<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        headers: HeaderMap,
        body: Option<Body>,
    ) -> Result<R> {
        let raw = self.execute(method, path, headers, body).await?;
        if raw.status.is_success() {
            decode_success(&raw.body)
        } else {
            Err(classify_failure(raw.status, &raw.body))
        }
    }

    /// Send a request and hand back the undecoded response.
    pub(crate) async fn execute(
        &self,
        method: Method,
        path: &str,
        headers: HeaderMap,
        body: Option<Body>,
    ) -> Result<RawResponse> {
        let url = uri::join_url(&self.base_url, path);
        let headers = apply_header_defaults(headers, body.as_ref())?;

        if self.trace_http {
            trace::trace_request(&method, &url, &headers, body.as_ref());
        }
        debug!(%method, %url, "sending request");

        let mut request = self.http.request(method.clone(), &url).headers(headers);
        request = match body {
            Some(Body::Json(value)) => request.body(
                serde_json::to_vec(&value)
                    .map_err(|e| UnisphereError::Internal(format!("failed to encode body: {e}")))?,
            ),
            Some(Body::Octet(bytes)) => request.body(bytes),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| UnisphereError::Transport(format!("{method} {url}: {e}")))?;

        let status = response.status();
        let response_headers = response.headers().clone();
        let text = response
            .text()
            .await
            .map_err(|e| UnisphereError::Transport(format!("{method} {url}: {e}")))?;

        if self.trace_http {
            trace::trace_response(status, &response_headers, &text);
        }
        debug!(%status, "received response");

        Ok(RawResponse { status, headers: response_headers, body: text })
    }
}

/// Default headers: the mandatory REST-client opt-out, JSON accept, and a
/// Content-Type matching the body kind. Caller-provided values always win.
fn apply_header_defaults(mut headers: HeaderMap, body: Option<&Body>) -> Result<HeaderMap> {
    if !headers.contains_key(HEADER_EMC_REST_CLIENT) {
        headers.insert(HEADER_EMC_REST_CLIENT, HeaderValue::from_static("true"));
    }
    if !headers.contains_key(ACCEPT) {
        headers.insert(ACCEPT, HeaderValue::from_static(CONTENT_TYPE_JSON));
    }
    if !headers.contains_key(CONTENT_TYPE) {
        match body {
            Some(Body::Json(_)) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
            }
            Some(Body::Octet(_)) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_OCTET));
            }
            None => {}
        }
    }
    Ok(headers)
}

/// Decode a success body. An empty body is not an error; it decodes as
/// JSON null (covers 204 and header-only responses).
pub(crate) fn decode_success<R: DeserializeOwned>(body: &str) -> Result<R> {
    if body.trim().is_empty() {
        serde_json::from_value(serde_json::Value::Null)
            .map_err(|e| UnisphereError::Internal(format!("empty response body: {e}")))
    } else {
        serde_json::from_str(body)
            .map_err(|e| UnisphereError::Internal(format!("failed to parse response: {e}")))
    }
}

/// Turn a non-2xx response into a structured error. Responses without a
/// decodable envelope get one synthesized from the status line.
pub(crate) fn classify_failure(status: StatusCode, body: &str) -> UnisphereError {
    let mut api = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error)
        .unwrap_or_else(|_| {
            ApiError::from_status(status.as_u16(), status.canonical_reason().unwrap_or("unknown"))
        });
    // Some firmware builds omit httpStatusCode from the envelope; backfill
    // it from the wire status so callers can still branch on it.
    if api.http_status_code == 0 {
        api.http_status_code = status.as_u16();
    }
    UnisphereError::Api(api)
}
