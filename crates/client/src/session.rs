//! Session manager: Basic-auth login, CSRF token cache and transparent
//! re-authentication on token expiry.
//!
//! The array issues an `EMC-CSRF-TOKEN` on login and expects it echoed on
//! every state-changing (POST/DELETE) request. When a token expires the
//! array answers 401; the session re-authenticates exactly once and
//! retries the original request exactly once. Concurrent callers that all
//! observe a 401 are funneled through a single login attempt.

use std::sync::{Mutex, MutexGuard, PoisonError};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};
use unisphere_domain::{Result, UnisphereError};

use crate::config::{ClientConfig, Credentials};
use crate::http::{classify_failure, Body, RestClient, HEADER_CSRF_TOKEN};
use crate::uri;

#[derive(Debug, Default)]
struct TokenState {
    token: String,
    /// Bumped on every successful login; lets a caller that hit a 401 tell
    /// whether another caller already refreshed the token.
    generation: u64,
}

/// Authenticated HTTP session over a [`RestClient`].
#[derive(Debug)]
pub struct Session {
    rest: RestClient,
    credentials: Credentials,
    state: Mutex<TokenState>,
    /// Single-flight gate: at most one login in flight per session.
    auth_gate: tokio::sync::Mutex<()>,
}

impl Session {
    pub fn new(config: &ClientConfig, credentials: Credentials) -> Result<Self> {
        Ok(Self {
            rest: RestClient::new(config)?,
            credentials,
            state: Mutex::new(TokenState::default()),
            auth_gate: tokio::sync::Mutex::new(()),
        })
    }

    /// The underlying transport, for requests outside the session contract.
    pub fn transport(&self) -> &RestClient {
        &self.rest
    }

    /// Currently cached CSRF token; empty before the first login.
    pub fn get_token(&self) -> String {
        self.lock_state().token.clone()
    }

    /// Replace the cached token, e.g. to share a session across client
    /// instances. `set_token(get_token())` is a no-op.
    pub fn set_token(&self, token: impl Into<String>) {
        let mut state = self.lock_state();
        state.token = token.into();
    }

    /// Log in with the stored credentials and cache the issued CSRF token.
    pub async fn authenticate(&self) -> Result<()> {
        let _gate = self.auth_gate.lock().await;
        self.login().await
    }

    /// End the session on the array and clear the cached token.
    pub async fn logout(&self) -> Result<()> {
        let body = serde_json::json!({ "localCleanupOnly": true });
        let _: serde_json::Value =
            self.execute(Method::POST, uri::LOGOUT, HeaderMap::new(), Some(Body::Json(body))).await?;
        let mut state = self.lock_state();
        state.token.clear();
        state.generation += 1;
        Ok(())
    }

    /// GET `path` and decode the JSON response.
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        self.execute(Method::GET, path, HeaderMap::new(), None).await
    }

    /// POST a JSON record to `path` and decode the response.
    pub async fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        self.execute(Method::POST, path, HeaderMap::new(), Some(Body::json(body)?)).await
    }

    /// DELETE `path`.
    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        self.execute(Method::DELETE, path, HeaderMap::new(), None).await
    }

    /// Dispatch a request under the session contract: default headers, the
    /// CSRF token on state-changing methods, and a single re-login plus
    /// retry when the array answers 401.
    pub async fn execute<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        headers: HeaderMap,
        body: Option<Body>,
    ) -> Result<R> {
        let (token, generation) = {
            let state = self.lock_state();
            (state.token.clone(), state.generation)
        };

        match self.dispatch(method.clone(), path, headers.clone(), body.clone(), &token).await {
            Err(UnisphereError::Api(api)) if api.http_status_code == 401 => {
                warn!(%method, path, "session rejected, re-authenticating");
                self.refresh_token(generation).await?;
                let token = self.get_token();
                self.dispatch(method, path, headers, body, &token).await
            }
            other => other,
        }
    }

    async fn dispatch<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        mut headers: HeaderMap,
        body: Option<Body>,
        token: &str,
    ) -> Result<R> {
        // CSRF policy: the token rides only on state-changing methods.
        if !token.is_empty() && (method == Method::POST || method == Method::DELETE) {
            let value = HeaderValue::from_str(token)
                .map_err(|e| UnisphereError::Internal(format!("invalid CSRF token: {e}")))?;
            headers.insert(HEADER_CSRF_TOKEN, value);
        }
        self.rest.send(method, path, headers, body).await
    }

    /// Re-login unless another caller already did since `observed_generation`
    /// was read. At most one login request is in flight per session.
    async fn refresh_token(&self, observed_generation: u64) -> Result<()> {
        let _gate = self.auth_gate.lock().await;
        if self.lock_state().generation != observed_generation {
            debug!("token already refreshed by a concurrent caller");
            return Ok(());
        }
        self.login().await
    }

    async fn login(&self) -> Result<()> {
        let basic =
            BASE64.encode(format!("{}:{}", self.credentials.username, self.credentials.password));
        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(&format!("Basic {basic}"))
            .map_err(|e| UnisphereError::Internal(format!("invalid credentials header: {e}")))?;
        headers.insert(AUTHORIZATION, value);

        let raw = self.rest.execute(Method::GET, uri::LOGIN, headers, None).await?;

        if raw.status.as_u16() == 401 {
            return Err(UnisphereError::Auth(format!(
                "the array rejected the credentials for user '{}'",
                self.credentials.username
            )));
        }
        if !raw.status.is_success() {
            return Err(classify_failure(raw.status, &raw.body));
        }

        let token = raw
            .headers
            .get(HEADER_CSRF_TOKEN)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let mut state = self.lock_state();
        state.token = token;
        state.generation += 1;
        info!(user = %self.credentials.username, "session established");
        Ok(())
    }

    fn lock_state(&self) -> MutexGuard<'_, TokenState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
