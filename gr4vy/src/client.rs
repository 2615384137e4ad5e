//! Reqwest-backed HTTP client for the Gr4vy tokenization API.
//!
//! Provides [`Gr4vy`], constructed from a [`Gr4vyConfig`], which implements
//! [`TokenizationApi`] by submitting checkout-session requests to the
//! hosted service. Transport failures are mapped into the typed
//! [`Gr4vyError`] variants; the message text of network failures keeps the
//! host-resolution and timeout phrasing that display layers match on.

use std::sync::Arc;
use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;
use url::Url;

use crate::api::TokenizationApi;
use crate::error::Gr4vyError;
use crate::models::{CheckoutSessionRequest, TokenizeResponse};
use crate::server::Gr4vyServer;
use crate::threeds::{
    AuthenticatedTokenizeResult, AuthenticationOptions, AuthenticationResult, ChallengeHost,
    ChallengeRequest,
};

static GR4VY_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Za-z0-9-]+$").expect("valid pattern"));

/// Configuration for a [`Gr4vy`] client.
pub struct Gr4vyConfig {
    /// Gr4vy merchant identifier.
    pub gr4vy_id: String,

    /// API bearer token.
    pub token: String,

    /// Target environment.
    pub server: Gr4vyServer,

    /// Optional request timeout. `None` uses reqwest's default.
    pub timeout: Option<Duration>,

    /// Emit debug-level request logging.
    pub debug: bool,

    /// Host for the interactive 3-D Secure challenge. Without one, a
    /// server-indicated challenge fails with [`Gr4vyError::UiContext`].
    pub challenge_host: Option<Arc<dyn ChallengeHost>>,

    /// Base URL override. Intended for tests against a local mock server;
    /// `None` derives the URL from `server` and `gr4vy_id`.
    pub base_url: Option<String>,
}

impl Gr4vyConfig {
    /// Creates a config for the given merchant id and token.
    #[must_use]
    pub fn new(gr4vy_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            gr4vy_id: gr4vy_id.into(),
            token: token.into(),
            server: Gr4vyServer::Sandbox,
            timeout: None,
            debug: false,
            challenge_host: None,
            base_url: None,
        }
    }

    /// Sets the target environment.
    #[must_use]
    pub fn with_server(mut self, server: Gr4vyServer) -> Self {
        self.server = server;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Enables debug-level request logging.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Attaches a challenge host for interactive 3-D Secure flows.
    #[must_use]
    pub fn with_challenge_host(mut self, host: Arc<dyn ChallengeHost>) -> Self {
        self.challenge_host = Some(host);
        self
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

impl std::fmt::Debug for Gr4vyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gr4vyConfig")
            .field("gr4vy_id", &self.gr4vy_id)
            .field("server", &self.server)
            .field("timeout", &self.timeout)
            .field("debug", &self.debug)
            .field("has_challenge_host", &self.challenge_host.is_some())
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Async HTTP client for the Gr4vy tokenization API.
///
/// # Example
///
/// ```no_run
/// use gr4vy::client::{Gr4vy, Gr4vyConfig};
/// use gr4vy::server::Gr4vyServer;
///
/// let client = Gr4vy::new(
///     Gr4vyConfig::new("acme", "secret-token").with_server(Gr4vyServer::Sandbox),
/// )?;
/// # Ok::<(), gr4vy::Gr4vyError>(())
/// ```
pub struct Gr4vy {
    gr4vy_id: String,
    token: String,
    base_url: String,
    host: String,
    debug: bool,
    challenge_host: Option<Arc<dyn ChallengeHost>>,
    client: reqwest::Client,
}

impl Gr4vy {
    /// Creates a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Gr4vyError::InvalidGr4vyId`] when the merchant id is empty
    /// or contains characters outside `[A-Za-z0-9-]`, [`Gr4vyError::BadUrl`]
    /// when the derived API base URL does not parse, and
    /// [`Gr4vyError::Network`] when the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: Gr4vyConfig) -> Result<Self, Gr4vyError> {
        let gr4vy_id = config.gr4vy_id.trim().to_owned();
        if !GR4VY_ID_PATTERN.is_match(&gr4vy_id) {
            return Err(Gr4vyError::InvalidGr4vyId(format!(
                "\"{}\" is not a valid Gr4vy ID",
                config.gr4vy_id
            )));
        }

        let base_url = config
            .base_url
            .map_or_else(
                || format!("https://{}", config.server.api_host(&gr4vy_id)),
                |url| url.trim_end_matches('/').to_owned(),
            );
        let parsed = Url::parse(&base_url).map_err(|_| Gr4vyError::BadUrl {
            url: base_url.clone(),
        })?;
        let host = parsed.host_str().unwrap_or_default().to_owned();

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| Gr4vyError::Network {
            message: format!("failed to build HTTP client: {e}"),
        })?;

        Ok(Self {
            gr4vy_id,
            token: config.token.trim().to_owned(),
            base_url,
            host,
            debug: config.debug,
            challenge_host: config.challenge_host,
            client,
        })
    }

    /// Returns the merchant id the client was built with.
    #[must_use]
    pub fn gr4vy_id(&self) -> &str {
        &self.gr4vy_id
    }

    /// Returns the API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the tokenize endpoint URL. The session id is appended as a
    /// single path segment, so reserved characters are percent-encoded
    /// rather than reinterpreted as path or query structure.
    fn fields_url(&self, session_id: &str) -> Result<Url, Gr4vyError> {
        let mut url = Url::parse(&self.base_url).map_err(|_| Gr4vyError::BadUrl {
            url: self.base_url.clone(),
        })?;
        url.path_segments_mut()
            .map_err(|()| Gr4vyError::BadUrl {
                url: self.base_url.clone(),
            })?
            .pop_if_empty()
            .extend(["checkout", "sessions", session_id.trim(), "fields"]);
        Ok(url)
    }

    /// Maps a reqwest transport error into the typed taxonomy.
    ///
    /// The produced message text is a contract: the display layer matches
    /// on "timeout" and "Unable to resolve host" phrasing.
    fn map_transport_error(&self, error: &reqwest::Error) -> Gr4vyError {
        if error.is_timeout() {
            return Gr4vyError::Network {
                message: format!("request timeout: {error}"),
            };
        }
        if error.is_connect() && is_dns_failure(error) {
            return Gr4vyError::Network {
                message: format!("Unable to resolve host {}", self.host),
            };
        }
        if error.is_decode() {
            return Gr4vyError::Decoding(error.to_string());
        }
        Gr4vyError::Network {
            message: error.to_string(),
        }
    }

    async fn tokenize_http(
        &self,
        session_id: &str,
        request: &CheckoutSessionRequest,
    ) -> Result<TokenizeResponse, Gr4vyError> {
        let url = self.fields_url(session_id)?;
        if self.debug {
            tracing::debug!(%url, "tokenize request");
        }

        let response = self
            .client
            .put(url)
            .bearer_auth(&self.token)
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Gr4vyError::Http {
                status: status.as_u16(),
                message: status.canonical_reason().map(str::to_owned),
                response_body: if body.is_empty() { None } else { Some(body) },
            });
        }

        let raw_response = response
            .text()
            .await
            .map_err(|e| Gr4vyError::Decoding(e.to_string()))?;
        Ok(TokenizeResponse { raw_response })
    }

    /// Derives the authentication sub-result from a tokenize response body,
    /// delegating a server-indicated challenge to the attached host.
    async fn authenticate(
        &self,
        raw_response: &str,
        options: &AuthenticationOptions,
    ) -> Result<AuthenticationResult, Gr4vyError> {
        let body: Value = if raw_response.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(raw_response).map_err(|e| {
                Gr4vyError::Decoding(format!("tokenize response is not valid JSON: {e}"))
            })?
        };

        match body.get("challenge") {
            Some(parameters) if !parameters.is_null() => {
                let host = self.challenge_host.as_ref().ok_or_else(|| {
                    Gr4vyError::UiContext(
                        "no challenge host is attached to this client".to_owned(),
                    )
                })?;
                host.run_challenge(ChallengeRequest {
                    parameters,
                    timeout_minutes: options.timeout_minutes,
                    theme: options.theme.as_ref(),
                })
                .await
            }
            _ => Ok(AuthenticationResult {
                transaction_status: body
                    .get("transaction_status")
                    .and_then(Value::as_str)
                    .map(str::to_owned),
                attempted: false,
                has_timed_out: false,
                has_cancelled: false,
                kind: Some(
                    body.get("authentication_type")
                        .and_then(Value::as_str)
                        .unwrap_or("frictionless")
                        .to_owned(),
                ),
            }),
        }
    }

    /// Tokenizes the payment method attached to the checkout session.
    ///
    /// # Errors
    ///
    /// See [`TokenizationApi::tokenize`].
    pub async fn tokenize(
        &self,
        session_id: &str,
        request: &CheckoutSessionRequest,
    ) -> Result<TokenizeResponse, Gr4vyError> {
        self.tokenize_http(session_id, request).await
    }

    /// Tokenizes and then runs the 3-D Secure authentication sub-flow.
    ///
    /// # Errors
    ///
    /// See [`TokenizationApi::tokenize_with_authentication`].
    pub async fn tokenize_with_authentication(
        &self,
        session_id: &str,
        request: &CheckoutSessionRequest,
        options: &AuthenticationOptions,
    ) -> Result<AuthenticatedTokenizeResult, Gr4vyError> {
        let response = self.tokenize_http(session_id, request).await?;
        if !options.authenticate {
            return Ok(AuthenticatedTokenizeResult {
                tokenized: true,
                authentication: None,
            });
        }

        let authentication = self.authenticate(&response.raw_response, options).await?;
        Ok(AuthenticatedTokenizeResult {
            tokenized: true,
            authentication: Some(authentication),
        })
    }
}

impl std::fmt::Debug for Gr4vy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gr4vy")
            .field("gr4vy_id", &self.gr4vy_id)
            .field("base_url", &self.base_url)
            .field("debug", &self.debug)
            .field("has_challenge_host", &self.challenge_host.is_some())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TokenizationApi for Gr4vy {
    async fn tokenize(
        &self,
        session_id: &str,
        request: &CheckoutSessionRequest,
    ) -> Result<TokenizeResponse, Gr4vyError> {
        Self::tokenize(self, session_id, request).await
    }

    async fn tokenize_with_authentication(
        &self,
        session_id: &str,
        request: &CheckoutSessionRequest,
        options: &AuthenticationOptions,
    ) -> Result<AuthenticatedTokenizeResult, Gr4vyError> {
        Self::tokenize_with_authentication(self, session_id, request, options).await
    }
}

/// Walks the error source chain looking for DNS resolution failures.
fn is_dns_failure(error: &reqwest::Error) -> bool {
    let mut source = std::error::Error::source(error);
    while let Some(err) = source {
        let text = err.to_string();
        if text.contains("dns error")
            || text.contains("failed to lookup address")
            || text.contains("Name or service not known")
        {
            return true;
        }
        source = err.source();
    }
    false
}
