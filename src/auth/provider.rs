//! Client-credentials token acquisition with a time-based cache.
//!
//! [`TokenProvider::access_token`] hands out the cached bearer token while it is inside its
//! usable window and otherwise performs one `client_credentials` exchange against the token
//! endpoint. The cached [`Credential`] is an owned field of the provider, swapped as a single
//! `Arc` so the token and its expiry always become visible together.
//!
//! There is no singleflight guard: callers that race past an expired cache may each issue a
//! refresh. Upstream issues a fresh valid token for every exchange, so the duplicate requests
//! cost a round trip but never return a stale token.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
// self
use crate::{
	_prelude::*,
	auth::{Clock, Credential, SystemClock, TokenSecret},
	config::GatewayConfig,
	error::{AuthenticationError, ConfigError, TransportError},
	http::{self, ResponseMetadata},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=UTF-8";
const GRANT_BODY: &str = "grant_type=client_credentials";
// Larger `expires_in` values are clamped; upstream tokens never live this long.
const MAX_EXPIRES_IN_SECS: i64 = i32::MAX as i64;

/// Client identifier + secret pair presented to the token endpoint.
#[derive(Clone)]
pub struct ClientCredentials {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// OAuth 2.0 client secret.
	pub client_secret: TokenSecret,
}
impl ClientCredentials {
	/// Pairs an identifier with its secret. Emptiness is checked lazily by the provider.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self { client_id: client_id.into(), client_secret: TokenSecret::new(client_secret) }
	}

	/// HTTP Basic header value: `Basic base64(client_id ":" client_secret)`.
	pub fn basic_authorization(&self) -> String {
		let raw = format!("{}:{}", self.client_id, self.client_secret.expose());

		format!("Basic {}", STANDARD.encode(raw))
	}

	fn ensure_present(&self) -> Result<(), ConfigError> {
		if self.client_id.trim().is_empty() {
			return Err(ConfigError::MissingVar { name: "TEKMETRIC_CLIENT_ID" });
		}
		if self.client_secret.is_blank() {
			return Err(ConfigError::MissingVar { name: "TEKMETRIC_CLIENT_SECRET" });
		}

		Ok(())
	}
}
impl Debug for ClientCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientCredentials")
			.field("client_id", &self.client_id)
			.field("client_secret", &self.client_secret)
			.finish()
	}
}

#[derive(Deserialize)]
struct TokenResponse {
	#[serde(default)]
	access_token: Option<String>,
	#[serde(default)]
	expires_in: Option<i64>,
}

/// Supplies a currently-valid bearer token for the upstream API.
pub struct TokenProvider {
	credentials: ClientCredentials,
	token_url: Url,
	http: ReqwestClient,
	clock: Arc<dyn Clock>,
	expiry_margin: Duration,
	cached: RwLock<Option<Arc<Credential>>>,
}
impl TokenProvider {
	/// Safety margin subtracted from the upstream-declared lifetime by default.
	pub const DEFAULT_EXPIRY_MARGIN: Duration = Duration::seconds(10);

	/// Creates a provider that posts `credentials` to `token_url` through `http`.
	pub fn new(credentials: ClientCredentials, token_url: Url, http: ReqwestClient) -> Self {
		Self {
			credentials,
			token_url,
			http,
			clock: Arc::new(SystemClock),
			expiry_margin: Self::DEFAULT_EXPIRY_MARGIN,
			cached: RwLock::new(None),
		}
	}

	/// Creates a provider from validated gateway configuration.
	pub fn from_config(config: &GatewayConfig) -> Result<Self> {
		let http = http::build_http_client(config.request_timeout)?;
		let credentials = ClientCredentials {
			client_id: config.client_id.clone(),
			client_secret: config.client_secret.clone(),
		};

		Ok(Self::new(credentials, config.token_url.clone(), http)
			.with_expiry_margin(config.expiry_margin))
	}

	/// Replaces the time source used for freshness checks.
	pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
		self.clock = clock;

		self
	}

	/// Overrides the expiry safety margin.
	pub fn with_expiry_margin(mut self, margin: Duration) -> Self {
		self.expiry_margin = if margin.is_negative() { Duration::ZERO } else { margin };

		self
	}

	/// Returns the cached credential, if one has been issued.
	pub fn cached(&self) -> Option<Arc<Credential>> {
		self.cached.read().clone()
	}

	/// Drops the cached credential so the next call re-authenticates.
	pub fn invalidate(&self) {
		if self.cached.write().take().is_some() {
			tracing::info!("Cached upstream credential invalidated.");
		}
	}

	/// Returns a bearer token that is valid at the current instant.
	///
	/// Fails with [`ConfigError`] before any network activity when the client id or secret is
	/// empty. Token endpoint failures are surfaced as [`AuthenticationError`] and never retried.
	pub async fn access_token(&self) -> Result<TokenSecret> {
		self.credentials.ensure_present()?;

		let now = self.clock.now();

		if let Some(current) = self.cached().filter(|credential| credential.is_usable_at(now)) {
			return Ok(current.access_token.clone());
		}

		let span = CallSpan::new(CallKind::Token, "access_token");

		obs::record_call_outcome(CallKind::Token, CallOutcome::Attempt);

		let result = span.instrument(self.refresh()).await;

		match &result {
			Ok(_) => obs::record_call_outcome(CallKind::Token, CallOutcome::Success),
			Err(e) => {
				tracing::warn!(error = %e, "Failed to obtain upstream access token.");
				obs::record_call_outcome(CallKind::Token, CallOutcome::Failure);
			},
		}

		result
	}

	async fn refresh(&self) -> Result<TokenSecret> {
		let response = self
			.http
			.post(self.token_url.clone())
			.header(AUTHORIZATION, self.credentials.basic_authorization())
			.header(CONTENT_TYPE, FORM_CONTENT_TYPE)
			.body(GRANT_BODY)
			.send()
			.await
			.map_err(|e| TransportError::from_reqwest(self.token_url.path(), e))?;
		let metadata = ResponseMetadata::capture(response.status(), response.headers());
		let body = response
			.bytes()
			.await
			.map_err(|e| TransportError::from_reqwest(self.token_url.path(), e))?;

		tracing::info!(status = ?metadata.status, "Token endpoint responded.");

		let status = metadata.status.unwrap_or_default();

		if !(200..300).contains(&status) {
			return Err(AuthenticationError::Rejected {
				status,
				body: String::from_utf8_lossy(&body).into_owned(),
			}
			.into());
		}

		let parsed: TokenResponse = http::decode_json(&body)
			.map_err(|source| AuthenticationError::Parse { source })?;
		let access_token = parsed
			.access_token
			.filter(|token| !token.is_empty())
			.map(TokenSecret::new)
			.ok_or(AuthenticationError::MissingAccessToken)?;
		let expires_in =
			Duration::seconds(parsed.expires_in.unwrap_or_default().clamp(0, MAX_EXPIRES_IN_SECS));
		let credential =
			Credential::issue(access_token, self.clock.now(), expires_in, self.expiry_margin);
		let token = credential.access_token.clone();

		tracing::debug!(expires_at = %credential.expires_at, "Cached a fresh upstream credential.");

		*self.cached.write() = Some(Arc::new(credential));

		Ok(token)
	}
}
impl Debug for TokenProvider {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenProvider")
			.field("client_id", &self.credentials.client_id)
			.field("token_url", &self.token_url.as_str())
			.field("expiry_margin", &self.expiry_margin)
			.field("cached", &self.cached.read().is_some())
			.finish()
	}
}
