//! Startup configuration for the gateway.
//!
//! [`GatewayConfig`] carries the upstream credentials, the shop every call is scoped to, the
//! upstream endpoints, and the per-call timeout. Values come from the process environment via
//! [`GatewayConfig::from_env`] (the binary loads `.env` first) or from a
//! [`GatewayConfigBuilder`] in tests. Missing credentials or shop identifiers are fatal
//! configuration errors raised before the server starts.

// std
use std::net::SocketAddr;
// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

/// Default upstream API root.
pub const DEFAULT_BASE_URL: &str = "https://shop.tekmetric.com/api/v1/";
/// Default listen address when neither `GATEWAY_BIND` nor `PORT` is set.
pub const DEFAULT_BIND: &str = "0.0.0.0:8000";

const DEFAULT_REQUEST_TIMEOUT: StdDuration = StdDuration::from_secs(5);
const DEFAULT_EXPIRY_MARGIN: Duration = Duration::seconds(10);
const TOKEN_PATH: &str = "oauth/token";

/// Validated gateway configuration.
#[derive(Clone)]
pub struct GatewayConfig {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// OAuth 2.0 client secret; redacted in `Debug` output.
	pub client_secret: TokenSecret,
	/// Shop identifier every scoped upstream call carries.
	pub shop_id: i64,
	/// Upstream API root; always ends with `/` so relative paths join beneath it.
	pub base_url: Url,
	/// Token endpoint for the client-credentials grant.
	pub token_url: Url,
	/// Address the HTTP server binds to.
	pub bind: SocketAddr,
	/// Timeout applied to every outbound call.
	pub request_timeout: StdDuration,
	/// Safety margin subtracted from the upstream-declared token lifetime.
	pub expiry_margin: Duration,
}
impl GatewayConfig {
	/// Returns a builder seeded with defaults.
	pub fn builder() -> GatewayConfigBuilder {
		GatewayConfigBuilder::default()
	}

	/// Loads configuration from the process environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Loads configuration from an arbitrary variable lookup.
	///
	/// `TEKMETRIC_*` names take precedence over the bare `CLIENT_ID`, `CLIENT_SECRET`, and
	/// `SHOP_ID` names older deployments used.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let get = |primary: &str, fallback: Option<&str>| {
			lookup(primary)
				.or_else(|| fallback.and_then(&lookup))
				.map(|value| value.trim().to_owned())
				.filter(|value| !value.is_empty())
		};
		let mut builder = Self::builder();

		if let Some(value) = get("TEKMETRIC_CLIENT_ID", Some("CLIENT_ID")) {
			builder = builder.client_id(value);
		}
		if let Some(value) = get("TEKMETRIC_CLIENT_SECRET", Some("CLIENT_SECRET")) {
			builder = builder.client_secret(value);
		}
		if let Some(value) = get("TEKMETRIC_SHOP_ID", Some("SHOP_ID")) {
			builder = builder.shop_id(parse_var("TEKMETRIC_SHOP_ID", &value)?);
		}
		if let Some(value) = get("TEKMETRIC_BASE_URL", None) {
			builder = builder.base_url(parse_url("TEKMETRIC_BASE_URL", &value)?);
		}
		if let Some(value) = get("TEKMETRIC_TOKEN_URL", None) {
			builder = builder.token_url(parse_url("TEKMETRIC_TOKEN_URL", &value)?);
		}
		if let Some(value) = get("GATEWAY_BIND", None) {
			builder = builder.bind(parse_var("GATEWAY_BIND", &value)?);
		} else if let Some(port) = get("PORT", None) {
			let port: u16 = parse_var("PORT", &port)?;

			builder = builder.bind(SocketAddr::from(([0, 0, 0, 0], port)));
		}
		if let Some(value) = get("GATEWAY_REQUEST_TIMEOUT_MS", None) {
			let millis: u64 = parse_var("GATEWAY_REQUEST_TIMEOUT_MS", &value)?;

			builder = builder.request_timeout(StdDuration::from_millis(millis));
		}

		builder.build()
	}
}
impl Debug for GatewayConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("GatewayConfig")
			.field("client_id", &self.client_id)
			.field("client_secret", &self.client_secret)
			.field("shop_id", &self.shop_id)
			.field("base_url", &self.base_url.as_str())
			.field("token_url", &self.token_url.as_str())
			.field("bind", &self.bind)
			.field("request_timeout", &self.request_timeout)
			.finish()
	}
}

/// Builder for [`GatewayConfig`] values.
#[derive(Debug, Default)]
pub struct GatewayConfigBuilder {
	client_id: Option<String>,
	client_secret: Option<TokenSecret>,
	shop_id: Option<i64>,
	base_url: Option<Url>,
	token_url: Option<Url>,
	bind: Option<SocketAddr>,
	request_timeout: Option<StdDuration>,
	expiry_margin: Option<Duration>,
}
impl GatewayConfigBuilder {
	/// Sets the OAuth 2.0 client identifier.
	pub fn client_id(mut self, value: impl Into<String>) -> Self {
		self.client_id = Some(value.into());

		self
	}

	/// Sets the OAuth 2.0 client secret.
	pub fn client_secret(mut self, value: impl Into<String>) -> Self {
		self.client_secret = Some(TokenSecret::new(value));

		self
	}

	/// Sets the shop identifier.
	pub fn shop_id(mut self, value: i64) -> Self {
		self.shop_id = Some(value);

		self
	}

	/// Overrides the upstream API root.
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Overrides the token endpoint (defaults to `oauth/token` under the base URL).
	pub fn token_url(mut self, url: Url) -> Self {
		self.token_url = Some(url);

		self
	}

	/// Overrides the listen address.
	pub fn bind(mut self, addr: SocketAddr) -> Self {
		self.bind = Some(addr);

		self
	}

	/// Overrides the per-call timeout (defaults to five seconds).
	pub fn request_timeout(mut self, timeout: StdDuration) -> Self {
		self.request_timeout = Some(timeout);

		self
	}

	/// Overrides the token expiry safety margin (defaults to ten seconds).
	pub fn expiry_margin(mut self, margin: Duration) -> Self {
		self.expiry_margin = Some(if margin.is_negative() { Duration::ZERO } else { margin });

		self
	}

	/// Consumes the builder and validates required settings.
	pub fn build(self) -> Result<GatewayConfig, ConfigError> {
		let client_id = self
			.client_id
			.filter(|value| !value.trim().is_empty())
			.ok_or(ConfigError::MissingVar { name: "TEKMETRIC_CLIENT_ID" })?;
		let client_secret = self
			.client_secret
			.filter(|value| !value.is_blank())
			.ok_or(ConfigError::MissingVar { name: "TEKMETRIC_CLIENT_SECRET" })?;
		let shop_id = self.shop_id.ok_or(ConfigError::MissingVar { name: "TEKMETRIC_SHOP_ID" })?;
		let base_url = match self.base_url {
			Some(url) => with_trailing_slash(url),
			None => parse_url("TEKMETRIC_BASE_URL", DEFAULT_BASE_URL)?,
		};
		let token_url = match self.token_url {
			Some(url) => url,
			None => base_url
				.join(TOKEN_PATH)
				.map_err(|source| ConfigError::InvalidUrl { name: "TEKMETRIC_TOKEN_URL", source })?,
		};
		let bind = match self.bind {
			Some(addr) => addr,
			None => parse_var("GATEWAY_BIND", DEFAULT_BIND)?,
		};
		let request_timeout = self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);

		if request_timeout.is_zero() {
			return Err(ConfigError::InvalidVar {
				name: "GATEWAY_REQUEST_TIMEOUT_MS",
				value: "0".into(),
				reason: "timeout must be positive".into(),
			});
		}

		Ok(GatewayConfig {
			client_id,
			client_secret,
			shop_id,
			base_url,
			token_url,
			bind,
			request_timeout,
			expiry_margin: self.expiry_margin.unwrap_or(DEFAULT_EXPIRY_MARGIN),
		})
	}
}

fn parse_var<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
	T: std::str::FromStr,
	T::Err: Display,
{
	value.parse().map_err(|e: T::Err| ConfigError::InvalidVar {
		name,
		value: value.to_owned(),
		reason: e.to_string(),
	})
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, ConfigError> {
	Url::parse(value)
		.map(with_trailing_slash)
		.map_err(|source| ConfigError::InvalidUrl { name, source })
}

// `Url::join` replaces the last segment unless the base ends with `/`.
fn with_trailing_slash(mut url: Url) -> Url {
	if !url.path().ends_with('/') {
		let path = format!("{}/", url.path());

		url.set_path(&path);
	}

	url
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::HashMap;
	// self
	use super::*;

	fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let map: HashMap<String, String> =
			vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();

		move |name| map.get(name).cloned()
	}

	#[test]
	fn loads_required_settings_with_defaults() {
		let config = GatewayConfig::from_lookup(lookup(&[
			("TEKMETRIC_CLIENT_ID", "id"),
			("TEKMETRIC_CLIENT_SECRET", "secret"),
			("TEKMETRIC_SHOP_ID", "6212"),
		]))
		.expect("Complete settings should load.");

		assert_eq!(config.shop_id, 6212);
		assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
		assert_eq!(config.token_url.as_str(), "https://shop.tekmetric.com/api/v1/oauth/token");
		assert_eq!(config.bind.to_string(), DEFAULT_BIND);
		assert_eq!(config.request_timeout, StdDuration::from_secs(5));
		assert_eq!(config.expiry_margin, Duration::seconds(10));
	}

	#[test]
	fn falls_back_to_legacy_names_and_port() {
		let config = GatewayConfig::from_lookup(lookup(&[
			("CLIENT_ID", "legacy-id"),
			("CLIENT_SECRET", "legacy-secret"),
			("SHOP_ID", "1"),
			("PORT", "9090"),
		]))
		.expect("Legacy settings should load.");

		assert_eq!(config.client_id, "legacy-id");
		assert_eq!(config.client_secret.expose(), "legacy-secret");
		assert_eq!(config.bind.port(), 9090);
	}

	#[test]
	fn missing_or_blank_secrets_are_fatal() {
		let err = GatewayConfig::from_lookup(lookup(&[
			("TEKMETRIC_CLIENT_ID", "id"),
			("TEKMETRIC_CLIENT_SECRET", "   "),
			("TEKMETRIC_SHOP_ID", "1"),
		]))
		.expect_err("Blank client secret should be rejected.");

		assert!(matches!(err, ConfigError::MissingVar { name: "TEKMETRIC_CLIENT_SECRET" }));

		let err = GatewayConfig::from_lookup(lookup(&[("TEKMETRIC_CLIENT_SECRET", "secret")]))
			.expect_err("Missing client id should be rejected.");

		assert!(matches!(err, ConfigError::MissingVar { name: "TEKMETRIC_CLIENT_ID" }));
	}

	#[test]
	fn rejects_unparseable_values() {
		let err = GatewayConfig::from_lookup(lookup(&[
			("TEKMETRIC_CLIENT_ID", "id"),
			("TEKMETRIC_CLIENT_SECRET", "secret"),
			("TEKMETRIC_SHOP_ID", "shop-one"),
		]))
		.expect_err("Non-numeric shop id should be rejected.");

		assert!(matches!(err, ConfigError::InvalidVar { name: "TEKMETRIC_SHOP_ID", .. }));
	}

	#[test]
	fn base_url_gains_trailing_slash() {
		let config = GatewayConfig::builder()
			.client_id("id")
			.client_secret("secret")
			.shop_id(1)
			.base_url(Url::parse("http://127.0.0.1:9000/api/v1").expect("URL should parse."))
			.build()
			.expect("Builder should succeed.");

		assert_eq!(config.base_url.as_str(), "http://127.0.0.1:9000/api/v1/");
		assert_eq!(config.token_url.as_str(), "http://127.0.0.1:9000/api/v1/oauth/token");
	}

	#[test]
	fn debug_output_redacts_secret() {
		let config = GatewayConfig::builder()
			.client_id("id")
			.client_secret("do-not-print")
			.shop_id(1)
			.build()
			.expect("Builder should succeed.");

		assert!(!format!("{config:?}").contains("do-not-print"));
	}
}
