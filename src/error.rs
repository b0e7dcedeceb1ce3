//! Gateway-level error types shared across the token provider, upstream client, and handlers.

// self
use crate::_prelude::*;

/// Gateway-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Path-aware JSON decoding failure.
pub type JsonPathError = serde_path_to_error::Error<serde_json::Error>;

/// Canonical gateway error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem; fatal at startup.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// The token endpoint refused to issue a usable credential.
	#[error(transparent)]
	Authentication(#[from] AuthenticationError),
	/// Transport failure (timeout, DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// A scoped single-entity fetch returned 404.
	#[error("{entity} ID {id} not found")]
	NotFound {
		/// Human-readable entity label (for example `Repair Order`).
		entity: &'static str,
		/// Identifier the caller asked for.
		id: i64,
	},
	/// Removing a shop's API scope returned 404.
	#[error("Shop ID {shop_id} not found or scope not applied")]
	ScopeNotApplied {
		/// Shop whose scope removal was requested.
		shop_id: i64,
	},
	/// Upstream answered with a non-2xx status other than a scoped 404.
	#[error("Upstream returned HTTP {status}.")]
	Upstream {
		/// Upstream HTTP status code.
		status: u16,
		/// Upstream response body, preserved verbatim.
		body: String,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
	/// Upstream body did not match the expected shape.
	#[error("Upstream returned an unexpected {target} payload.")]
	Decode {
		/// What the gateway attempted to decode.
		target: &'static str,
		/// Structured parsing failure including the JSON path.
		#[source]
		source: JsonPathError,
	},
}
impl Error {
	/// HTTP status the gateway should forward for this error, when it originated upstream.
	pub fn upstream_status(&self) -> Option<u16> {
		match self {
			Self::Upstream { status, .. } => Some(*status),
			Self::NotFound { .. } | Self::ScopeNotApplied { .. } => Some(404),
			Self::Authentication(AuthenticationError::Rejected { status, .. }) => Some(*status),
			_ => None,
		}
	}
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A required setting is absent or empty.
	#[error("Required setting `{name}` is missing or empty.")]
	MissingVar {
		/// Setting (environment variable) name.
		name: &'static str,
	},
	/// A setting is present but cannot be parsed.
	#[error("Setting `{name}` has an invalid value `{value}`: {reason}.")]
	InvalidVar {
		/// Setting (environment variable) name.
		name: &'static str,
		/// Raw value supplied.
		value: String,
		/// Why the value was rejected.
		reason: String,
	},
	/// A configured URL cannot be parsed or joined.
	#[error("Setting `{name}` is not a valid URL.")]
	InvalidUrl {
		/// Setting (environment variable) name.
		name: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Token endpoint failures. Never retried by the gateway.
#[derive(Debug, ThisError)]
pub enum AuthenticationError {
	/// Token endpoint returned a non-2xx status.
	#[error("Token endpoint rejected the client credentials with HTTP {status}.")]
	Rejected {
		/// HTTP status code returned by the token endpoint.
		status: u16,
		/// Response body returned by the token endpoint.
		body: String,
	},
	/// Token endpoint answered 2xx without an `access_token`.
	#[error("Token endpoint returned no access_token.")]
	MissingAccessToken,
	/// Token endpoint responded with malformed JSON.
	#[error("Token endpoint returned malformed JSON.")]
	Parse {
		/// Structured parsing failure.
		#[source]
		source: JsonPathError,
	},
}

/// Transport-level failures (network, timeouts).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// The call exceeded the configured per-call timeout.
	#[error("Upstream call to `{endpoint}` timed out.")]
	Timeout {
		/// Path of the endpoint that timed out.
		endpoint: String,
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling `{endpoint}`.")]
	Network {
		/// Path of the endpoint being called.
		endpoint: String,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Classifies a reqwest failure raised while calling `endpoint`.
	pub fn from_reqwest(endpoint: impl Into<String>, err: ReqwestError) -> Self {
		let endpoint = endpoint.into();

		if err.is_timeout() {
			Self::Timeout { endpoint, source: Box::new(err) }
		} else {
			Self::Network { endpoint, source: Box::new(err) }
		}
	}

	/// Returns `true` when the failure was a timeout.
	pub fn is_timeout(&self) -> bool {
		matches!(self, Self::Timeout { .. })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn not_found_message_names_entity_and_id() {
		let err = Error::NotFound { entity: "Repair Order", id: 7 };

		assert_eq!(err.to_string(), "Repair Order ID 7 not found");
		assert_eq!(err.upstream_status(), Some(404));
	}

	#[test]
	fn authentication_errors_keep_upstream_status() {
		let err: Error =
			AuthenticationError::Rejected { status: 401, body: "{\"error\":\"nope\"}".into() }
				.into();

		assert_eq!(err.upstream_status(), Some(401));
		assert!(Error::from(AuthenticationError::MissingAccessToken).upstream_status().is_none());
	}
}
