//! Shared transport for upstream calls.
//!
//! [`UpstreamClient`] owns the pooled [`ReqwestClient`] and the upstream base URL. Callers
//! describe a call with [`UpstreamRequest`] and receive an [`UpstreamResponse`] carrying the
//! status, the [`ResponseMetadata`] observed on the wire, and the raw body. Only transport
//! failures are errors at this layer; status classification happens through
//! [`UpstreamResponse::error_for_status`] so callers can special-case a scoped 404 before the
//! generic mapping applies.

// std
use std::time::Instant;
// crates.io
use bytes::Bytes;
use reqwest::{
	Method,
	header::{HeaderMap, RETRY_AFTER},
	redirect::Policy,
};
use time::format_description::well_known::Rfc2822;
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	config::GatewayConfig,
	error::{ConfigError, TransportError},
};

/// Builds the pooled HTTP client every upstream call shares.
///
/// Redirects are never followed: the token endpoint and the resource API both answer
/// directly, and a redirect would otherwise carry the bearer token to another origin.
pub fn build_http_client(timeout: StdDuration) -> Result<ReqwestClient, ConfigError> {
	Ok(ReqwestClient::builder().timeout(timeout).redirect(Policy::none()).build()?)
}

/// Metadata captured from an upstream response for downstream error mapping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResponseMetadata {
	/// HTTP status code returned by upstream.
	pub status: Option<u16>,
	/// Retry-After hint expressed as a relative duration.
	pub retry_after: Option<Duration>,
}
impl ResponseMetadata {
	/// Captures status and retry hints from response headers.
	pub fn capture(status: StatusCode, headers: &HeaderMap) -> Self {
		Self { status: Some(status.as_u16()), retry_after: parse_retry_after(headers) }
	}
}

/// Ordered query pairs; keys may repeat (`repairOrderStatusId=1&repairOrderStatusId=2`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryPairs(Vec<(String, String)>);
impl QueryPairs {
	/// Creates an empty set of pairs.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends `key=value`.
	pub fn push(&mut self, key: &str, value: impl Display) -> &mut Self {
		self.0.push((key.to_owned(), value.to_string()));

		self
	}

	/// Appends `key=value` only when a value is present.
	pub fn push_opt<T>(&mut self, key: &str, value: Option<T>) -> &mut Self
	where
		T: Display,
	{
		if let Some(value) = value {
			self.push(key, value);
		}

		self
	}

	/// Appends one `key=item` pair per comma-separated, non-empty item of `csv`.
	pub fn push_csv(&mut self, key: &str, csv: Option<&str>) -> &mut Self {
		for item in csv.into_iter().flat_map(|raw| raw.split(',')) {
			let item = item.trim();

			if !item.is_empty() {
				self.push(key, item);
			}
		}

		self
	}

	/// Appends every pair of `other`, keeping its order.
	pub fn append(&mut self, other: QueryPairs) -> &mut Self {
		self.0.extend(other.0);

		self
	}

	/// Returns the first value stored for `key`.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
	}

	/// Returns `true` when no pairs are stored.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Borrowed view of the pairs, in insertion order.
	pub fn as_slice(&self) -> &[(String, String)] {
		&self.0
	}
}

/// Description of a single upstream call.
#[derive(Clone, Debug)]
pub struct UpstreamRequest {
	/// HTTP method.
	pub method: Method,
	/// Path relative to the upstream base URL (for example `repair-orders/5`).
	pub path: String,
	/// Query pairs appended to the URL.
	pub query: QueryPairs,
	/// Optional JSON body.
	pub body: Option<Value>,
}
impl UpstreamRequest {
	/// Creates a request for `method` + `path`.
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		let path = path.into();

		Self { method, path: path.trim_start_matches('/').to_owned(), query: QueryPairs::new(), body: None }
	}

	/// `GET path`.
	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::GET, path)
	}

	/// `POST path`.
	pub fn post(path: impl Into<String>) -> Self {
		Self::new(Method::POST, path)
	}

	/// `PUT path`.
	pub fn put(path: impl Into<String>) -> Self {
		Self::new(Method::PUT, path)
	}

	/// `PATCH path`.
	pub fn patch(path: impl Into<String>) -> Self {
		Self::new(Method::PATCH, path)
	}

	/// `DELETE path`.
	pub fn delete(path: impl Into<String>) -> Self {
		Self::new(Method::DELETE, path)
	}

	/// Replaces the query pairs.
	pub fn with_query(mut self, query: QueryPairs) -> Self {
		self.query = query;

		self
	}

	/// Attaches a JSON body.
	pub fn with_json(mut self, body: Value) -> Self {
		self.body = Some(body);

		self
	}
}

/// Buffered upstream response.
#[derive(Clone, Debug)]
pub struct UpstreamResponse {
	/// HTTP status returned by upstream.
	pub status: StatusCode,
	/// Status and retry hints captured from the response.
	pub metadata: ResponseMetadata,
	/// Raw response body.
	pub body: Bytes,
}
impl UpstreamResponse {
	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		self.status.is_success()
	}

	/// Returns `true` for 404.
	pub fn is_not_found(&self) -> bool {
		self.status == StatusCode::NOT_FOUND
	}

	/// Maps non-2xx statuses to [`Error::Upstream`], preserving status, body, and retry hint.
	pub fn error_for_status(self) -> Result<Self> {
		if self.is_success() {
			return Ok(self);
		}

		Err(Error::Upstream {
			status: self.status.as_u16(),
			body: String::from_utf8_lossy(&self.body).into_owned(),
			retry_after: self.metadata.retry_after,
		})
	}

	/// Decodes the body as `T`, reporting the failing JSON path on mismatch.
	pub fn json<T>(&self, target: &'static str) -> Result<T>
	where
		T: DeserializeOwned,
	{
		decode_json(&self.body).map_err(|source| Error::Decode { target, source })
	}

	/// Decodes the body as loose JSON, mapping an empty body to `null`.
	pub fn value(&self, target: &'static str) -> Result<Value> {
		if self.body.iter().all(u8::is_ascii_whitespace) {
			return Ok(Value::Null);
		}

		self.json(target)
	}
}

/// Decodes `bytes` as `T` with path-aware error reporting.
pub fn decode_json<T>(bytes: &[u8]) -> Result<T, crate::error::JsonPathError>
where
	T: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(bytes);

	serde_path_to_error::deserialize(&mut deserializer)
}

/// HTTP client for forwarding calls to the upstream API.
#[derive(Clone, Debug)]
pub struct UpstreamClient {
	http: ReqwestClient,
	base_url: Url,
}
impl UpstreamClient {
	/// Builds a client for the configured base URL and per-call timeout.
	pub fn from_config(config: &GatewayConfig) -> Result<Self> {
		let http = build_http_client(config.request_timeout)?;

		Ok(Self::with_client(http, config.base_url.clone()))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(http: ReqwestClient, base_url: Url) -> Self {
		Self { http, base_url }
	}

	/// Shared reqwest client handle.
	pub fn http(&self) -> &ReqwestClient {
		&self.http
	}

	/// Upstream base URL.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Resolves `path` beneath the base URL.
	pub fn url(&self, path: &str) -> Result<Url> {
		self.base_url
			.join(path.trim_start_matches('/'))
			.map_err(|source| ConfigError::InvalidUrl { name: "TEKMETRIC_BASE_URL", source }.into())
	}

	/// Sends `request` with `token` as the bearer credential and buffers the response.
	pub async fn send(&self, request: UpstreamRequest, token: &TokenSecret) -> Result<UpstreamResponse> {
		let url = self.url(&request.path)?;
		let started = Instant::now();
		let mut builder = self.http.request(request.method.clone(), url).bearer_auth(token.expose());

		if !request.query.is_empty() {
			builder = builder.query(request.query.as_slice());
		}
		if let Some(body) = &request.body {
			builder = builder.json(body);
		}

		let response = builder
			.send()
			.await
			.map_err(|e| TransportError::from_reqwest(request.path.clone(), e))?;
		let status = response.status();
		let metadata = ResponseMetadata::capture(status, response.headers());
		let body = response
			.bytes()
			.await
			.map_err(|e| TransportError::from_reqwest(request.path.clone(), e))?;

		tracing::debug!(
			method = %request.method,
			path = %request.path,
			status = status.as_u16(),
			elapsed_ms = started.elapsed().as_millis() as u64,
			"Upstream call completed."
		);

		Ok(UpstreamResponse { status, metadata, body })
	}
}

fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	let value = headers.get(RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<u64>() {
		return Some(Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX)));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Some(delta);
		}
	}

	None
}
