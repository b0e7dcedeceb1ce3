//! Error to HTTP response mapping.

// crates.io
use axum::{
	Json,
	http::{HeaderValue, header},
	response::{IntoResponse, Response},
};
// self
use crate::{_prelude::*, error::TransportError};

impl Error {
	/// HTTP status the gateway answers with, plus the `type` and `code` of the error body.
	pub fn http_classification(&self) -> (StatusCode, &'static str, &'static str) {
		match self {
			Self::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error", "misconfigured"),
			Self::Authentication(_) =>
				(StatusCode::UNAUTHORIZED, "authentication_error", "upstream_auth_failed"),
			Self::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found_error", "entity_not_found"),
			Self::ScopeNotApplied { .. } =>
				(StatusCode::NOT_FOUND, "not_found_error", "scope_not_applied"),
			Self::Upstream { status, .. } => (
				StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
				"upstream_error",
				"upstream_status",
			),
			Self::Transport(TransportError::Timeout { .. }) =>
				(StatusCode::GATEWAY_TIMEOUT, "upstream_error", "upstream_timeout"),
			Self::Transport(TransportError::Network { .. }) =>
				(StatusCode::BAD_GATEWAY, "upstream_error", "upstream_unreachable"),
			Self::Decode { .. } => (StatusCode::BAD_GATEWAY, "upstream_error", "unexpected_payload"),
		}
	}
}
impl IntoResponse for Error {
	fn into_response(self) -> Response {
		let (status, kind, code) = self.http_classification();

		match &self {
			Self::Config(_) => tracing::error!(error = %self, "Gateway is misconfigured."),
			Self::NotFound { .. } | Self::ScopeNotApplied { .. } =>
				tracing::debug!(error = %self, "Entity not found."),
			_ => tracing::warn!(error = %self, status = status.as_u16(), "Request failed."),
		}

		if let Self::Upstream { body, retry_after, .. } = self {
			return upstream_response(status, body, retry_after);
		}

		let body = serde_json::json!({
			"error": { "message": self.to_string(), "type": kind, "code": code }
		});

		(status, Json(body)).into_response()
	}
}

// Forwards the upstream body verbatim; JSON bodies keep their content type.
fn upstream_response(status: StatusCode, body: String, retry_after: Option<Duration>) -> Response {
	let is_json = serde_json::from_str::<serde::de::IgnoredAny>(&body).is_ok();
	let mut response = (status, body).into_response();
	let headers = response.headers_mut();

	if is_json {
		headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
	}
	if let Some(delay) = retry_after.filter(|delay| delay.is_positive()) {
		headers.insert(header::RETRY_AFTER, HeaderValue::from(delay.whole_seconds().max(1) as u64));
	}

	response
}
