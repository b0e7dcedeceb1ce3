//! Gateway facade shared by every HTTP handler.
//!
//! [`Gateway`] owns the [`TokenProvider`], the [`UpstreamClient`], and the shop identifier.
//! Operations live in the submodules as additional `impl Gateway` blocks: plain passthroughs
//! in `passthrough`, and the enrichment flows in `open_repair_orders` and `customer_history`.
//! Every primary upstream call goes through [`Gateway::send_with`], which instruments the call
//! and drops the cached credential when upstream answers 401.

mod customer_history;
mod open_repair_orders;
mod passthrough;

pub use customer_history::*;

// self
use crate::{
	_prelude::*,
	auth::{TokenProvider, TokenSecret},
	config::GatewayConfig,
	http::{QueryPairs, UpstreamClient, UpstreamRequest, UpstreamResponse},
	obs::{self, CallKind, CallOutcome, CallSpan},
	resource::Resource,
};

/// Page size requested for bounded upstream lists.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Shop-scoped facade over the upstream API.
pub struct Gateway {
	provider: TokenProvider,
	upstream: UpstreamClient,
	shop_id: i64,
}
impl Gateway {
	/// Builds the token provider and upstream client from `config`.
	pub fn from_config(config: &GatewayConfig) -> Result<Self> {
		Self::with_provider(config, TokenProvider::from_config(config)?)
	}

	/// Builds a gateway around a caller-supplied provider (custom clock, margin, or client).
	pub fn with_provider(config: &GatewayConfig, provider: TokenProvider) -> Result<Self> {
		Ok(Self { provider, upstream: UpstreamClient::from_config(config)?, shop_id: config.shop_id })
	}

	/// Token provider backing every call.
	pub fn provider(&self) -> &TokenProvider {
		&self.provider
	}

	/// Upstream transport.
	pub fn upstream(&self) -> &UpstreamClient {
		&self.upstream
	}

	/// Shop every scoped call is bound to.
	pub fn shop_id(&self) -> i64 {
		self.shop_id
	}

	/// Query pairs seeded with `shop=<shop_id>`.
	pub fn scoped_query(&self) -> QueryPairs {
		let mut query = QueryPairs::new();

		query.push("shop", self.shop_id);

		query
	}

	/// Acquires a bearer token for the next upstream call.
	pub async fn access_token(&self) -> Result<TokenSecret> {
		self.provider.access_token().await
	}

	/// Acquires a token and sends `request`.
	pub async fn send(&self, request: UpstreamRequest) -> Result<UpstreamResponse> {
		let token = self.access_token().await?;

		self.send_with(&token, request).await
	}

	/// Sends `request` with an already-acquired `token`.
	///
	/// A 401 response invalidates the cached credential so the next call re-authenticates;
	/// the response itself is still returned for the caller to map.
	pub async fn send_with(
		&self,
		token: &TokenSecret,
		request: UpstreamRequest,
	) -> Result<UpstreamResponse> {
		let span = CallSpan::new(CallKind::Resource, "send");

		obs::record_call_outcome(CallKind::Resource, CallOutcome::Attempt);

		let result = span.instrument(self.upstream.send(request, token)).await;
		let outcome = match &result {
			Ok(response) if response.is_success() => CallOutcome::Success,
			Ok(response) => {
				if response.status == StatusCode::UNAUTHORIZED {
					self.provider.invalidate();
				}

				CallOutcome::Failure
			},
			Err(e) => {
				tracing::warn!(error = %e, "Upstream call failed.");

				CallOutcome::Failure
			},
		};

		obs::record_call_outcome(CallKind::Resource, outcome);

		result
	}
}
impl Debug for Gateway {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Gateway")
			.field("provider", &self.provider)
			.field("base_url", &self.upstream.base_url().as_str())
			.field("shop_id", &self.shop_id)
			.finish()
	}
}

/// Maps a scoped single-entity response: 404 becomes [`Error::NotFound`], other non-2xx
/// statuses become [`Error::Upstream`].
pub(crate) fn require_found(
	response: UpstreamResponse,
	resource: Resource,
	id: i64,
) -> Result<UpstreamResponse> {
	if response.is_not_found() {
		return Err(resource.not_found(id));
	}

	response.error_for_status()
}
