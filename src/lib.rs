//! Thin HTTP gateway for the Tekmetric shop-management API.
//!
//! The [`gateway::Gateway`] facade acquires client-credentials tokens through a cached
//! [`auth::TokenProvider`], forwards shop-scoped calls through [`http::UpstreamClient`], and
//! resolves related entities concurrently with [`hydrate::Hydrator`]. [`api::router`] exposes
//! it over axum.

#![deny(clippy::all, missing_docs)]

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod hydrate;
pub mod model;
pub mod obs;
pub mod resource;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::{Clock, ManualClock, TokenProvider},
		config::GatewayConfig,
		gateway::Gateway,
	};

	/// Shop identifier every test fixture is scoped to.
	pub const TEST_SHOP_ID: i64 = 42;
	/// Client identifier used by test fixtures.
	pub const TEST_CLIENT_ID: &str = "gateway-client";
	/// Client secret used by test fixtures.
	pub const TEST_CLIENT_SECRET: &str = "gateway-secret";

	/// Builds a configuration that points every upstream call at `base_url`
	/// (typically `httpmock::MockServer::url("/")`).
	pub fn test_config(base_url: &str) -> GatewayConfig {
		GatewayConfig::builder()
			.client_id(TEST_CLIENT_ID)
			.client_secret(TEST_CLIENT_SECRET)
			.shop_id(TEST_SHOP_ID)
			.base_url(Url::parse(base_url).expect("Mock base URL should parse successfully."))
			.request_timeout(StdDuration::from_millis(500))
			.build()
			.expect("Test configuration should build successfully.")
	}

	/// Constructs a [`Gateway`] for `config` whose token cache follows `clock`.
	pub fn build_test_gateway(config: &GatewayConfig, clock: Arc<dyn Clock>) -> Gateway {
		let provider = TokenProvider::from_config(config)
			.expect("Token provider should build for the test configuration.")
			.with_clock(clock);

		Gateway::with_provider(config, provider)
			.expect("Gateway should build for the test configuration.")
	}

	/// Manual clock pinned to a fixed instant so cache windows are deterministic.
	pub fn test_clock() -> Arc<ManualClock> {
		Arc::new(ManualClock::new(time::macros::datetime!(2025-01-01 00:00 UTC)))
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		sync::Arc,
		time::Duration as StdDuration,
	};

	pub use parking_lot::{Mutex, RwLock};
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError, StatusCode};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use serde_json::{Map as JsonMap, Value};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime, PrimitiveDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
