//! Observability helpers for upstream calls.
//!
//! - Every upstream call runs inside a span named `tekmetric_gateway.call` carrying the `call`
//!   (token, resource, hydration) and `stage` (call site) fields.
//! - Enable `metrics` to increment the `tekmetric_gateway_call_total` counter for every
//!   attempt/success/failure/degraded outcome, labeled by `call` + `outcome`.
//! - [`install_subscriber`] wires the process-wide `tracing-subscriber` registry for the binary.

mod metrics;
mod tracing;

pub use self::metrics::*;
pub use self::tracing::*;

// self
use crate::_prelude::*;

/// Upstream call kinds observed by the gateway.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// Client-credentials token request.
	Token,
	/// Primary resource call (list, get, create, update, delete).
	Resource,
	/// Related-entity lookup issued during hydration.
	Hydration,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::Token => "token",
			CallKind::Resource => "resource",
			CallKind::Hydration => "hydration",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a call site.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
	/// Failure absorbed by substituting a default value.
	Degraded,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
			CallOutcome::Degraded => "degraded",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
