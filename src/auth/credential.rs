//! Immutable bearer credential issued by the token endpoint.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Cached bearer credential. Replaced wholesale on refresh, never mutated in place.
#[derive(Clone)]
pub struct Credential {
	/// Access token secret; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Instant the token endpoint answered.
	pub issued_at: OffsetDateTime,
	/// Last instant (exclusive) at which the token may be handed out.
	pub expires_at: OffsetDateTime,
}
impl Credential {
	/// Builds a credential whose usable window ends `margin` before the upstream expiry.
	///
	/// A missing or short `expires_in` yields a credential that is already unusable, so the
	/// caller receives the token once and the next request refreshes. Lifetimes that overflow
	/// the calendar saturate at the latest representable instant.
	pub fn issue(
		access_token: TokenSecret,
		issued_at: OffsetDateTime,
		expires_in: Duration,
		margin: Duration,
	) -> Self {
		let lifetime = expires_in.saturating_sub(margin);
		let expires_at = issued_at.checked_add(lifetime).unwrap_or(if lifetime.is_negative() {
			issued_at
		} else {
			PrimitiveDateTime::MAX.assume_utc()
		});

		Self { access_token, issued_at, expires_at }
	}

	/// Returns `true` while `instant < expires_at`.
	pub fn is_usable_at(&self, instant: OffsetDateTime) -> bool {
		instant < self.expires_at
	}

	/// Remaining usable lifetime at `instant`, clamped at zero.
	pub fn remaining_at(&self, instant: OffsetDateTime) -> Duration {
		let remaining = self.expires_at - instant;

		if remaining.is_negative() { Duration::ZERO } else { remaining }
	}
}
impl Debug for Credential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credential")
			.field("access_token", &"<redacted>")
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}
