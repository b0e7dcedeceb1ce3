//! Time sources consulted by the token cache.

// self
use crate::_prelude::*;

/// Source of "now" for credential freshness checks.
pub trait Clock
where
	Self: Send + Sync,
{
	/// Returns the current instant.
	fn now(&self) -> OffsetDateTime;
}

/// Wall clock backed by [`OffsetDateTime::now_utc`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;
impl Clock for SystemClock {
	fn now(&self) -> OffsetDateTime {
		OffsetDateTime::now_utc()
	}
}

/// Hand-driven clock for deterministic refresh-boundary tests and simulations.
#[derive(Debug)]
pub struct ManualClock(Mutex<OffsetDateTime>);
impl ManualClock {
	/// Creates a clock frozen at `instant`.
	pub fn new(instant: OffsetDateTime) -> Self {
		Self(Mutex::new(instant))
	}

	/// Moves the clock forward (or backward, for negative deltas).
	pub fn advance(&self, delta: Duration) {
		let mut now = self.0.lock();

		*now += delta;
	}

	/// Pins the clock to `instant`.
	pub fn set(&self, instant: OffsetDateTime) {
		*self.0.lock() = instant;
	}
}
impl Clock for ManualClock {
	fn now(&self) -> OffsetDateTime {
		*self.0.lock()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn manual_clock_only_moves_when_told() {
		let clock = ManualClock::new(macros::datetime!(2025-01-01 00:00 UTC));

		assert_eq!(clock.now(), macros::datetime!(2025-01-01 00:00 UTC));

		clock.advance(Duration::minutes(5));

		assert_eq!(clock.now(), macros::datetime!(2025-01-01 00:05 UTC));

		clock.set(macros::datetime!(2030-06-01 12:00 UTC));

		assert_eq!(clock.now(), macros::datetime!(2030-06-01 12:00 UTC));
	}
}
