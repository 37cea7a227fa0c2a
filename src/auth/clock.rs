//! Time source for issuing and validating tokens.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Where "now" comes from.
///
/// Everything in production uses [`Clock::System`]. A [`Clock::Manual`] can be
/// shared between an issuer and an authorizer to move time forward in tests.
#[derive(Debug, Default, Clone)]
pub enum Clock {
	/// The system clock.
	#[default]
	System,

	/// A fixed unix timestamp (in seconds), only moved by [`Clock::advance()`].
	Manual(Arc<AtomicU64>),
}

impl Clock {
	/// Creates a manual clock starting at `timestamp`.
	pub fn manual(timestamp: u64) -> Self {
		Self::Manual(Arc::new(AtomicU64::new(timestamp)))
	}

	/// The current unix timestamp in seconds.
	pub fn now(&self) -> u64 {
		match self {
			Self::System => jwt::get_current_timestamp(),
			Self::Manual(timestamp) => timestamp.load(Ordering::SeqCst),
		}
	}

	/// Moves a manual clock forward by `by`.
	///
	/// Has no effect on [`Clock::System`].
	pub fn advance(&self, by: Duration) {
		if let Self::Manual(timestamp) = self {
			timestamp.fetch_add(by.as_secs(), Ordering::SeqCst);
		}
	}
}
